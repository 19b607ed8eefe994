//! Extractor trait — the contract lineage strategies implement
//!
//! An extractor owns one operator for its lifetime and produces lineage for
//! three lifecycle phases. Each phase falls back to the less specific one:
//! failure → complete → start. Implement only the richest hook there is
//! data for; callers always get the answer of the nearest implemented phase.

use crate::error::LineageResult;
use crate::lineage::OperatorLineage;
use crate::operator::{short_type_name, Operator, TaskInstance};
use std::any::TypeId;
use std::sync::Arc;

/// A lineage extraction strategy bound to one operator.
///
/// `Ok(None)` means "no lineage available" and is not an error.
pub trait Extractor: Send {
    /// Operator task types this extractor is registered for.
    ///
    /// A set: order is irrelevant and repeated names collapse to one entry
    /// in [`ExtractorClass::operator_classnames`].
    fn get_operator_classnames() -> Vec<String>
    where
        Self: Sized;

    fn from_operator(operator: Arc<dyn Operator>) -> Self
    where
        Self: Sized;

    /// The operator this extractor was created for
    fn operator(&self) -> &dyn Operator;

    /// Start-of-execution extraction. Unimplemented by default.
    fn execute_extraction(&self) -> LineageResult<Option<OperatorLineage>> {
        Ok(None)
    }

    fn extract(&self) -> LineageResult<Option<OperatorLineage>> {
        self.execute_extraction()
    }

    fn extract_on_complete(
        &self,
        _task_instance: Option<&TaskInstance>,
    ) -> LineageResult<Option<OperatorLineage>> {
        self.extract()
    }

    fn extract_on_failure(
        &self,
        task_instance: Option<&TaskInstance>,
    ) -> LineageResult<Option<OperatorLineage>> {
        self.extract_on_complete(task_instance)
    }
}

/// A first-class extractor type: what a registry maps operator types to.
///
/// Two classes are equal when they describe the same Rust type.
#[derive(Clone)]
pub struct ExtractorClass {
    type_id: TypeId,
    name: &'static str,
    operator_classnames: Vec<String>,
    construct: fn(Arc<dyn Operator>) -> Box<dyn Extractor>,
}

fn construct_boxed<E: Extractor + 'static>(operator: Arc<dyn Operator>) -> Box<dyn Extractor> {
    Box::new(E::from_operator(operator))
}

impl ExtractorClass {
    pub fn of<E: Extractor + 'static>() -> Self {
        let mut operator_classnames: Vec<String> = Vec::new();
        for name in E::get_operator_classnames() {
            if !operator_classnames.contains(&name) {
                operator_classnames.push(name);
            }
        }
        Self {
            type_id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
            operator_classnames,
            construct: construct_boxed::<E>,
        }
    }

    /// Fully-qualified type name
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn short_name(&self) -> &str {
        short_type_name(self.name)
    }

    /// Distinct operator task types, in first-declared order
    pub fn operator_classnames(&self) -> &[String] {
        &self.operator_classnames
    }

    pub fn is<E: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    /// Create an extractor bound to `operator`.
    pub fn instantiate(&self, operator: Arc<dyn Operator>) -> Box<dyn Extractor> {
        (self.construct)(operator)
    }
}

impl PartialEq for ExtractorClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ExtractorClass {}

impl std::fmt::Debug for ExtractorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorClass")
            .field("name", &self.name)
            .field("operator_classnames", &self.operator_classnames)
            .finish()
    }
}

impl std::fmt::Display for ExtractorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
