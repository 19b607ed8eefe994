//! Operator trait — the capability surface a unit of work exposes
//!
//! An operator may implement any subset of three lineage hooks. Which ones it
//! implements is declared through [`LineageHooks`]; the default hook bodies are
//! inherited no-ops and never count as an implementation.

use super::task_instance::TaskInstance;
use crate::error::LineageResult;
use crate::lineage::{Dataset, OperatorLineage};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::ops::BitOr;

/// The set of lineage hooks an operator implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineageHooks(u8);

impl LineageHooks {
    pub const NONE: Self = Self(0);
    pub const START: Self = Self(1);
    pub const COMPLETE: Self = Self(1 << 1);
    pub const FAILURE: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::START.0 | Self::COMPLETE.0 | Self::FAILURE.0);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if every hook in `other` is also in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one hook
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LineageHooks {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A value returned by an operator's lineage hook.
///
/// Hooks may hand back the canonical record or any structurally compatible
/// shape; the latter is projected onto [`OperatorLineage`] by field name.
#[derive(Debug, Clone, PartialEq)]
pub enum LineageLike {
    Canonical(OperatorLineage),
    Structural(Value),
}

impl LineageLike {
    /// Wrap any serializable lineage-shaped value.
    ///
    /// A value that cannot be serialized becomes `null` and fails coercion later.
    pub fn structural<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::Structural(serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// Resolve into the canonical record.
    pub fn into_lineage(self) -> LineageResult<OperatorLineage> {
        match self {
            Self::Canonical(lineage) => Ok(lineage),
            Self::Structural(value) => OperatorLineage::coerce(&value),
        }
    }
}

impl From<OperatorLineage> for LineageLike {
    fn from(lineage: OperatorLineage) -> Self {
        Self::Canonical(lineage)
    }
}

impl From<Value> for LineageLike {
    fn from(value: Value) -> Self {
        Self::Structural(value)
    }
}

/// Upcast to `Any` so extractors can recover the concrete operator type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A user-defined unit of work whose execution the orchestrator manages.
///
/// Overriding a `get_openlineage_facets_on_*` hook is not enough on its own:
/// the hook is only called if [`Operator::lineage_hooks`] lists it. An
/// operator that overrides a hook but keeps the default `lineage_hooks` is
/// treated as having no hooks at all. Override both together:
///
/// ```
/// use oplineage::{
///     DefaultExtractor, ExtractorManager, LineageHooks, LineageLike, Operator, OperatorLineage,
/// };
///
/// struct LoadOrders;
///
/// impl Operator for LoadOrders {
///     fn task_id(&self) -> &str {
///         "load_orders"
///     }
///
///     fn lineage_hooks(&self) -> LineageHooks {
///         LineageHooks::START
///     }
///
///     fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
///         Some(OperatorLineage::new().into())
///     }
/// }
///
/// let manager = ExtractorManager::new();
/// let class = manager.get_extractor_class(&LoadOrders).unwrap();
/// assert!(class.is::<DefaultExtractor>());
/// ```
pub trait Operator: AsAny + Send + Sync {
    /// Task identifier within its DAG
    fn task_id(&self) -> &str;

    /// Type name used to look up a registered extractor.
    ///
    /// Defaults to the unqualified Rust type name (`PythonOperator` for
    /// `oplineage::operator::PythonOperator`).
    fn task_type(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Which lineage hooks this operator implements. Must name every
    /// overridden `get_openlineage_facets_on_*` hook.
    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::NONE
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        None
    }

    fn get_openlineage_facets_on_complete(
        &self,
        _task_instance: Option<&TaskInstance>,
    ) -> Option<LineageLike> {
        None
    }

    fn get_openlineage_facets_on_failure(
        &self,
        _task_instance: Option<&TaskInstance>,
    ) -> Option<LineageLike> {
        None
    }

    /// Datasets manually declared as read by this task
    fn inlets(&self) -> Vec<Dataset> {
        Vec::new()
    }

    /// Datasets manually declared as written by this task
    fn outlets(&self) -> Vec<Dataset> {
        Vec::new()
    }
}

/// Attempt to view an operator as a specific concrete type.
pub fn downcast_operator<T: 'static>(operator: &dyn Operator) -> Option<&T> {
    operator.as_any().downcast_ref::<T>()
}

/// Strip the module path (and any generic arguments) from a type name.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
