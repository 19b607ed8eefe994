//! DefaultExtractor — adapts an operator's own lineage hooks
//!
//! Used for any operator that declares at least one hook and has no
//! extractor registered for its task type. Hook return values are coerced
//! into the canonical record; values that cannot be coerced yield no
//! lineage instead of failing the caller.

use super::traits::Extractor;
use super::panic_message;
use crate::error::LineageResult;
use crate::lineage::OperatorLineage;
use crate::operator::{LineageHooks, LineageLike, Operator, TaskInstance};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct DefaultExtractor {
    operator: Arc<dyn Operator>,
}

impl DefaultExtractor {
    /// True if the operator declares any lineage hook.
    pub fn is_applicable(operator: &dyn Operator) -> bool {
        operator.lineage_hooks().intersects(LineageHooks::ALL)
    }

    fn declares(&self, hook: LineageHooks) -> bool {
        self.operator.lineage_hooks().contains(hook)
    }

    /// Call one hook and coerce what it returns.
    fn facets_from(
        &self,
        hook: &'static str,
        call: impl FnOnce() -> Option<LineageLike>,
    ) -> LineageResult<Option<OperatorLineage>> {
        let returned = match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(returned) => returned,
            Err(payload) => {
                warn!(
                    task_type = self.operator.task_type(),
                    task_id = self.operator.task_id(),
                    hook,
                    panic = %panic_message(&*payload),
                    "lineage hook panicked"
                );
                return Ok(None);
            }
        };

        let Some(like) = returned else {
            debug!(task_id = self.operator.task_id(), hook, "lineage hook returned nothing");
            return Ok(None);
        };

        match like.into_lineage() {
            Ok(lineage) => Ok(Some(lineage)),
            Err(e) => {
                warn!(
                    task_type = self.operator.task_type(),
                    task_id = self.operator.task_id(),
                    hook,
                    error = %e,
                    "lineage hook returned a value that is not lineage-shaped; ignoring it"
                );
                Ok(None)
            }
        }
    }
}

impl Extractor for DefaultExtractor {
    fn get_operator_classnames() -> Vec<String> {
        Vec::new()
    }

    fn from_operator(operator: Arc<dyn Operator>) -> Self {
        Self { operator }
    }

    fn operator(&self) -> &dyn Operator {
        self.operator.as_ref()
    }

    fn execute_extraction(&self) -> LineageResult<Option<OperatorLineage>> {
        if !self.declares(LineageHooks::START) {
            return Ok(Some(OperatorLineage::default()));
        }
        self.facets_from("on_start", || {
            self.operator.get_openlineage_facets_on_start()
        })
    }

    fn extract_on_complete(
        &self,
        task_instance: Option<&TaskInstance>,
    ) -> LineageResult<Option<OperatorLineage>> {
        if !self.declares(LineageHooks::COMPLETE) {
            return self.extract();
        }
        self.facets_from("on_complete", || {
            self.operator.get_openlineage_facets_on_complete(task_instance)
        })
    }

    fn extract_on_failure(
        &self,
        task_instance: Option<&TaskInstance>,
    ) -> LineageResult<Option<OperatorLineage>> {
        if !self.declares(LineageHooks::FAILURE) {
            return self.extract_on_complete(task_instance);
        }
        self.facets_from("on_failure", || {
            self.operator.get_openlineage_facets_on_failure(task_instance)
        })
    }
}
