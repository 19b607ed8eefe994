//! ExtractorManager — picks an extractor for a task and runs the right phase
//!
//! Resolution order for a task:
//! 1. an extractor registered for the task type (custom beats built-in),
//! 2. `DefaultExtractor` if the task declares any lineage hook,
//! 3. none.
//!
//! Extraction is best-effort. Whatever an extractor does (return nothing,
//! return an error, panic), the caller receives a valid `OperatorLineage`.

use super::builtin::{BashExtractor, PythonExtractor};
use super::catalog::ExtractorCatalog;
use super::default::DefaultExtractor;
use super::panic_message;
use super::traits::ExtractorClass;
use crate::config::LineageConfig;
use crate::lineage::OperatorLineage;
use crate::operator::{DagRun, Operator, TaskInstance, TaskInstanceState};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Job facet dropped when source code inclusion is disabled
const SOURCE_CODE_FACET: &str = "sourceCode";

/// Lifecycle phase an extraction runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Complete,
    Failure,
}

impl Phase {
    /// Only an explicit failure takes the failure path.
    fn for_state(state: Option<TaskInstanceState>) -> Self {
        match state {
            Some(TaskInstanceState::Failed) => Self::Failure,
            _ => Self::Complete,
        }
    }
}

/// Extractors shipped with this crate, registered by operator task type
pub fn builtin_extractors() -> Vec<ExtractorClass> {
    vec![
        ExtractorClass::of::<PythonExtractor>(),
        ExtractorClass::of::<BashExtractor>(),
    ]
}

/// Build the task type → extractor registry. Custom entries override built-ins.
pub fn merge_registry(
    builtin: &[ExtractorClass],
    custom: &[ExtractorClass],
) -> HashMap<String, ExtractorClass> {
    let mut registry = HashMap::new();

    for class in builtin {
        for operator in class.operator_classnames() {
            registry.insert(operator.clone(), class.clone());
        }
    }

    for class in custom {
        for operator in class.operator_classnames() {
            if let Some(previous) = registry.insert(operator.clone(), class.clone()) {
                debug!(
                    operator = %operator,
                    replaced = previous.name(),
                    extractor = class.name(),
                    "custom extractor overrides existing registration"
                );
            }
        }
    }

    registry
}

/// Registry and dispatcher for lineage extractors.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug)]
pub struct ExtractorManager {
    extractors: HashMap<String, ExtractorClass>,
    default_extractor: ExtractorClass,
    config: LineageConfig,
}

impl ExtractorManager {
    /// Manager with the built-in extractors only
    pub fn new() -> Self {
        Self::with_custom_extractors(Vec::new())
    }

    pub fn with_custom_extractors(custom: Vec<ExtractorClass>) -> Self {
        Self::build(custom, LineageConfig::default())
    }

    /// Build from configuration, resolving custom extractor names through `catalog`.
    pub fn from_config(config: &LineageConfig, catalog: &ExtractorCatalog) -> Self {
        let custom = catalog.resolve(&config.extractors);
        Self::build(custom, config.clone())
    }

    fn build(custom: Vec<ExtractorClass>, config: LineageConfig) -> Self {
        let extractors = merge_registry(&builtin_extractors(), &custom);
        debug!(
            registered = extractors.len(),
            custom = custom.len(),
            "extractor registry built"
        );
        Self {
            extractors,
            default_extractor: ExtractorClass::of::<DefaultExtractor>(),
            config,
        }
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    /// The task type → extractor registry
    pub fn registry(&self) -> &HashMap<String, ExtractorClass> {
        &self.extractors
    }

    /// Registered task types, sorted
    pub fn registered_operators(&self) -> Vec<&str> {
        let mut operators: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        operators.sort_unstable();
        operators
    }

    /// Pick the extractor class for a task, if any applies.
    pub fn get_extractor_class(&self, task: &dyn Operator) -> Option<&ExtractorClass> {
        if let Some(class) = self.extractors.get(task.task_type()) {
            return Some(class);
        }
        if DefaultExtractor::is_applicable(task) {
            return Some(&self.default_extractor);
        }
        None
    }

    /// Extract lineage for a task that reached `task_instance_state`.
    ///
    /// `Failed` runs the failure phase; every other state, including none,
    /// runs the complete phase. Never fails: problems degrade to an empty
    /// record.
    pub fn extract_metadata(
        &self,
        dagrun: &DagRun,
        task: &Arc<dyn Operator>,
        task_instance_state: Option<TaskInstanceState>,
        task_instance: Option<&TaskInstance>,
    ) -> OperatorLineage {
        self.run_extraction(dagrun, task, Phase::for_state(task_instance_state), task_instance)
    }

    /// Extract lineage at the start of task execution.
    pub fn extract_start_metadata(&self, dagrun: &DagRun, task: &Arc<dyn Operator>) -> OperatorLineage {
        self.run_extraction(dagrun, task, Phase::Start, None)
    }

    fn run_extraction(
        &self,
        dagrun: &DagRun,
        task: &Arc<dyn Operator>,
        phase: Phase,
        task_instance: Option<&TaskInstance>,
    ) -> OperatorLineage {
        let task_type = task.task_type();
        let task_id = task.task_id();

        if self.config.disabled || self.config.is_operator_disabled(task_type) {
            debug!(task_type, task_id, "lineage extraction disabled for task");
            return OperatorLineage::default();
        }

        let Some(class) = self.get_extractor_class(task.as_ref()) else {
            debug!(
                task_type,
                task_id,
                dag_id = %dagrun.dag_id,
                run_id = %dagrun.run_id,
                "no extractor found; using annotated lineage"
            );
            return self.finalize(task.as_ref(), OperatorLineage::default());
        };

        debug!(
            extractor = class.short_name(),
            ?phase,
            task_type,
            task_id,
            dag_id = %dagrun.dag_id,
            run_id = %dagrun.run_id,
            "running extractor"
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let extractor = class.instantiate(Arc::clone(task));
            match phase {
                Phase::Start => extractor.extract(),
                Phase::Complete => extractor.extract_on_complete(task_instance),
                Phase::Failure => extractor.extract_on_failure(task_instance),
            }
        }));

        match outcome {
            Ok(Ok(Some(lineage))) => self.finalize(task.as_ref(), lineage),
            Ok(Ok(None)) => {
                debug!(extractor = class.short_name(), task_id, "extractor found no lineage");
                OperatorLineage::default()
            }
            Ok(Err(e)) => {
                warn!(
                    extractor = class.name(),
                    task_type,
                    task_id,
                    run_id = %dagrun.run_id,
                    error = %e,
                    "failed to extract metadata using found extractor"
                );
                OperatorLineage::default()
            }
            Err(payload) => {
                warn!(
                    extractor = class.name(),
                    task_type,
                    task_id,
                    run_id = %dagrun.run_id,
                    panic = %panic_message(&*payload),
                    "extractor panicked"
                );
                OperatorLineage::default()
            }
        }
    }

    /// Apply annotated inlets/outlets and the source code setting.
    fn finalize(&self, task: &dyn Operator, mut lineage: OperatorLineage) -> OperatorLineage {
        if !lineage.has_datasets() {
            lineage.inputs = task.inlets();
            lineage.outputs = task.outlets();
        }
        if !self.config.include_source_code {
            lineage.job_facets.remove(SOURCE_CODE_FACET);
        }
        lineage
    }
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}
