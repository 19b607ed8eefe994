//! Shared fixtures for extraction tests
//!
//! Fixed datasets and facets, plus operators covering each combination of
//! declared lineage hooks.

#![allow(dead_code)]

use oplineage::lineage::facet;
use oplineage::{
    Dataset, DagRun, FacetValue, Facets, LineageHooks, LineageLike, Operator, OperatorLineage,
    TaskInstance,
};
use serde_json::json;
use uuid::Uuid;

pub const PARENT_RUN_ID: &str = "3bb703d1-09c1-4a42-8da5-35a0b3216072";

pub fn inputs() -> Vec<Dataset> {
    vec![Dataset::new("database://host:port", "inputtable")]
}

pub fn outputs() -> Vec<Dataset> {
    vec![Dataset::new("database://host:port", "inputtable")]
}

pub fn run_facets() -> Facets {
    let run_id = Uuid::parse_str(PARENT_RUN_ID).unwrap();
    Facets::from([(
        "parent".to_string(),
        facet::parent_run(run_id, "namespace", "parentjob"),
    )])
}

pub fn job_facets() -> Facets {
    Facets::from([("sql".to_string(), facet::sql_job("SELECT * FROM inputtable"))])
}

pub fn finished_facets() -> Facets {
    Facets::from([(
        "complete".to_string(),
        FacetValue::object([("finished", true)]),
    )])
}

pub fn failed_facets() -> Facets {
    Facets::from([(
        "failure".to_string(),
        FacetValue::object([("failed", true)]),
    )])
}

/// What an operator returns from its start hook
pub fn start_lineage() -> OperatorLineage {
    OperatorLineage {
        inputs: inputs(),
        outputs: outputs(),
        run_facets: run_facets(),
        job_facets: job_facets(),
    }
}

/// What an operator returns from its complete hook
pub fn complete_lineage() -> OperatorLineage {
    OperatorLineage {
        run_facets: finished_facets(),
        ..start_lineage()
    }
}

/// What an operator returns from its failure hook
pub fn failure_lineage() -> OperatorLineage {
    OperatorLineage {
        run_facets: failed_facets(),
        ..start_lineage()
    }
}

pub fn dagrun() -> DagRun {
    DagRun::new("test_dag", "manual__2024-01-01")
}

pub fn task_instance(task_id: &str) -> TaskInstance {
    TaskInstance::new("test_dag", task_id, "manual__2024-01-01")
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Implements every hook
pub struct OperatorWithAllOlMethods;

impl Operator for OperatorWithAllOlMethods {
    fn task_id(&self) -> &str {
        "all_methods"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::ALL
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        Some(start_lineage().into())
    }

    fn get_openlineage_facets_on_complete(&self, _: Option<&TaskInstance>) -> Option<LineageLike> {
        Some(complete_lineage().into())
    }

    fn get_openlineage_facets_on_failure(&self, _: Option<&TaskInstance>) -> Option<LineageLike> {
        Some(failure_lineage().into())
    }
}

/// Start and complete, no failure hook
pub struct OperatorWithoutFailure;

impl Operator for OperatorWithoutFailure {
    fn task_id(&self) -> &str {
        "without_failure"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::START | LineageHooks::COMPLETE
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        Some(start_lineage().into())
    }

    fn get_openlineage_facets_on_complete(&self, _: Option<&TaskInstance>) -> Option<LineageLike> {
        Some(complete_lineage().into())
    }
}

/// Start hook only
pub struct OperatorWithoutComplete;

impl Operator for OperatorWithoutComplete {
    fn task_id(&self) -> &str {
        "without_complete"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::START
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        Some(start_lineage().into())
    }
}

/// Complete hook only
pub struct OperatorWithoutStart;

impl Operator for OperatorWithoutStart {
    fn task_id(&self) -> &str {
        "without_start"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::COMPLETE
    }

    fn get_openlineage_facets_on_complete(&self, _: Option<&TaskInstance>) -> Option<LineageLike> {
        Some(complete_lineage().into())
    }
}

/// Returns a lineage-shaped value of its own, with an extra field
pub struct OperatorDifferentOperatorLineageClass;

impl Operator for OperatorDifferentOperatorLineageClass {
    fn task_id(&self) -> &str {
        "different_class"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::START
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        let lineage = start_lineage();
        Some(
            json!({
                "inputs": lineage.inputs,
                "outputs": lineage.outputs,
                "run_facets": lineage.run_facets,
                "job_facets": lineage.job_facets,
                "some_other_param": "asdf",
            })
            .into(),
        )
    }
}

/// Returns a value missing the facet fields
pub struct OperatorWrongOperatorLineageClass;

impl Operator for OperatorWrongOperatorLineageClass {
    fn task_id(&self) -> &str {
        "wrong_class"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::START
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        let lineage = start_lineage();
        Some(
            json!({
                "inputs": lineage.inputs,
                "outputs": lineage.outputs,
                "some_other_param": "asdf",
            })
            .into(),
        )
    }
}

/// Returns a value missing the facet fields, and has annotated datasets
pub struct WrongShapeAnnotatedOperator;

impl Operator for WrongShapeAnnotatedOperator {
    fn task_id(&self) -> &str {
        "wrong_shape_annotated"
    }

    fn lineage_hooks(&self) -> LineageHooks {
        LineageHooks::START
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        Some(json!({"inputs": [], "outputs": []}).into())
    }

    fn inlets(&self) -> Vec<Dataset> {
        inputs()
    }

    fn outlets(&self) -> Vec<Dataset> {
        outputs()
    }
}

/// Carries a field that looks like a hook but declares none
pub struct BrokenOperator {
    pub get_openlineage_facets: Vec<String>,
}

impl Operator for BrokenOperator {
    fn task_id(&self) -> &str {
        "broken"
    }
}

/// Plain operator handled by a custom extractor in tests
pub struct SimpleCustomOperator;

impl Operator for SimpleCustomOperator {
    fn task_id(&self) -> &str {
        "simple_custom"
    }
}

/// Operator with annotated inlets/outlets and no hooks
pub struct AnnotatedOperator;

impl Operator for AnnotatedOperator {
    fn task_id(&self) -> &str {
        "annotated"
    }

    fn inlets(&self) -> Vec<Dataset> {
        inputs()
    }

    fn outlets(&self) -> Vec<Dataset> {
        outputs()
    }
}
