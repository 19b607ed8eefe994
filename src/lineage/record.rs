//! OperatorLineage: the canonical lineage record
//!
//! One record is produced per lifecycle invocation. Values returned by
//! operators in some other shape are projected onto this record field by
//! field (see [`OperatorLineage::coerce`]).

use super::dataset::Dataset;
use super::facet::{FacetValue, Facets};
use crate::error::{LineageError, LineageResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inputs, outputs and facets describing one execution of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorLineage {
    pub inputs: Vec<Dataset>,
    pub outputs: Vec<Dataset>,
    /// Facets scoped to a single run
    pub run_facets: Facets,
    /// Facets scoped to the job (task definition)
    pub job_facets: Facets,
}

impl OperatorLineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(mut self, inputs: Vec<Dataset>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<Dataset>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_run_facet(mut self, key: impl Into<String>, value: FacetValue) -> Self {
        self.run_facets.insert(key.into(), value);
        self
    }

    pub fn with_job_facet(mut self, key: impl Into<String>, value: FacetValue) -> Self {
        self.job_facets.insert(key.into(), value);
        self
    }

    /// True if every collection is empty
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.outputs.is_empty()
            && self.run_facets.is_empty()
            && self.job_facets.is_empty()
    }

    /// True if the record names at least one input or output
    pub fn has_datasets(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    /// Project a structured value onto the canonical record.
    ///
    /// The value must be an object carrying `inputs`, `outputs`, `run_facets`
    /// and `job_facets`, each compatible with the canonical field type.
    /// Any other fields are ignored.
    pub fn coerce(value: &Value) -> LineageResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| LineageError::NotAnObject(value_kind(value).to_string()))?;

        Ok(Self {
            inputs: project(object, "inputs")?,
            outputs: project(object, "outputs")?,
            run_facets: project(object, "run_facets")?,
            job_facets: project(object, "job_facets")?,
        })
    }

    /// Serialize any lineage-shaped value and project it onto the canonical record.
    pub fn coerce_from<T: Serialize + ?Sized>(value: &T) -> LineageResult<Self> {
        let value = serde_json::to_value(value)?;
        Self::coerce(&value)
    }
}

fn project<T: DeserializeOwned>(object: &Map<String, Value>, field: &str) -> LineageResult<T> {
    let raw = object.get(field).ok_or_else(|| LineageError::Coercion {
        field: field.to_string(),
        reason: "field is missing".to_string(),
    })?;
    T::deserialize(raw).map_err(|e| LineageError::Coercion {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::facet::sql_job;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn sample() -> OperatorLineage {
        OperatorLineage::new()
            .with_inputs(vec![Dataset::new("database://host:port", "inputtable")])
            .with_outputs(vec![Dataset::new("database://host:port", "outputtable")])
            .with_job_facet("sql", sql_job("SELECT * FROM inputtable"))
    }

    #[test]
    fn default_is_empty() {
        let lineage = OperatorLineage::default();
        assert!(lineage.is_empty());
        assert!(!lineage.has_datasets());
        assert_eq!(lineage, OperatorLineage::new());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(sample(), sample());
        assert_ne!(sample(), sample().with_run_facet("extra", FacetValue::Bool(true)));
    }

    // === Scenario: differently-shaped value with extra fields ===
    #[test]
    fn coerce_ignores_extra_fields() {
        let value = json!({
            "name": "unused",
            "inputs": [{"namespace": "database://host:port", "name": "inputtable"}],
            "outputs": [{"namespace": "database://host:port", "name": "outputtable"}],
            "run_facets": {},
            "job_facets": {"sql": {"query": "SELECT * FROM inputtable"}},
            "some_other_param": {"asdf": "fdsa"}
        });

        assert_eq!(OperatorLineage::coerce(&value).unwrap(), sample());
    }

    // === Scenario: value missing facet fields ===
    #[test]
    fn coerce_rejects_missing_fields() {
        let value = json!({
            "inputs": [],
            "outputs": [],
            "some_other_param": {}
        });

        match OperatorLineage::coerce(&value) {
            Err(LineageError::Coercion { field, .. }) => assert_eq!(field, "run_facets"),
            other => panic!("expected coercion error, got {:?}", other),
        }
    }

    #[test]
    fn coerce_rejects_incompatible_types() {
        let value = json!({
            "inputs": "not-a-list",
            "outputs": [],
            "run_facets": {},
            "job_facets": {}
        });

        assert!(matches!(
            OperatorLineage::coerce(&value),
            Err(LineageError::Coercion { ref field, .. }) if field == "inputs"
        ));
    }

    #[test]
    fn coerce_rejects_non_objects() {
        assert!(matches!(
            OperatorLineage::coerce(&json!([1, 2])),
            Err(LineageError::NotAnObject(kind)) if kind == "array"
        ));
        assert!(OperatorLineage::coerce(&Value::Null).is_err());
    }

    #[test]
    fn coerce_from_serializable_struct() {
        #[derive(Serialize)]
        struct OtherLineage {
            inputs: Vec<Dataset>,
            outputs: Vec<Dataset>,
            run_facets: BTreeMap<String, FacetValue>,
            job_facets: BTreeMap<String, FacetValue>,
            version: u32,
        }

        let other = OtherLineage {
            inputs: sample().inputs,
            outputs: sample().outputs,
            run_facets: BTreeMap::new(),
            job_facets: sample().job_facets,
            version: 2,
        };

        assert_eq!(OperatorLineage::coerce_from(&other).unwrap(), sample());
    }

    #[test]
    fn deserialize_fills_missing_collections() {
        let lineage: OperatorLineage = serde_json::from_str(r#"{"job_facets": {"a": 1}}"#).unwrap();
        assert!(lineage.inputs.is_empty());
        assert_eq!(lineage.job_facets.get("a"), Some(&FacetValue::Int(1)));
    }
}
