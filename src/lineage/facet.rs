//! Facet values and well-known facet builders

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A loosely-typed facet value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<FacetValue>),
    Object(BTreeMap<String, FacetValue>),
}

/// Named facets attached to a run, a job, or a dataset
pub type Facets = BTreeMap<String, FacetValue>;

impl FacetValue {
    /// Build an object value from `(key, value)` pairs.
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FacetValue>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a field of an object value.
    pub fn get(&self, key: &str) -> Option<&FacetValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for FacetValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FacetValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for FacetValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Vec<FacetValue>> for FacetValue {
    fn from(items: Vec<FacetValue>) -> Self {
        Self::Array(items)
    }
}

/// Parent run facet: links a task run to the run of its enclosing job.
pub fn parent_run(run_id: Uuid, namespace: &str, name: &str) -> FacetValue {
    FacetValue::object([
        ("run", FacetValue::object([("runId", run_id.to_string())])),
        (
            "job",
            FacetValue::object([("namespace", namespace), ("name", name)]),
        ),
    ])
}

/// SQL job facet carrying the query a task runs.
pub fn sql_job(query: &str) -> FacetValue {
    FacetValue::object([("query", query)])
}

/// Source code job facet.
pub fn source_code(language: &str, source: &str) -> FacetValue {
    FacetValue::object([("language", language), ("sourceCode", source)])
}
