//! Dataset references

use super::facet::{FacetValue, Facets};
use serde::{Deserialize, Serialize};

/// A dataset read or written by a task.
///
/// Identity is `(namespace, name)`; the engine never interprets either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Facets::is_empty")]
    pub facets: Facets,
}

impl Dataset {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            facets: Facets::new(),
        }
    }

    /// Attach a dataset-level facet
    pub fn with_facet(mut self, key: impl Into<String>, value: FacetValue) -> Self {
        self.facets.insert(key.into(), value);
        self
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
