//! ExtractorCatalog — the extractor classes a process knows how to build
//!
//! Configuration names custom extractors by fully-qualified type name. The
//! catalog turns those names into [`ExtractorClass`] values; names it does
//! not know are skipped with a warning.

use super::builtin::{BashExtractor, PythonExtractor};
use super::default::DefaultExtractor;
use super::traits::{Extractor, ExtractorClass};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ExtractorCatalog {
    classes: HashMap<String, ExtractorClass>,
}

impl ExtractorCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the extractors shipped with this crate
    pub fn builtin() -> Self {
        Self::new()
            .with::<PythonExtractor>()
            .with::<BashExtractor>()
            .with::<DefaultExtractor>()
    }

    /// Register an extractor under its fully-qualified type name.
    pub fn with<E: Extractor + 'static>(mut self) -> Self {
        self.register(ExtractorClass::of::<E>());
        self
    }

    pub fn register(&mut self, class: ExtractorClass) {
        self.classes.insert(class.name().to_string(), class);
    }

    /// Register an extractor under an additional name.
    pub fn register_as(&mut self, alias: impl Into<String>, class: ExtractorClass) {
        self.classes.insert(alias.into(), class);
    }

    pub fn get(&self, name: &str) -> Option<&ExtractorClass> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve configured names into classes, in order, skipping unknown names.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<ExtractorClass> {
        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let class = self.classes.get(name).cloned();
                if class.is_none() {
                    warn!(extractor = name, "unable to resolve custom extractor; ignoring it");
                }
                class
            })
            .collect()
    }
}
