//! Lineage extractors
//!
//! An [`Extractor`] turns one operator into lineage for a lifecycle phase.
//! The [`ExtractorManager`] decides which extractor applies to a task and
//! which phase to run, and guarantees a usable record whatever happens.

mod builtin;
mod catalog;
mod default;
mod manager;
mod traits;

pub use builtin::{BashExtractor, PythonExtractor};
pub use catalog::ExtractorCatalog;
pub use default::DefaultExtractor;
pub use manager::{builtin_extractors, merge_registry, ExtractorManager};
pub use traits::{Extractor, ExtractorClass};

use std::any::Any;

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
