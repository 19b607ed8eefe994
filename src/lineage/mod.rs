//! Lineage data model
//!
//! Datasets, facets, and the canonical [`OperatorLineage`] record.

mod dataset;
pub mod facet;
mod record;

pub use dataset::Dataset;
pub use facet::{FacetValue, Facets};
pub use record::OperatorLineage;
