//! oplineage: Operator Lineage Extraction
//!
//! Decides, for an arbitrary unit of work run by a workflow orchestrator,
//! which extraction strategy produces its lineage, runs the lifecycle hook
//! that matches the task's run state, and normalizes whatever comes back
//! into a canonical [`OperatorLineage`] record.
//!
//! # Core Concepts
//!
//! - **Operators**: units of work exposing optional lineage hooks
//! - **Extractors**: strategies bound to one operator, with a
//!   failure → complete → start fallback chain
//! - **ExtractorManager**: registry and dispatch; never fails its caller
//!
//! # Example
//!
//! ```
//! use oplineage::{DagRun, ExtractorManager, Operator, PythonOperator, TaskInstanceState};
//! use std::sync::Arc;
//!
//! let manager = ExtractorManager::new();
//! let task: Arc<dyn Operator> = Arc::new(PythonOperator::new("transform", "jobs.transform"));
//! let lineage = manager.extract_metadata(
//!     &DagRun::new("etl", "manual__1"),
//!     &task,
//!     Some(TaskInstanceState::Success),
//!     None,
//! );
//! assert!(lineage.inputs.is_empty());
//! ```

pub mod config;
mod error;
pub mod extractor;
pub mod lineage;
pub mod operator;

pub use config::LineageConfig;
pub use error::{LineageError, LineageResult};
pub use extractor::{
    BashExtractor, DefaultExtractor, Extractor, ExtractorCatalog, ExtractorClass,
    ExtractorManager, PythonExtractor,
};
pub use lineage::{Dataset, FacetValue, Facets, OperatorLineage};
pub use operator::{
    BashOperator, DagRun, DeclarativeOperator, DeclarativeSpec, LineageHooks, LineageLike,
    Operator, PythonOperator, TaskInstance, TaskInstanceState,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
