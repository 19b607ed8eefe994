//! Units of work and their run state
//!
//! The orchestration runtime owns operators and task instances; this module
//! only describes the surface lineage extraction reads from them.

mod builtin;
pub mod declarative;
mod task_instance;
mod traits;

pub use builtin::{BashOperator, PythonOperator};
pub use declarative::{DeclarativeOperator, DeclarativeSpec};
pub use task_instance::{DagRun, TaskInstance, TaskInstanceState};
pub use traits::{
    downcast_operator, short_type_name, AsAny, LineageHooks, LineageLike, Operator,
};
