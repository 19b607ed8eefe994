//! Built-in operators with dedicated extractors
//!
//! Neither implements a lineage hook; their lineage comes from
//! `PythonExtractor` and `BashExtractor`, registered by task type.

use super::traits::Operator;

/// Runs a Python callable.
#[derive(Debug, Clone, PartialEq)]
pub struct PythonOperator {
    pub task_id: String,
    /// Dotted name of the callable
    pub python_callable: String,
    /// Source of the callable, when the runtime could read it
    pub source: Option<String>,
}

impl PythonOperator {
    pub fn new(task_id: impl Into<String>, python_callable: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            python_callable: python_callable.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Operator for PythonOperator {
    fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Runs a shell command.
#[derive(Debug, Clone, PartialEq)]
pub struct BashOperator {
    pub task_id: String,
    pub bash_command: String,
}

impl BashOperator {
    pub fn new(task_id: impl Into<String>, bash_command: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            bash_command: bash_command.into(),
        }
    }
}

impl Operator for BashOperator {
    fn task_id(&self) -> &str {
        &self.task_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_types_match_registry_names() {
        assert_eq!(PythonOperator::new("c", "pkg.fn").task_type(), "PythonOperator");
        assert_eq!(BashOperator::new("b", "echo hi").task_type(), "BashOperator");
    }

    #[test]
    fn builtins_declare_no_hooks() {
        assert!(PythonOperator::new("c", "pkg.fn").lineage_hooks().is_empty());
        assert!(BashOperator::new("b", "echo hi").lineage_hooks().is_empty());
    }
}
