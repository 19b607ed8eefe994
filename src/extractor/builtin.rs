//! Built-in extractors for the built-in operators

use super::traits::Extractor;
use crate::error::{LineageError, LineageResult};
use crate::lineage::{facet, OperatorLineage};
use crate::operator::{downcast_operator, BashOperator, Operator, PythonOperator};
use std::sync::Arc;

fn expect_operator<'a, T: 'static>(
    operator: &'a dyn Operator,
    expected: &str,
) -> LineageResult<&'a T> {
    downcast_operator::<T>(operator).ok_or_else(|| LineageError::InvalidOperator {
        expected: expected.to_string(),
        actual: operator.task_type().to_string(),
    })
}

/// Reports the source of a `PythonOperator` callable as a job facet.
pub struct PythonExtractor {
    operator: Arc<dyn Operator>,
}

impl Extractor for PythonExtractor {
    fn get_operator_classnames() -> Vec<String> {
        vec!["PythonOperator".to_string()]
    }

    fn from_operator(operator: Arc<dyn Operator>) -> Self {
        Self { operator }
    }

    fn operator(&self) -> &dyn Operator {
        self.operator.as_ref()
    }

    fn execute_extraction(&self) -> LineageResult<Option<OperatorLineage>> {
        let op = expect_operator::<PythonOperator>(self.operator.as_ref(), "PythonOperator")?;
        let mut lineage = OperatorLineage::new();
        if let Some(source) = op.source.as_deref().filter(|s| !s.is_empty()) {
            lineage = lineage.with_job_facet("sourceCode", facet::source_code("python", source));
        }
        Ok(Some(lineage))
    }
}

/// Reports the command of a `BashOperator` as a job facet.
pub struct BashExtractor {
    operator: Arc<dyn Operator>,
}

impl Extractor for BashExtractor {
    fn get_operator_classnames() -> Vec<String> {
        vec!["BashOperator".to_string()]
    }

    fn from_operator(operator: Arc<dyn Operator>) -> Self {
        Self { operator }
    }

    fn operator(&self) -> &dyn Operator {
        self.operator.as_ref()
    }

    fn execute_extraction(&self) -> LineageResult<Option<OperatorLineage>> {
        let op = expect_operator::<BashOperator>(self.operator.as_ref(), "BashOperator")?;
        Ok(Some(OperatorLineage::new().with_job_facet(
            "sourceCode",
            facet::source_code("bash", &op.bash_command),
        )))
    }
}
