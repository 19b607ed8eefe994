//! Error types for lineage extraction and configuration

use thiserror::Error;

/// Errors that can occur while extracting lineage or loading configuration.
///
/// The extractor manager never surfaces these to its caller; they exist so
/// extractors and the coercion layer can describe what went wrong before the
/// manager degrades to an empty record.
#[derive(Debug, Error)]
pub enum LineageError {
    /// The operator handed to an extractor is not the type it expects
    #[error("invalid operator: expected {expected}, got {actual}")]
    InvalidOperator { expected: String, actual: String },

    /// A lineage-like value is missing a field or carries an incompatible type
    #[error("cannot coerce field '{field}': {reason}")]
    Coercion { field: String, reason: String },

    /// A lineage-like value is not a structured object
    #[error("lineage value is not an object: {0}")]
    NotAnObject(String),

    /// A declarative operator spec failed validation
    #[error("invalid operator spec: {0}")]
    InvalidSpec(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for lineage operations
pub type LineageResult<T> = Result<T, LineageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_error_names_field() {
        let err = LineageError::Coercion {
            field: "run_facets".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "cannot coerce field 'run_facets': missing");
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LineageError = json_err.into();
        assert!(matches!(err, LineageError::Json(_)));
    }
}
