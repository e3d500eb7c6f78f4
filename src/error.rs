//! Error types for the mk-design library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Inconsistent row at line {line}: expected {expected} fields, got {actual}")]
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Column index {index} out of range ({n_columns} covariate columns)")]
    ColumnOutOfRange { index: usize, n_columns: usize },

    #[error("Value error: {0}")]
    Value(String),

    #[error("Non-numeric value '{value}' for subject '{subject}' in column '{column}'")]
    NonNumeric {
        column: String,
        subject: String,
        value: String,
    },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DesignError {
    /// Broad category of the error, matching the classes reported to users.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DesignError::Io(_)
            | DesignError::Read { .. }
            | DesignError::Csv(_)
            | DesignError::Parse(_)
            | DesignError::RaggedRow { .. }
            | DesignError::Yaml(_) => ErrorKind::Parse,
            DesignError::Config(_) | DesignError::ColumnOutOfRange { .. } => ErrorKind::Config,
            DesignError::Value(_) | DesignError::NonNumeric { .. } => ErrorKind::Value,
        }
    }
}

/// Error classes: unreadable/malformed input, invalid options, bad values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Config,
    Value,
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, DesignError>;
