//! Application error type.

use std::path::PathBuf;

use influbazzar_query::QueryError;
use influbazzar_wizard::WizardError;
use thiserror::Error;

use crate::actions::ActionError;
use crate::output::SerializeError;

/// Errors raised while loading data, reading configuration or running a
/// command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Unsupported file type for {}: expected .json, .yaml or .yml", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Field '{field}' cannot be filtered on {collection}")]
    NotFilterable { field: String, collection: String },

    #[error("Field '{field}' cannot be sorted on {collection}")]
    NotSortable { field: String, collection: String },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl AppError {
    /// Create a parse error for a file.
    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
