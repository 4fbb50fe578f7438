//! Loading record collections from data files.
//!
//! Files hold a JSON or YAML array of records; the extension picks the
//! format.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, Result};

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            _ => Err(AppError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parses `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            DataFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DataFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Reads any serde-deserializable value from a JSON or YAML file.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&content).map_err(|reason| AppError::parse(path, reason))
}

/// Reads a collection of records from a JSON or YAML array.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let records: Vec<T> = load_file(path)?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}
