//! User configuration.
//!
//! The config file is YAML (or JSON) holding a default page size and named
//! query presets:
//!
//! ```yaml
//! page_size: 20
//! presets:
//!   top-beauty:
//!     collection: creators
//!     description: Beauty creators by engagement
//!     query:
//!       filters:
//!         category: [Beauty]
//!       sort: { field: engagement, dir: desc }
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;

use influbazzar_query::Query;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::load_file;
use crate::error::{AppError, Result};
use crate::model::Collection;

/// Config file looked up in the working directory when `--config` is absent.
pub const FILE_NAME: &str = "influbazzar.yaml";

/// A stored query for one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub collection: Collection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub query: Query,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page size for `query` when `--page-size` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<NonZeroUsize>,
    pub presets: BTreeMap<String, Preset>,
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, [`FILE_NAME`] in the
    /// working directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(FILE_NAME);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let config: Config = load_file(path)?;
        debug!(
            path = %path.display(),
            presets = config.presets.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Looks up a preset by name.
    pub fn preset(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| AppError::UnknownPreset(name.to_string()))
    }
}
