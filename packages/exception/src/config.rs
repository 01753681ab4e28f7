//! Which filters and renderers apply to which block types.
//!
//! Configuration is a JSON object like:
//! ```json
//! {
//!     "default_filters": ["debug_only"],
//!     "default_renderer": "throw",
//!     "block_filters": {"blockkit.block.rss": ["keep_all"]},
//!     "block_renderers": {"blockkit.block.rss": "inline"}
//! }
//! ```
//! Names refer to entries of a [`ComponentRegistry`](crate::ComponentRegistry).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::strategy::{DEBUG_ONLY_FILTER, THROW_RENDERER};
use crate::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionConfig {
    /// Filter chain for block types without their own entry.
    pub default_filters: Vec<String>,
    pub default_renderer: String,
    /// Filter chains per block type, evaluated in order.
    pub block_filters: BTreeMap<String, Vec<String>>,
    pub block_renderers: BTreeMap<String, String>,
}

impl Default for ExceptionConfig {
    fn default() -> Self {
        Self {
            default_filters: vec![DEBUG_ONLY_FILTER.to_string()],
            default_renderer: THROW_RENDERER.to_string(),
            block_filters: BTreeMap::new(),
            block_renderers: BTreeMap::new(),
        }
    }
}

impl ExceptionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("Reading {}...", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
