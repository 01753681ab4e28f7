//! Deployment configuration for context resolution.
//!
//! Configuration is a JSON object like:
//! ```json
//! {
//!     "default_cache_service": "acme.cache.none",
//!     "cache_blocks": {"by_class": {"PageBlock": "acme.cache.redis"}},
//!     "settings_by_type": {"blockkit.block.text": {"ttl": 300}},
//!     "settings_by_class": {"PageBlock": {"use_cache": false}}
//! }
//! ```
//! Every key is optional.

use std::collections::BTreeMap;
use std::path::Path;

use blockkit_core::Settings;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheBlocks, CacheKeyStrategy, DEFAULT_CACHE_SERVICE};
use crate::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub default_cache_service: String,
    pub cache_blocks: CacheBlocks,
    /// Default settings layered over a service's schema, per block type.
    pub settings_by_type: BTreeMap<String, Settings>,
    /// Default settings layered over a service's schema, per block class.
    pub settings_by_class: BTreeMap<String, Settings>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_cache_service: DEFAULT_CACHE_SERVICE.to_string(),
            cache_blocks: CacheBlocks::default(),
            settings_by_type: BTreeMap::new(),
            settings_by_class: BTreeMap::new(),
        }
    }
}

impl ContextConfig {
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

    pub fn cache_strategy(&self) -> CacheKeyStrategy {
        CacheKeyStrategy::new(self.cache_blocks.clone(), self.default_cache_service.clone())
    }
}
