//! Which cache backend owns a block.

use std::collections::BTreeMap;

use blockkit_core::Block;
use serde::{Deserialize, Serialize};

/// Cache service used when no lookup entry matches.
pub const DEFAULT_CACHE_SERVICE: &str = "blockkit.cache.noop";

/// Cache-service lookup table.
///
/// ```json
/// {"by_class": {"PageBlock": "acme.cache.redis"}, "by_type": {"blockkit.block.rss": "acme.cache.memory"}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheBlocks {
    pub by_class: BTreeMap<String, String>,
    pub by_type: BTreeMap<String, String>,
}

/// Maps a block to the id of the cache service responsible for it.
///
/// The block's storage class is consulted first, then its type, then the
/// default id.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheKeyStrategy {
    blocks: CacheBlocks,
    default_service: String,
}

impl CacheKeyStrategy {
    pub fn new(blocks: CacheBlocks, default_service: impl Into<String>) -> Self {
        Self {
            blocks,
            default_service: default_service.into(),
        }
    }

    pub fn service_for(&self, block: &Block) -> &str {
        self.blocks
            .by_class
            .get(block.class())
            .or_else(|| self.blocks.by_type.get(block.block_type()))
            .map(String::as_str)
            .unwrap_or(&self.default_service)
    }

    pub fn default_service(&self) -> &str {
        &self.default_service
    }
}

impl Default for CacheKeyStrategy {
    fn default() -> Self {
        Self::new(CacheBlocks::default(), DEFAULT_CACHE_SERVICE)
    }
}
