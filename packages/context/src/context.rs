//! The resolved configuration of one block.

use std::collections::BTreeMap;

use blockkit_core::{Block, Settings, Value};

use crate::CACHE_KEY;

/// A block paired with its fully resolved settings.
///
/// Created fresh by every resolution and never mutated afterwards; callers
/// that cache rendered output key it on [`extra_cache_keys`](Self::extra_cache_keys)
/// and [`ttl`](Self::ttl).
#[derive(Clone, Debug, PartialEq)]
pub struct BlockContext {
    block: Block,
    settings: Settings,
    cache_service: String,
}

impl BlockContext {
    pub fn new(block: Block, settings: Settings, cache_service: impl Into<String>) -> Self {
        Self {
            block,
            settings,
            cache_service: cache_service.into(),
        }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    /// Id of the cache service that owns this block.
    pub fn cache_service(&self) -> &str {
        &self.cache_service
    }

    pub fn use_cache(&self) -> bool {
        self.setting("use_cache")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn ttl(&self) -> i64 {
        self.setting("ttl").and_then(Value::as_i64).unwrap_or(0)
    }

    /// The template to render with, or `None` when `template` is `false`.
    pub fn template(&self) -> Option<&str> {
        self.setting("template").and_then(Value::as_str)
    }

    pub fn extra_cache_keys(&self) -> Option<&BTreeMap<String, Value>> {
        self.setting("extra_cache_keys").and_then(Value::as_map)
    }

    /// The overlay recorded under [`CACHE_KEY`] when overrides were applied.
    pub fn cache_overlay(&self) -> Option<&Value> {
        self.extra_cache_keys()?.get(CACHE_KEY)
    }

    pub fn into_parts(self) -> (Block, Settings) {
        (self.block, self.settings)
    }
}
