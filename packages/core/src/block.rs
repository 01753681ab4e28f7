//! Block records.
//!
//! A block is a unit of renderable content: a type tag selecting the service
//! that knows how to render it, a storage class, and a raw settings map.
//! The block subsystem only ever reads blocks; they are owned by the caller.

use serde::{Deserialize, Serialize};

use crate::{Settings, Value};

/// Storage class used when a block does not name one.
pub const DEFAULT_BLOCK_CLASS: &str = "Block";

/// A block record as stored by the surrounding system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default = "default_class")]
    class: String,
    #[serde(default)]
    settings: Settings,
}

fn default_class() -> String {
    DEFAULT_BLOCK_CLASS.to_string()
}

impl Block {
    /// Create an unsaved block of the given type with no settings.
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            block_type: block_type.into(),
            class: default_class(),
            settings: Settings::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The type tag used to look up the block's service.
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// The storage class, consulted by per-class lookup tables.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The raw settings stored on the block.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Identity used in log lines and placeholders.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or("<unsaved>")
    }
}

/// An inline block definition that has not been persisted.
///
/// Loaders turn descriptors into [`Block`] records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub settings: Settings,
}

impl BlockDescriptor {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            settings: Settings::new(),
        }
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }
}
