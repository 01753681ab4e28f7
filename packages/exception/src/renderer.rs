//! What to put in a failed block's place.

use blockkit_core::Block;
use serde::{Deserialize, Serialize};

use crate::fault::{fault_chain, Fault};

/// Stand-in content for a block whose rendering failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub block_id: String,
    pub block_type: String,
    pub message: String,
    /// Fault messages, outermost first. Empty outside debug rendering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<String>,
}

impl Placeholder {
    fn for_block(block: &Block, message: impl Into<String>) -> Self {
        Self {
            block_id: block.identity().to_string(),
            block_type: block.block_type().to_string(),
            message: message.into(),
            detail: Vec::new(),
        }
    }
}

/// Turns a tolerated fault into a placeholder.
///
/// Returning `None` refuses to substitute; the fault then propagates.
pub trait FaultRenderer: Send + Sync {
    fn render(&self, fault: &Fault, block: &Block) -> Option<Placeholder>;
}

pub const GENERIC_FAULT_MESSAGE: &str = "An error has occurred while rendering this block.";

/// A generic message that reveals nothing about the fault.
#[derive(Debug, Clone)]
pub struct InlineRenderer {
    message: String,
}

impl InlineRenderer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self::new(GENERIC_FAULT_MESSAGE)
    }
}

impl FaultRenderer for InlineRenderer {
    fn render(&self, _fault: &Fault, block: &Block) -> Option<Placeholder> {
        Some(Placeholder::for_block(block, self.message.clone()))
    }
}

/// The fault's message and its source chain in debug mode; the generic
/// message otherwise, so faults are never exposed in production.
#[derive(Debug, Clone, Copy)]
pub struct InlineDebugRenderer {
    debug: bool,
}

impl InlineDebugRenderer {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl FaultRenderer for InlineDebugRenderer {
    fn render(&self, fault: &Fault, block: &Block) -> Option<Placeholder> {
        if !self.debug {
            return Some(Placeholder::for_block(block, GENERIC_FAULT_MESSAGE));
        }
        let mut placeholder = Placeholder::for_block(block, fault.to_string());
        placeholder.detail = fault_chain(fault);
        Some(placeholder)
    }
}

/// Always refuses, re-raising the fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonkeyThrowRenderer;

impl FaultRenderer for MonkeyThrowRenderer {
    fn render(&self, _fault: &Fault, _block: &Block) -> Option<Placeholder> {
        None
    }
}
