//! Core blockkit types
//!
//! The data every other layer shares:
//! - `Value`: Dynamically typed settings tree
//! - `ValueKind`: The type tag schemas check values against
//! - `Settings`: Option name to `Value` map
//! - `Block`: A renderable unit with a type, a storage class and raw settings
//!
//! # Example
//!
//! ```rust
//! use blockkit_core::{Block, Value};
//!
//! let block = Block::new("blockkit.block.text").with_setting("content", "Hello");
//! assert_eq!(block.settings().get("content"), Some(&Value::from("Hello")));
//! ```

mod block;
mod value;

pub use block::{Block, BlockDescriptor, DEFAULT_BLOCK_CLASS};
pub use value::{settings_from_json, Settings, Value, ValueKind};
