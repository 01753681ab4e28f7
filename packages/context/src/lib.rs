//! Block context resolution.
//!
//! Given a block and caller overrides, produce a [`BlockContext`]: the
//! block's settings validated against its service's schema, with builtin
//! and deployment defaults filled in, overrides applied, and a cache key
//! overlay recorded under [`CACHE_KEY`].
//!
//! - `BlockService` / `BlockServiceResolver`: who declares a block type's options
//! - `CacheKeyStrategy`: which cache service owns a block
//! - `BlockContextManager`: the resolution pipeline, with fallback to defaults
//!
//! # Example
//!
//! ```rust
//! use blockkit_context::{BlockContextManager, BlockServiceManager, services::TEXT_BLOCK};
//! use blockkit_core::{Block, Settings};
//!
//! let manager = BlockContextManager::new(BlockServiceManager::with_builtin_services());
//! let context = manager.resolve(&Block::new(TEXT_BLOCK), &Settings::new())?;
//! assert_eq!(context.template(), Some("block/text.html"));
//! # Ok::<(), blockkit_context::Error>(())
//! ```

pub mod cache;
mod config;
mod context;
mod error;
pub mod loader;
mod logger;
mod manager;
mod service;
pub mod services;

pub use cache::{CacheBlocks, CacheKeyStrategy, DEFAULT_CACHE_SERVICE};
pub use config::ContextConfig;
pub use context::BlockContext;
pub use error::Error;
pub use loader::{BlockLoader, BlockLoaderChain, ServiceLoader};
pub use logger::{LogLogger, Logger};
pub use manager::{builtin_defaults, builtin_schema, BlockContextManager, CACHE_KEY};
pub use service::{BlockService, BlockServiceManager, BlockServiceResolver};
