//! Rendering fault policies.
//!
//! When a block service fails while rendering, an [`ExceptionFilterChain`]
//! decides whether the page survives: filters are consulted in order and the
//! first one with an opinion ([`Decision::Handled`] or
//! [`Decision::NotHandled`]) wins. If none opines the fault propagates.
//!
//! A [`StrategyManager`] picks the chain and the [`FaultRenderer`] per block
//! type, and turns a tolerated fault into a [`Placeholder`].
//!
//! # Example
//!
//! ```rust
//! use blockkit_core::Block;
//! use blockkit_exception::{ExceptionFilterChain, KeepAllFilter};
//!
//! let chain = ExceptionFilterChain::new().with_filter(KeepAllFilter);
//! let fault = std::io::Error::new(std::io::ErrorKind::Other, "feed unreachable");
//! assert!(chain.should_tolerate(&fault, &Block::new("blockkit.block.rss")));
//! ```

mod chain;
mod config;
mod decision;
mod error;
pub mod fault;
mod filter;
mod renderer;
mod strategy;

pub use chain::ExceptionFilterChain;
pub use config::ExceptionConfig;
pub use decision::Decision;
pub use error::Error;
pub use fault::{Fault, FaultClass};
pub use filter::{
    BlockTypeFilter, DebugOnlyFilter, ErrorTypeFilter, ExceptionFilter, IgnoreClassFilter,
    KeepAllFilter, KeepNoneFilter,
};
pub use renderer::{
    FaultRenderer, InlineDebugRenderer, InlineRenderer, MonkeyThrowRenderer, Placeholder,
    GENERIC_FAULT_MESSAGE,
};
pub use strategy::{
    ComponentRegistry, StrategyManager, DEBUG_ONLY_FILTER, INLINE_DEBUG_RENDERER,
    INLINE_RENDERER, KEEP_ALL_FILTER, KEEP_NONE_FILTER, THROW_RENDERER,
};
