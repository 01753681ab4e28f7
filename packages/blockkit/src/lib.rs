//! blockkit: reusable content blocks rendered inside a larger page.
//!
//! Two pieces do the work:
//! - [`context`]: resolve a block and caller overrides into a validated
//!   [`BlockContext`](context::BlockContext), falling back to defaults when
//!   stored settings are broken.
//! - [`exception`]: when a block fails to render, decide through an ordered
//!   filter chain whether the page survives with a placeholder.
//!
//! The layers underneath are re-exported as modules.

mod config;

pub use blockkit_context as context;
pub use blockkit_core as core;
pub use blockkit_exception as exception;
pub use blockkit_settings as settings;

pub use config::{BlockkitConfig, Error};

pub use blockkit_context::{BlockContext, BlockContextManager, CACHE_KEY};
pub use blockkit_core::{Block, Settings, Value};
pub use blockkit_exception::{ExceptionFilterChain, StrategyManager};
