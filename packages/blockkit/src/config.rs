//! One configuration document for the whole block subsystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use blockkit_context::{BlockContextManager, BlockServiceResolver, ContextConfig, LogLogger};
use blockkit_exception::{ComponentRegistry, ExceptionConfig, StrategyManager};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not read configuration {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Context(#[from] blockkit_context::Error),

    #[error(transparent)]
    Exception(#[from] blockkit_exception::Error),
}

/// Context and exception configuration, plus the debug switch the standard
/// exception components follow.
///
/// ```json
/// {
///     "debug": false,
///     "context": {"cache_blocks": {"by_class": {"PageBlock": "acme.cache.redis"}}},
///     "exception": {"default_filters": ["keep_all"], "default_renderer": "inline"}
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockkitConfig {
    pub debug: bool,
    pub context: ContextConfig,
    pub exception: ExceptionConfig,
}

impl BlockkitConfig {
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

    /// A context manager over `resolver` that reports settings fallbacks
    /// through the `log` facade.
    pub fn context_manager<R: BlockServiceResolver>(&self, resolver: R) -> BlockContextManager<R> {
        BlockContextManager::from_config(resolver, &self.context).with_logger(Arc::new(LogLogger))
    }

    /// A strategy manager over the standard components in this config's
    /// debug mode.
    pub fn strategy_manager(&self) -> Result<StrategyManager, Error> {
        self.strategy_manager_with(&ComponentRegistry::standard(self.debug))
    }

    pub fn strategy_manager_with(
        &self,
        registry: &ComponentRegistry,
    ) -> Result<StrategyManager, Error> {
        Ok(StrategyManager::from_config(&self.exception, registry)?)
    }
}
