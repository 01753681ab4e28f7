//! Per-block-type fault handling: which chain decides, which renderer
//! substitutes.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;

use blockkit_core::Block;

use crate::fault::Fault;
use crate::{
    DebugOnlyFilter, Error, ExceptionConfig, ExceptionFilter, ExceptionFilterChain, FaultRenderer,
    InlineDebugRenderer, InlineRenderer, KeepAllFilter, KeepNoneFilter, MonkeyThrowRenderer,
    Placeholder,
};

pub const DEBUG_ONLY_FILTER: &str = "debug_only";
pub const KEEP_ALL_FILTER: &str = "keep_all";
pub const KEEP_NONE_FILTER: &str = "keep_none";
pub const INLINE_RENDERER: &str = "inline";
pub const INLINE_DEBUG_RENDERER: &str = "inline_debug";
pub const THROW_RENDERER: &str = "throw";

/// Named filters and renderers that configuration refers to.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    filters: BTreeMap<String, Arc<dyn ExceptionFilter>>,
    renderers: BTreeMap<String, Arc<dyn FaultRenderer>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard filters (`debug_only`, `keep_all`, `keep_none`) and
    /// renderers (`inline`, `inline_debug`, `throw`).
    pub fn standard(debug: bool) -> Self {
        let mut registry = Self::new();
        registry
            .add_filter(DEBUG_ONLY_FILTER, DebugOnlyFilter::new(debug))
            .add_filter(KEEP_ALL_FILTER, KeepAllFilter)
            .add_filter(KEEP_NONE_FILTER, KeepNoneFilter)
            .add_renderer(INLINE_RENDERER, InlineRenderer::default())
            .add_renderer(INLINE_DEBUG_RENDERER, InlineDebugRenderer::new(debug))
            .add_renderer(THROW_RENDERER, MonkeyThrowRenderer);
        registry
    }

    pub fn add_filter<F: ExceptionFilter + 'static>(
        &mut self,
        name: impl Into<String>,
        filter: F,
    ) -> &mut Self {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }

    pub fn add_renderer<R: FaultRenderer + 'static>(
        &mut self,
        name: impl Into<String>,
        renderer: R,
    ) -> &mut Self {
        self.renderers.insert(name.into(), Arc::new(renderer));
        self
    }

    pub fn filter(&self, name: &str) -> Result<Arc<dyn ExceptionFilter>, Error> {
        self.filters
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownFilter {
                name: name.to_string(),
            })
    }

    pub fn renderer(&self, name: &str) -> Result<Arc<dyn FaultRenderer>, Error> {
        self.renderers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownRenderer {
                name: name.to_string(),
            })
    }

    /// Build a chain from filter names, in order.
    pub fn chain(&self, names: &[String]) -> Result<ExceptionFilterChain, Error> {
        let mut chain = ExceptionFilterChain::new();
        for name in names {
            chain.push_shared(self.filter(name)?);
        }
        Ok(chain)
    }
}

/// Decides, per block type, whether a rendering fault is tolerated and what
/// replaces the block when it is.
///
/// Holds no per-render state; one manager serves every render attempt.
pub struct StrategyManager {
    default_filter: ExceptionFilterChain,
    default_renderer: Arc<dyn FaultRenderer>,
    block_filters: BTreeMap<String, ExceptionFilterChain>,
    block_renderers: BTreeMap<String, Arc<dyn FaultRenderer>>,
}

impl StrategyManager {
    pub fn new(
        default_filter: ExceptionFilterChain,
        default_renderer: Arc<dyn FaultRenderer>,
    ) -> Self {
        Self {
            default_filter,
            default_renderer,
            block_filters: BTreeMap::new(),
            block_renderers: BTreeMap::new(),
        }
    }

    /// Resolve every name in `config` against `registry`.
    ///
    /// Fails on the first name the registry does not know.
    pub fn from_config(
        config: &ExceptionConfig,
        registry: &ComponentRegistry,
    ) -> Result<Self, Error> {
        let mut manager = Self::new(
            registry.chain(&config.default_filters)?,
            registry.renderer(&config.default_renderer)?,
        );
        for (block_type, names) in &config.block_filters {
            manager
                .block_filters
                .insert(block_type.clone(), registry.chain(names)?);
        }
        for (block_type, name) in &config.block_renderers {
            manager
                .block_renderers
                .insert(block_type.clone(), registry.renderer(name)?);
        }
        Ok(manager)
    }

    pub fn with_block_filter(
        mut self,
        block_type: impl Into<String>,
        chain: ExceptionFilterChain,
    ) -> Self {
        self.block_filters.insert(block_type.into(), chain);
        self
    }

    pub fn with_block_renderer(
        mut self,
        block_type: impl Into<String>,
        renderer: Arc<dyn FaultRenderer>,
    ) -> Self {
        self.block_renderers.insert(block_type.into(), renderer);
        self
    }

    pub fn filter_for(&self, block: &Block) -> &ExceptionFilterChain {
        self.block_filters
            .get(block.block_type())
            .unwrap_or(&self.default_filter)
    }

    pub fn renderer_for(&self, block: &Block) -> &dyn FaultRenderer {
        self.block_renderers
            .get(block.block_type())
            .unwrap_or(&self.default_renderer)
            .as_ref()
    }

    pub fn should_tolerate(&self, fault: &Fault, block: &Block) -> bool {
        self.filter_for(block).should_tolerate(fault, block)
    }

    /// The placeholder to render instead of `block`, or `None` when the
    /// fault must propagate.
    pub fn substitute(&self, fault: &Fault, block: &Block) -> Option<Placeholder> {
        if !self.should_tolerate(fault, block) {
            log::debug!(
                "block {} ({}) fault not tolerated: {}",
                block.identity(),
                block.block_type(),
                fault
            );
            return None;
        }

        let placeholder = self.renderer_for(block).render(fault, block);
        if placeholder.is_some() {
            log::warn!(
                "block {} ({}) failed to render, substituting placeholder: {}",
                block.identity(),
                block.block_type(),
                fault
            );
        }
        placeholder
    }

    /// Handle an owned fault: `Ok` with the placeholder when substituted,
    /// `Err` with the original fault when it propagates.
    pub fn handle<E: StdError + 'static>(
        &self,
        fault: E,
        block: &Block,
    ) -> Result<Placeholder, E> {
        match self.substitute(&fault, block) {
            Some(placeholder) => Ok(placeholder),
            None => Err(fault),
        }
    }
}
