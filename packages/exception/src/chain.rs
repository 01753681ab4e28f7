//! Ordered, short-circuiting filter chains.

use std::sync::Arc;

use blockkit_core::Block;

use crate::fault::Fault;
use crate::{Decision, ExceptionFilter};

/// Filters evaluated in order; the first definitive decision wins.
///
/// When every filter abstains the fault propagates. Put catch-alls such as
/// [`KeepAllFilter`](crate::KeepAllFilter) last so earlier filters can carve
/// out exceptions to them.
#[derive(Clone, Default)]
pub struct ExceptionFilterChain {
    filters: Vec<Arc<dyn ExceptionFilter>>,
}

impl ExceptionFilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter<F: ExceptionFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn push_shared(&mut self, filter: Arc<dyn ExceptionFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The chain's decision; never [`Decision::Abstain`].
    pub fn decide(&self, fault: &Fault, block: &Block) -> Decision {
        match self.handle(fault, block) {
            Decision::Abstain => Decision::NotHandled,
            decision => decision,
        }
    }

    pub fn should_tolerate(&self, fault: &Fault, block: &Block) -> bool {
        self.decide(fault, block).is_handled()
    }
}

/// A chain nested in another chain abstains when none of its filters opine.
impl ExceptionFilter for ExceptionFilterChain {
    fn handle(&self, fault: &Fault, block: &Block) -> Decision {
        self.filters
            .iter()
            .map(|filter| filter.handle(fault, block))
            .find(Decision::is_definitive)
            .unwrap_or(Decision::Abstain)
    }
}
