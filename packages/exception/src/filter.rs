//! Exception filters: per-fault, per-block tolerance policies.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use blockkit_core::Block;

use crate::fault::{Fault, FaultClass};
use crate::Decision;

/// Decides whether a fault raised while rendering `block` is tolerable.
///
/// Filters must be deterministic and stateless: the same fault type and
/// block type always yield the same decision.
pub trait ExceptionFilter: Send + Sync {
    fn handle(&self, fault: &Fault, block: &Block) -> Decision;
}

impl<T: ExceptionFilter + ?Sized> ExceptionFilter for Box<T> {
    fn handle(&self, fault: &Fault, block: &Block) -> Decision {
        self.as_ref().handle(fault, block)
    }
}

/// Tolerates every fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepAllFilter;

impl ExceptionFilter for KeepAllFilter {
    fn handle(&self, _fault: &Fault, _block: &Block) -> Decision {
        Decision::Handled
    }
}

/// Tolerates nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepNoneFilter;

impl ExceptionFilter for KeepNoneFilter {
    fn handle(&self, _fault: &Fault, _block: &Block) -> Decision {
        Decision::NotHandled
    }
}

/// Tolerates faults only in debug mode, so they surface on the page during
/// development instead of aborting it.
#[derive(Debug, Clone, Copy)]
pub struct DebugOnlyFilter {
    debug: bool,
}

impl DebugOnlyFilter {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl ExceptionFilter for DebugOnlyFilter {
    fn handle(&self, _fault: &Fault, _block: &Block) -> Decision {
        Decision::from(self.debug)
    }
}

/// Lets faults of one error type propagate and tolerates everything else.
#[derive(Debug, Clone, Copy)]
pub struct IgnoreClassFilter {
    class: FaultClass,
}

impl IgnoreClassFilter {
    pub fn new<E: StdError + 'static>() -> Self {
        Self {
            class: FaultClass::of::<E>(),
        }
    }

    pub fn class(&self) -> &FaultClass {
        &self.class
    }
}

impl ExceptionFilter for IgnoreClassFilter {
    fn handle(&self, fault: &Fault, _block: &Block) -> Decision {
        Decision::from(!self.class.matches(fault))
    }
}

/// Gives a fixed decision for faults of one error type; abstains otherwise.
///
/// Put it ahead of a catch-all to carve out an exception to it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTypeFilter {
    class: FaultClass,
    decision: Decision,
}

impl ErrorTypeFilter {
    pub fn new<E: StdError + 'static>(decision: Decision) -> Self {
        Self {
            class: FaultClass::of::<E>(),
            decision,
        }
    }
}

impl ExceptionFilter for ErrorTypeFilter {
    fn handle(&self, fault: &Fault, _block: &Block) -> Decision {
        if self.class.matches(fault) {
            self.decision
        } else {
            Decision::Abstain
        }
    }
}

/// Gives a fixed decision for blocks of the listed types; abstains otherwise.
#[derive(Debug, Clone)]
pub struct BlockTypeFilter {
    types: BTreeSet<String>,
    decision: Decision,
}

impl BlockTypeFilter {
    pub fn new<I, S>(types: I, decision: Decision) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            decision,
        }
    }
}

impl ExceptionFilter for BlockTypeFilter {
    fn handle(&self, _fault: &Fault, block: &Block) -> Decision {
        if self.types.contains(block.block_type()) {
            self.decision
        } else {
            Decision::Abstain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::tests::{RenderFailed, TemplateMissing};

    fn block() -> Block {
        Block::new("blockkit.block.rss")
    }

    #[test]
    fn keep_all_handles_any_fault() {
        let filter = KeepAllFilter;
        let io = std::io::Error::new(std::io::ErrorKind::Other, "feed unreachable");
        let wrapped = RenderFailed(TemplateMissing);
        let faults: Vec<&Fault> = vec![&io, &TemplateMissing, &wrapped];

        for fault in faults {
            assert_eq!(filter.handle(fault, &block()), Decision::Handled);
            assert_eq!(
                filter.handle(fault, &Block::new("blockkit.block.text").with_id("1")),
                Decision::Handled
            );
        }
    }

    #[test]
    fn keep_none_handles_nothing() {
        assert_eq!(
            KeepNoneFilter.handle(&TemplateMissing, &block()),
            Decision::NotHandled
        );
    }

    #[test]
    fn debug_only_follows_mode() {
        assert_eq!(
            DebugOnlyFilter::new(true).handle(&TemplateMissing, &block()),
            Decision::Handled
        );
        assert_eq!(
            DebugOnlyFilter::new(false).handle(&TemplateMissing, &block()),
            Decision::NotHandled
        );
    }

    #[test]
    fn ignore_class_propagates_matching_faults() {
        let filter = IgnoreClassFilter::new::<TemplateMissing>();
        assert_eq!(
            filter.handle(&RenderFailed(TemplateMissing), &block()),
            Decision::NotHandled
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(filter.handle(&io, &block()), Decision::Handled);
    }

    #[test]
    fn error_type_filter_abstains_on_other_types() {
        let filter = ErrorTypeFilter::new::<std::io::Error>(Decision::Handled);
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow feed");
        assert_eq!(filter.handle(&io, &block()), Decision::Handled);
        assert_eq!(filter.handle(&TemplateMissing, &block()), Decision::Abstain);
    }

    #[test]
    fn block_type_filter_abstains_on_other_blocks() {
        let filter = BlockTypeFilter::new(["blockkit.block.rss"], Decision::Handled);
        assert_eq!(filter.handle(&TemplateMissing, &block()), Decision::Handled);
        assert_eq!(
            filter.handle(&TemplateMissing, &Block::new("blockkit.block.text")),
            Decision::Abstain
        );
    }
}
