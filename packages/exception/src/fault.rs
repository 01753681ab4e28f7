//! Matching rendering faults by error type.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;

/// A rendering fault as seen by filters and renderers.
pub type Fault = dyn StdError + 'static;

/// Whether `fault`, or any error in its `source()` chain, is an `E`.
///
/// Wrapping errors that expose their cause through `source()` therefore
/// match the type they wrap.
pub fn is_fault<E: StdError + 'static>(fault: &Fault) -> bool {
    std::iter::successors(Some(fault), |&err| err.source()).any(|err| err.is::<E>())
}

/// The messages of `fault` and each of its sources, outermost first.
pub fn fault_chain(fault: &Fault) -> Vec<String> {
    std::iter::successors(Some(fault), |&err| err.source())
        .map(ToString::to_string)
        .collect()
}

/// A concrete error type that filters match faults against.
#[derive(Clone, Copy)]
pub struct FaultClass {
    name: &'static str,
    matcher: fn(&Fault) -> bool,
}

impl FaultClass {
    pub fn of<E: StdError + 'static>() -> Self {
        Self {
            name: type_name::<E>(),
            matcher: is_fault::<E>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, fault: &Fault) -> bool {
        (self.matcher)(fault)
    }
}

impl fmt::Debug for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaultClass").field(&self.name).finish()
    }
}
