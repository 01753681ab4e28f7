/// What a filter thinks of a rendering fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Tolerate the fault; render a placeholder in the block's place.
    Handled,
    /// Let the fault propagate to the page.
    NotHandled,
    /// No opinion; the next filter in the chain decides.
    Abstain,
}

impl Decision {
    /// `true` for [`Handled`](Self::Handled) and [`NotHandled`](Self::NotHandled).
    pub fn is_definitive(&self) -> bool {
        !matches!(self, Decision::Abstain)
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Decision::Handled)
    }
}

impl From<bool> for Decision {
    fn from(handled: bool) -> Self {
        if handled {
            Decision::Handled
        } else {
            Decision::NotHandled
        }
    }
}
