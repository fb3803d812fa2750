//! Messages exchanged between a number box and its host.

use numbox_core::Number;

/// Who caused a value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// Keystrokes, paste, stepping, reset, focus normalisation
    User,
    /// Values pushed in through the declared setters
    Host,
}

/// Outcome of an inbound operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The operation was applied (or had nothing to do)
    Accepted,
    /// The operation was refused and nothing changed
    Rejected,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

/// Outbound events, drained by the host after each call.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The surface text changed; carries the new text
    Render(String),
    /// The committed value differs from the previous one
    ValueChanged {
        old: Option<Number>,
        new: Option<Number>,
        source: UpdateSource,
    },
    CanStepUpChanged(bool),
    CanStepDownChanged(bool),
    /// The host should select the whole text once it has rendered
    RequestSelectAll,
}
