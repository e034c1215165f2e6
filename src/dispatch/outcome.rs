//! Dispatch results.

use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;

/// Numeric result of a handler.
///
/// Zero means "not handled, let the engine apply its default behavior";
/// anything else means handled. Dispatch never interprets non-zero codes
/// beyond that; their meaning belongs to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome(pub u32);

impl Outcome {
    pub const NOT_HANDLED: Outcome = Outcome(0);
    pub const HANDLED: Outcome = Outcome(1);

    /// Create an outcome from a raw code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Get the raw code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_handled(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for Outcome {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Outcome({})", self.0)
    }
}

/// Result of a step, item-move or de-equip dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// First non-zero handler outcome, or the built-in default.
    pub outcome: Outcome,

    /// Handlers invoked, including ones that failed.
    pub fired: usize,

    /// Handlers that returned a script error.
    pub faults: usize,
}

impl MoveOutcome {
    /// Whether no event matched and the built-in default decided.
    #[must_use]
    pub fn used_default(&self) -> bool {
        self.fired == 0
    }

    /// Fold one handler outcome in, keeping the first non-zero one.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        if !self.outcome.is_handled() {
            self.outcome = outcome;
        }
    }
}

/// Result of an equip dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipOutcome {
    pub eligibility: Eligibility,

    /// Handler outcome; `NOT_HANDLED` when the handler did not run.
    pub outcome: Outcome,

    /// Whether a handler ran.
    pub fired: bool,

    /// Whether the handler returned a script error.
    pub faulted: bool,
}

impl EquipOutcome {
    pub(crate) fn without_handler(eligibility: Eligibility) -> Self {
        Self {
            eligibility,
            outcome: Outcome::NOT_HANDLED,
            fired: false,
            faulted: false,
        }
    }

    /// Shorthand for `eligibility.is_eligible()`.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible()
    }
}
