//! Input capabilities consumed by the controller.
//!
//! The controller never talks to devices. It samples an [`InputSource`] once at the start of a
//! tick and applies the [`PayloadGate`]: a character without a controllable payload still
//! simulates but cannot be steered.

use crate::motion::RunInput;

/// Reports whether the directional actions are currently held.
pub trait InputSource {
    fn is_left_held(&self) -> bool;
    fn is_right_held(&self) -> bool;
}

/// Reports whether the character currently carries something it can be steered by.
pub trait PayloadGate {
    fn has_controllable_payload(&self) -> bool;
}

impl PayloadGate for bool {
    #[inline]
    fn has_controllable_payload(&self) -> bool {
        *self
    }
}

/// A fixed snapshot of held directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
}

impl InputSource for HeldDirections {
    #[inline]
    fn is_left_held(&self) -> bool {
        self.left
    }

    #[inline]
    fn is_right_held(&self) -> bool {
        self.right
    }
}

/// Sample the input for one tick, forcing both directions off when the gate is closed.
pub fn sample_run_input(source: &impl InputSource, gate: &impl PayloadGate) -> RunInput {
    if !gate.has_controllable_payload() {
        return RunInput::default();
    }

    RunInput {
        left: source.is_left_held(),
        right: source.is_right_held(),
    }
}
