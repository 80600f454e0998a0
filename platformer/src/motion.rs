//! Per-tick velocity models.
//!
//! Both models are pure state updates: they only read constants and the given
//! velocity/flags, and never touch geometry. Collision happens afterwards in the
//! resolver (or in the rider while attached).

use crate::constants::{AIR_DECEL, GRAVITY, MAX_FALL, MAX_RUN, RUN_ACCEL, RUN_DECEL};

/// Rounding slack: a residual speed this close to the friction step snaps to zero.
const SPEED_EPS: f32 = 1.0e-6;

/// Directional input for one tick, after the payload gate has been applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunInput {
    pub left: bool,
    pub right: bool,
}

/// Result of [`advance_run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStep {
    pub vx: f32,
    /// New facing, or `None` to keep the current one.
    pub facing_right: Option<bool>,
}

/// Advance horizontal velocity by one tick.
///
/// - Left wins when both directions are held.
/// - Reversing direction brakes with `RUN_DECEL`, otherwise accelerates with `RUN_ACCEL`,
///   clamped to `MAX_RUN`.
/// - With no input, speed bleeds toward zero by `RUN_DECEL` when `grounded` (attached) or
///   `AIR_DECEL` when airborne, landing exactly on zero instead of crossing it.
pub fn advance_run(vx: f32, input: RunInput, grounded: bool) -> RunStep {
    if input.left {
        let vx = vx - if vx > 0.0 { RUN_DECEL } else { RUN_ACCEL };
        RunStep {
            vx: vx.max(-MAX_RUN),
            facing_right: Some(false),
        }
    } else if input.right {
        let vx = vx + if vx < 0.0 { RUN_DECEL } else { RUN_ACCEL };
        RunStep {
            vx: vx.min(MAX_RUN),
            facing_right: Some(true),
        }
    } else {
        let decel = if grounded { RUN_DECEL } else { AIR_DECEL };
        RunStep {
            vx: approach_zero(vx, decel),
            facing_right: None,
        }
    }
}

#[inline]
fn approach_zero(v: f32, step: f32) -> f32 {
    if v > step + SPEED_EPS {
        v - step
    } else if v < -step - SPEED_EPS {
        v + step
    } else {
        0.0
    }
}

/// Apply one tick of gravity and clamp to the terminal fall speed.
#[inline]
pub fn advance_fall(vy: f32) -> f32 {
    (vy - GRAVITY).max(-MAX_FALL)
}
