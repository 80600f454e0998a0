use std::time::Duration;

/// Ratio between the tuning space the movement numbers were authored in and world units.
///
/// Every distance-per-tick constant below is expressed as a multiple of this ratio.
pub const MOVEMENT_SCALE: f32 = 0.62 / 17.6;

/// Top horizontal speed under active input (units/tick).
pub const MAX_RUN: f32 = 12.0 * MOVEMENT_SCALE;

/// Per-tick speed change when input opposes the current direction, and ground friction.
pub const RUN_DECEL: f32 = 4.0 * MOVEMENT_SCALE;

/// Per-tick speed gain when input agrees with the current direction.
pub const RUN_ACCEL: f32 = 1.0 * MOVEMENT_SCALE;

/// Per-tick friction applied while airborne with no input.
pub const AIR_DECEL: f32 = 1.0 * MOVEMENT_SCALE;

/// Downward speed added every tick (units/tick²).
pub const GRAVITY: f32 = 2.0 * MOVEMENT_SCALE;

/// Terminal fall speed magnitude (units/tick).
pub const MAX_FALL: f32 = 16.0 * MOVEMENT_SCALE;

/// Jump impulse magnitude (units/tick).
///
/// Not wired to any input yet.
pub const JUMP: f32 = 16.0 * MOVEMENT_SCALE;

/// Length of the jump ascent window in ticks.
pub const JUMP_FRAMES: i32 = 8;

/// Gravity applied once the jump ascent window has elapsed.
pub const JUMP_END_GRAVITY: f32 = 3.0 * MOVEMENT_SCALE;

/// Jump grace counter value held while the character is attached to a surface.
pub const CAN_JUMP_GRACE_TICKS: i32 = 3;

/// Ticks during which a freshly detached character may not attach again.
pub const CANT_SNAP_TICKS: u32 = 2;

/// Fixed simulation rate.
pub const TICK_HZ: u64 = 50;

/// Duration of one simulation tick.
pub const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / TICK_HZ);

/// Upper bound on the ticks a single frame may run to catch up after a stall.
pub const MAX_CATCH_UP_TICKS: u32 = 8;
