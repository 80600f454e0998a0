//! Fixed-step clock and render-pose interpolation.
//!
//! Simulation advances in whole ticks of [`TICK_INTERVAL`]; presentation blends the two most
//! recent resolved poses by how far wall-clock time has progressed into the next tick.
//!
//! ```rust,ignore
//! let pose = driver.frame(frame_time, || {
//!     controller.tick(&world, &input, &true);
//!     controller.resolved_poses()
//! });
//! ```

use std::time::Duration;

use log::warn;

use crate::{
    collision::Point2,
    constants::{MAX_CATCH_UP_TICKS, TICK_INTERVAL},
};

/// Accumulates wall-clock time and hands out whole simulation ticks.
#[derive(Clone, Debug)]
pub struct FixedTicker {
    interval: Duration,
    accumulator: Duration,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            accumulator: Duration::ZERO,
        }
    }

    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return how many ticks are due, at most [`MAX_CATCH_UP_TICKS`].
    ///
    /// Whole ticks beyond the cap are discarded; the fractional remainder is kept.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.interval && due < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.interval;
            due += 1;
        }

        if self.accumulator >= self.interval {
            let interval = self.interval.as_nanos();
            let pending = self.accumulator.as_nanos();
            warn!(
                "simulation fell behind, dropping {} ticks",
                pending / interval
            );
            self.accumulator = Duration::from_nanos((pending % interval) as u64);
        }
        due
    }

    /// Progress toward the next tick, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.interval.as_secs_f64()) as f32
    }
}

/// The two most recent resolved poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseInterpolator {
    previous: Point2,
    current: Point2,
}

impl PoseInterpolator {
    pub fn new(pose: Point2) -> Self {
        Self {
            previous: pose,
            current: pose,
        }
    }

    /// Record the `(previous, current)` pair of a finished tick.
    ///
    /// The pair comes from the simulation, so a snap there (both equal) is never blended away.
    pub fn set(&mut self, (previous, current): (Point2, Point2)) {
        self.previous = previous;
        self.current = current;
    }

    pub fn sample(&self, alpha: f32) -> Point2 {
        self.previous + (self.current - self.previous) * alpha.clamp(0.0, 1.0)
    }
}

/// Couples a [`FixedTicker`] with a [`PoseInterpolator`].
#[derive(Clone, Debug)]
pub struct TickDriver {
    pub ticker: FixedTicker,
    pub poses: PoseInterpolator,
    ticks: u64,
}

impl TickDriver {
    pub fn new(ticker: FixedTicker, spawn: Point2) -> Self {
        Self {
            ticker,
            poses: PoseInterpolator::new(spawn),
            ticks: 0,
        }
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run every due tick through `step` and return the interpolated pose for this frame.
    ///
    /// `step` returns the tick's `(previous, current)` resolved positions.
    pub fn frame(
        &mut self,
        elapsed: Duration,
        mut step: impl FnMut() -> (Point2, Point2),
    ) -> Point2 {
        for _ in 0..self.ticker.advance(elapsed) {
            self.poses.set(step());
            self.ticks += 1;
        }
        self.poses.sample(self.ticker.alpha())
    }
}
