use std::time::{Duration, Instant};

use super::{Clock, SystemClock};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame timestamp, in seconds.
    pub dt: f64,

    /// Monotonic timestamp recorded for this frame.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// How the pacer blocks until the frame budget has elapsed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WaitStrategy {
    /// Sleep for the remaining budget, re-checking until the deadline passed.
    #[default]
    Sleep,
    /// Busy-wait on the clock. Burns a core; only useful for timing experiments.
    Spin,
}

/// Fixed-rate frame pacer.
///
/// `wait_next` never returns before `budget` has elapsed since the previous
/// frame timestamp, so consecutive timestamps are at least one budget apart and
/// `dt` is never below `budget`. There is no upper clamp: a stalled frame
/// reports the full elapsed time.
#[derive(Debug, Clone)]
pub struct FramePacer<C = SystemClock> {
    clock: C,
    budget: Duration,
    strategy: WaitStrategy,
    last: Instant,
    frame_index: u64,
}

impl FramePacer<SystemClock> {
    /// Creates a wall-clock pacer for `fps` frames per second.
    pub fn with_fps(fps: u32, strategy: WaitStrategy) -> Self {
        Self::new(SystemClock, fps, strategy)
    }
}

impl<C: Clock> FramePacer<C> {
    /// Creates a pacer whose budget is `1000 / fps` whole milliseconds.
    ///
    /// `fps` of zero is treated as one.
    pub fn new(clock: C, fps: u32, strategy: WaitStrategy) -> Self {
        let last = clock.now();
        Self {
            clock,
            budget: Self::budget_for(fps),
            strategy,
            last,
            frame_index: 0,
        }
    }

    /// Per-frame budget for `fps`, truncated to whole milliseconds (30 fps → 33 ms).
    pub fn budget_for(fps: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(fps.max(1)))
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Resets the baseline timestamp to "now".
    ///
    /// Called when the loop starts so startup work does not count as frame time.
    pub fn reset(&mut self) {
        self.last = self.clock.now();
    }

    /// Blocks until the budget elapsed since the previous timestamp, then records
    /// and returns the new one.
    pub fn wait_next(&mut self) -> FrameTime {
        let deadline = self.last + self.budget;

        loop {
            let now = self.clock.now();
            if now >= deadline {
                break;
            }
            match self.strategy {
                WaitStrategy::Sleep => self.clock.sleep(deadline - now),
                WaitStrategy::Spin => self.clock.spin(),
            }
        }

        let now = self.clock.now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
