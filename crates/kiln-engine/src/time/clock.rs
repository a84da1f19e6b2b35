use std::time::{Duration, Instant};

/// Monotonic time source used by the frame pacer.
///
/// The seam exists so frame timing can be driven deterministically in tests.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Blocks the calling thread for at least `duration`.
    fn sleep(&self, duration: Duration);

    /// Single iteration of a busy-wait.
    fn spin(&self) {
        std::hint::spin_loop();
    }
}

/// Wall clock backed by `Instant::now` and `thread::sleep`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when slept on (or spun).
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Instant>>,
    spin_step: Duration,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
            spin_step: Duration::from_micros(250),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }

    fn spin(&self) {
        self.advance(self.spin_step);
    }
}
