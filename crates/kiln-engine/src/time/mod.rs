//! Time subsystem.
//!
//! Provides fixed-rate frame pacing without coupling to the runtime.
//! Intended usage:
//! - one `FramePacer` per frame loop
//! - call `wait_next()` once per frame to block until the frame budget elapsed
//!   and obtain the `FrameTime` handed to the update callback

mod clock;
mod pacer;

pub use clock::{Clock, SystemClock};
pub use pacer::{FramePacer, FrameTime, WaitStrategy};

#[cfg(test)]
pub(crate) use clock::ManualClock;
