//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window layer translates platform events into `InputEvent`s and buffers
//! them; the `InputPoller` consumes them once per frame and turns them into
//! control signals.

pub(crate) mod platform;
mod poller;
mod types;

pub use poller::{ControlSignal, EventPolicy, EventSource, InputPoller};
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerMoveEvent};
