//! Core engine contracts and the frame driver.
//!
//! This module defines the seams between the frame driver and the platform
//! (`Surface`, `input::EventSource`, `time::Clock`), the engine configuration
//! and error types, and the startup sequence in [`Engine::run`].

mod app;
mod config;
mod driver;
mod engine;
mod error;
mod surface;

pub use app::{AppControl, RunState};
pub use config::{CallbackErrorPolicy, ConfigError, EngineConfig, DEFAULT_FPS};
pub use driver::{FrameDriver, RunSummary, MAKE_RECT_ARGS};
pub use engine::Engine;
pub use error::EngineError;
pub use surface::{PresentError, Surface};
