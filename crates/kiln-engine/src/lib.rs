//! Kiln engine crate.
//!
//! Fixed-rate frame driver that runs a Lua script against a single movable
//! rectangle and draws the result through wgpu.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod paint;
pub mod render;
pub mod scene;
pub mod script;
pub mod sim;
pub mod time;
pub mod window;

pub mod logging;

pub use crate::core::{Engine, EngineConfig, EngineError, RunSummary};
