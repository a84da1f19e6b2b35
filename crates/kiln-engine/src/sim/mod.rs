//! Simulation state.
//!
//! A single movable rectangle, shared between the frame driver and the native
//! functions registered with the scripting runtime.

mod player;
mod stage;

pub use player::Player;
pub use stage::{ScriptDraw, SharedStage, Stage};
