//! Scripting bridge.
//!
//! Owns the Lua runtime, exposes the native functions scripts may call and
//! invokes the optional per-frame callbacks defined by the loaded script.
//!
//! Natives visible to scripts:
//! - `set_player_pos(x, y)`
//! - `render_rect(x1, y1, x2, y2)`
//!
//! Callbacks looked up by name each frame:
//! - `update(dt)`
//! - `make_rect(x, y, w, h)`

mod bridge;
mod error;
mod host;

pub use bridge::NATIVES;
pub use error::{ArgumentError, ScriptError};
pub use host::{CallOutcome, ScriptHost, DEFAULT_SCRIPT_PATH};
