//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - preserve issue order (later commands paint over earlier ones)

mod cmd;
mod list;

pub use cmd::{DrawCmd, RectCmd};
pub use list::DrawList;
