//! Geometry shared by the surface, the renderer and the scripting bridge.
//!
//! All values are logical pixels with the origin at the window's top-left
//! corner and +Y pointing down.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
