//! Paint model shared between the frame driver and renderers.
//!
//! Colors are linear premultiplied RGBA. Geometry types remain in `coords`.

pub mod color;

pub use color::Color;

/// Fixed palette used by the frame driver and the scripting bridge.
pub mod palette {
    use super::Color;

    /// Surface clear color.
    pub const BACKGROUND: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

    /// Fill color of the player rectangle.
    pub const FOREGROUND: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Outline color used by `render_rect`.
    pub const ACCENT: Color = Color::from_premul(1.0, 0.0, 1.0, 1.0);
}
