use crate::coords::Rect;
use crate::paint::Color;

/// Rectangle draw payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Renderer-agnostic draw command.
///
/// Extending the scene:
/// - add a variant here
/// - teach `render::shapes::rect` (or a new renderer) to rasterize it
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawCmd {
    /// Solid rectangle.
    FillRect(RectCmd),
    /// One logical pixel wide rectangle outline.
    StrokeRect(RectCmd),
}

impl DrawCmd {
    #[inline]
    pub fn fill(rect: Rect, color: Color) -> Self {
        DrawCmd::FillRect(RectCmd { rect, color })
    }

    #[inline]
    pub fn stroke(rect: Rect, color: Color) -> Self {
        DrawCmd::StrokeRect(RectCmd { rect, color })
    }
}
