use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::DrawCmd;

/// Unrecoverable presentation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("render surface is unusable: {reason}")]
pub struct PresentError {
    pub reason: String,
}

impl PresentError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Drawing surface driven by the frame driver.
///
/// A frame is `clear`, any number of draws, then `present`.
pub trait Surface {
    /// Starts a new frame filled with `color`.
    fn clear(&mut self, color: Color);

    /// Records a draw command for the current frame.
    fn draw(&mut self, cmd: DrawCmd);

    /// Shows the frame. Must be the last call of a frame.
    fn present(&mut self) -> Result<(), PresentError>;

    /// Releases the window and drawing context. Safe to call more than once.
    fn shutdown(&mut self);

    /// Filled rectangle, truncated to integer pixels.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw(DrawCmd::fill(rect.truncated(), color));
    }

    /// Unfilled outline spanning `(x1, y1)` to `(x2, y2)`.
    ///
    /// Width and height are `trunc(x2 - x1)` and `trunc(y2 - y1)`; reversed
    /// corners give a negative size, passed through as is.
    fn outline_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.draw(DrawCmd::stroke(Rect::from_corners(x1, y1, x2, y2), color));
    }
}
