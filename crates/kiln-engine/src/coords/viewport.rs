/// Drawable area in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False for minimized windows or garbage sizes; nothing is drawn then.
    #[inline]
    pub fn is_valid(self) -> bool {
        [self.width, self.height].iter().all(|v| v.is_finite() && *v > 0.0)
    }
}
