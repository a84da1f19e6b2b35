use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// The size is allowed to be negative. Values built from two corners given in
/// "wrong" order keep their sign; renderers normalize before rasterizing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Integer pixel rectangle anchored at `(x1, y1)` spanning to `(x2, y2)`.
    ///
    /// The origin is `(trunc x1, trunc y1)` and the size is `trunc(x2 - x1)` by
    /// `trunc(y2 - y1)`, with the differences taken before truncation. Corners
    /// are not reordered, so reversed corners yield a negative size.
    #[inline]
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(
            x1.trunc() as f32,
            y1.trunc() as f32,
            (x2 - x1).trunc() as f32,
            (y2 - y1).trunc() as f32,
        )
    }

    /// Integer pixel rectangle: origin and size truncated toward zero.
    #[inline]
    pub fn truncated(self) -> Self {
        Self {
            origin: self.origin.trunc(),
            size: self.size.trunc(),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── from_corners ──────────────────────────────────────────────────────

    #[test]
    fn from_corners_ordered() {
        assert_eq!(Rect::from_corners(10.0, 10.0, 30.0, 40.0), r(10.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn from_corners_reversed_keeps_negative_size() {
        assert_eq!(Rect::from_corners(30.0, 40.0, 10.0, 10.0), r(30.0, 40.0, -20.0, -30.0));
    }

    #[test]
    fn from_corners_truncates_difference_not_corners() {
        assert_eq!(Rect::from_corners(0.9, 0.0, 10.5, 5.5), r(0.0, 0.0, 9.0, 5.0));
    }

    // ── truncated ─────────────────────────────────────────────────────────

    #[test]
    fn truncated_rounds_toward_zero() {
        let t = r(12.9, -3.7, 10.5, -0.5).truncated();
        assert_eq!(t, r(12.0, -3.0, 10.0, -0.0));
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_size() {
        let n = r(30.0, 40.0, -20.0, -30.0).normalized();
        assert_eq!(n, r(10.0, 10.0, 20.0, 30.0));
    }

    // ── is_empty / is_finite ──────────────────────────────────────────────

    #[test]
    fn is_empty_zero_or_negative_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, -1.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn is_finite_rejects_nan() {
        assert!(!r(f32::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(r(0.0, 0.0, 1.0, 1.0).is_finite());
    }
}
