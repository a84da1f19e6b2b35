/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::palette;

    #[test]
    fn palette_is_opaque() {
        for c in [palette::BACKGROUND, palette::FOREGROUND, palette::ACCENT] {
            assert_eq!(c.a, 1.0);
            assert_eq!(c.to_wgpu().a, 1.0);
        }
    }

    #[test]
    fn accent_is_magenta() {
        assert_eq!(palette::ACCENT.to_array(), [1.0, 0.0, 1.0, 1.0]);
    }
}
