use winit::dpi::PhysicalSize;

/// Outcome of a failed surface texture acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame can render.
    Reconfigured,
    /// Nothing to draw into this frame.
    SkipFrame,
    /// The surface cannot recover.
    Fatal,
}

impl SurfaceErrorAction {
    pub(crate) fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// First supported sRGB format when preferred, else the surface's first format.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = SRGB_FORMATS
        .into_iter()
        .filter(|_| prefer_srgb)
        .find(|f| caps.formats.contains(f));

    srgb.or_else(|| caps.formats.first().copied())
}

/// The window is opaque, so `Opaque` wins whenever offered.
pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    let opaque = wgpu::CompositeAlphaMode::Opaque;
    if caps.alpha_modes.contains(&opaque) {
        opaque
    } else {
        caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// wgpu rejects zero-area surface configurations (minimized windows).
#[inline]
pub(crate) fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(
        formats: Vec<wgpu::TextureFormat>,
        alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes,
            ..Default::default()
        }
    }

    #[test]
    fn srgb_format_preferred_when_available() {
        let c = caps(
            vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8UnormSrgb],
            vec![],
        );
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&caps(vec![], vec![]), true), None);
    }

    #[test]
    fn opaque_alpha_wins() {
        let c = caps(
            vec![],
            vec![wgpu::CompositeAlphaMode::PreMultiplied, wgpu::CompositeAlphaMode::Opaque],
        );
        assert_eq!(choose_alpha_mode(&c), wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(choose_alpha_mode(&caps(vec![], vec![])), wgpu::CompositeAlphaMode::Auto);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        use wgpu::SurfaceError;

        let action = |err| SurfaceErrorAction::for_error(&err);
        assert_eq!(action(SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
        assert_eq!(action(SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(action(SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
    }

    #[test]
    fn zero_area_is_not_drawable() {
        assert!(!is_drawable(PhysicalSize::new(0, 600)));
        assert!(is_drawable(PhysicalSize::new(800, 600)));
    }
}
