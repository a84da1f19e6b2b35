use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Fixed size in logical pixels.
    pub size: LogicalSize<f64>,
    pub borderless: bool,
    /// Center on the primary monitor when the platform allows positioning.
    pub centered: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "kiln".to_string(),
            size: LogicalSize::new(800.0, 600.0),
            borderless: true,
            centered: true,
        }
    }
}

/// Top-left position that centers `window` inside a monitor.
pub(crate) fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let dx = (i64::from(monitor_size.width) - i64::from(window.width)) / 2;
    let dy = (i64::from(monitor_size.height) - i64::from(window.height)) / 2;
    PhysicalPosition::new(monitor_origin.x + dx as i32, monitor_origin.y + dy as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fixed_borderless_800x600() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.size, LogicalSize::new(800.0, 600.0));
        assert!(cfg.borderless);
        assert!(cfg.centered);
    }

    #[test]
    fn centers_inside_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn centers_on_offset_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(2160, 12));
    }

    #[test]
    fn window_larger_than_monitor_goes_negative() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(640, 480),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(-80, -60));
    }
}
