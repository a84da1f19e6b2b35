//! Render surface.
//!
//! Owns the `winit` event loop and window, wires them to the GPU layer and
//! buffers translated input for the frame driver.

mod config;
mod error;
mod surface;

pub use config::WindowConfig;
pub use error::InitError;
pub use surface::PlatformSurface;
