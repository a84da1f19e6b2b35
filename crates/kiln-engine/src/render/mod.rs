//! wgpu rendering of scene draw streams.
//!
//! Geometry arrives in logical pixels with a top-left origin; shaders map it
//! to clip space through a viewport uniform. Renderers create their GPU
//! resources lazily on first use.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
