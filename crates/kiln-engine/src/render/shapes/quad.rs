//! Unit quad geometry and the viewport uniform shared by instanced shape pipelines.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

/// Corners of the unit square, scaled per instance in the vertex shader.
pub(super) const UNIT_QUAD: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Two counter-clockwise triangles over `UNIT_QUAD`.
pub(super) const UNIT_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const UNIT_QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

pub(super) fn unit_quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &UNIT_QUAD_ATTRS,
    }
}

/// Matches `ViewportUniform` in the WGSL shaders (padded to 16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

impl ViewportUniform {
    pub(super) const BINDING_SIZE: Option<NonZeroU64> =
        NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64);

    /// Never divides by zero in the shader.
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}
