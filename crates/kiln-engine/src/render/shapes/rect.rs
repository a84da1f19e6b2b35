use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::quad::{unit_quad_layout, ViewportUniform, UNIT_QUAD, UNIT_QUAD_INDICES};

/// Outline thickness in logical pixels.
const STROKE_WIDTH: f32 = 1.0;

/// Smallest instance buffer ever allocated, in instances.
const MIN_INSTANCE_CAPACITY: usize = 64;

/// Draws filled rectangles and 1-px outlines with one instanced pipeline.
///
/// Outlines are expanded on the CPU into four edge quads, so every command is
/// a list of axis-aligned quads by the time it reaches the GPU.
#[derive(Default)]
pub struct RectRenderer {
    pipeline: Option<RectPipeline>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    // Reused across frames.
    instances: Vec<RectInstance>,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every command in `draw_list` into `target`, in issue order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        if !ctx.viewport.is_valid() {
            return;
        }

        self.instances.clear();
        for cmd in draw_list.items() {
            push_instances(cmd, &mut self.instances);
        }
        if self.instances.is_empty() {
            return;
        }

        if self.pipeline.as_ref().map(|p| p.format) != Some(ctx.surface_format) {
            self.pipeline = Some(RectPipeline::new(ctx));
        }
        self.reserve_instances(ctx);

        let (Some(pipeline), Some(instance_vbo)) =
            (self.pipeline.as_ref(), self.instance_vbo.as_ref())
        else {
            return;
        };

        let viewport = ViewportUniform::new(ctx.viewport);
        ctx.queue.write_buffer(&pipeline.viewport_ubo, 0, bytemuck::bytes_of(&viewport));
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kiln rect pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, &pipeline.bind_group, &[]);
        rpass.set_vertex_buffer(0, pipeline.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(pipeline.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..UNIT_QUAD_INDICES.len() as u32, 0, 0..self.instances.len() as u32);
    }

    /// Grows the instance buffer to fit `self.instances`, in powers of two.
    fn reserve_instances(&mut self, ctx: &RenderCtx<'_>) {
        let required = self.instances.len();
        if self.instance_vbo.is_some() && required <= self.instance_capacity {
            return;
        }

        let capacity = required.next_power_of_two().max(MIN_INSTANCE_CAPACITY);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln rect instances"),
            size: (capacity * std::mem::size_of::<RectInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = capacity;
    }
}

/// GPU objects that depend only on the surface format.
struct RectPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl RectPipeline {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kiln rect bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: ViewportUniform::BINDING_SIZE,
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kiln rect pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kiln rect pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[unit_quad_layout(), RectInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln rect viewport"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln rect bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiln unit quad"),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiln unit quad indices"),
            contents: bytemuck::cast_slice(&UNIT_QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("rect pipeline built for {:?}", ctx.surface_format);

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
        }
    }
}

/// Expands one draw command into GPU instances.
fn push_instances(cmd: &DrawCmd, out: &mut Vec<RectInstance>) {
    match cmd {
        DrawCmd::FillRect(c) => {
            let r = c.rect.normalized();
            if r.is_finite() && !r.is_empty() {
                out.push(RectInstance::new(r, c.color.to_array()));
            }
        }
        DrawCmd::StrokeRect(c) => {
            let color = c.color.to_array();
            if let Some(edges) = outline_edges(c.rect) {
                out.extend(edges.into_iter().map(|e| RectInstance::new(e, color)));
            }
        }
    }
}

/// Splits an outline into top, bottom, left and right edge rectangles.
///
/// The outline covers the pixels on the inner border of the normalized rect,
/// so a 20x30 outline spans exactly 20x30 pixels. Returns `None` for empty or
/// non-finite rects.
pub(crate) fn outline_edges(rect: Rect) -> Option<[Rect; 4]> {
    let r = rect.normalized();
    if !r.is_finite() || r.is_empty() {
        return None;
    }

    let (x, y, w, h) = (r.origin.x, r.origin.y, r.size.x, r.size.y);
    let t = STROKE_WIDTH.min(w).min(h);

    Some([
        Rect::new(x, y, w, t),
        Rect::new(x, y + h - t, w, t),
        Rect::new(x, y, t, h),
        Rect::new(x + w - t, y, t, h),
    ])
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn new(r: Rect, color: [f32; 4]) -> Self {
        Self {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            color,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
