use std::collections::VecDeque;
use std::time::Duration;

use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{PresentError, Surface};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::platform::translate_window_event;
use crate::input::{ControlSignal, EventSource, InputEvent};
use crate::paint::{palette, Color};
use crate::render::shapes::rect::RectRenderer;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::config::centered_position;
use super::{InitError, WindowConfig};

/// Event pumps allowed for the platform to deliver `resumed` at startup.
const STARTUP_PUMPS: u32 = 100;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Upper bound on buffered input events. Newer events are dropped when full.
const MAX_PENDING_EVENTS: usize = 1024;

#[self_referencing]
struct SurfaceEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Window and GPU surface driven by the frame driver.
///
/// The event loop is pumped rather than run, so the frame driver keeps control
/// of the loop. Each `poll_event` pumps pending platform events into a bounded
/// buffer and hands back the oldest one.
pub struct PlatformSurface {
    event_loop: EventLoop<()>,
    shell: Shell,

    renderer: RectRenderer,
    draw_list: DrawList,
    clear_color: Color,
}

impl PlatformSurface {
    /// Creates the window and its GPU context.
    ///
    /// Fails if the event loop, the window or the renderer cannot be created.
    pub fn initialize(config: WindowConfig, gpu_init: GpuInit) -> Result<Self, InitError> {
        let mut event_loop = EventLoop::new()?;
        let mut shell = Shell::new(config, gpu_init);

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut shell)
            {
                return Err(InitError::Exited(code));
            }
            if let Some(err) = shell.init_error.take() {
                return Err(err);
            }
            if shell.entry.is_some() {
                break;
            }
        }

        if shell.entry.is_none() {
            return Err(InitError::NoWindow { attempts: STARTUP_PUMPS });
        }

        log::info!("render surface initialized");

        Ok(Self {
            event_loop,
            shell,
            renderer: RectRenderer::new(),
            draw_list: DrawList::new(),
            clear_color: palette::BACKGROUND,
        })
    }

    fn pump(&mut self) {
        if let PumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.shell)
        {
            log::debug!("event loop exited with code {code}");
            self.shell.pending.push_back(InputEvent::Quit);
        }
    }
}

impl EventSource for PlatformSurface {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pump();
        self.shell.pending.pop_front()
    }

    fn dropped_events(&self) -> u64 {
        self.shell.dropped_events
    }
}

impl Surface for PlatformSurface {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.draw_list.clear();
    }

    fn draw(&mut self, cmd: DrawCmd) {
        self.draw_list.push(cmd);
    }

    fn present(&mut self) -> Result<(), PresentError> {
        let Some(entry) = self.shell.entry.as_mut() else {
            return Ok(());
        };

        let (renderer, draw_list, clear) = (&mut self.renderer, &self.draw_list, self.clear_color);

        entry.with_mut(|fields| {
            let window: &Window = fields.window;
            let gpu = fields.gpu;

            let mut frame = match gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    return match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => {
                            Err(PresentError::new("surface out of memory"))
                        }
                        action => {
                            log::debug!("frame skipped: {action:?}");
                            Ok(())
                        }
                    };
                }
            };

            // Clear pass, dropped before the encoder is reused.
            {
                let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("kiln clear"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }

            let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
            let rctx = RenderCtx::from_gpu(gpu, Viewport::new(logical.width, logical.height));

            // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
            {
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                renderer.render(&rctx, &mut target, draw_list);
            }

            window.pre_present_notify();
            gpu.submit(frame);
            Ok(())
        })
    }

    fn shutdown(&mut self) {
        self.draw_list.clear();
        if self.shell.entry.take().is_some() {
            log::info!("render surface shut down");
        }
    }
}

/// Application handler fed by `pump_app_events`.
struct Shell {
    config: WindowConfig,
    gpu_init: GpuInit,

    entry: Option<SurfaceEntry>,
    init_error: Option<InitError>,

    pending: VecDeque<InputEvent>,
    dropped_events: u64,
}

impl Shell {
    fn new(config: WindowConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            init_error: None,
            pending: VecDeque::new(),
            dropped_events: 0,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<SurfaceEntry, InitError> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(false)
            .with_decorations(!self.config.borderless);

        if self.config.centered {
            if let Some(monitor) = event_loop
                .primary_monitor()
                .or_else(|| event_loop.available_monitors().next())
            {
                let size: PhysicalSize<u32> = self.config.size.to_physical(monitor.scale_factor());
                let origin = centered_position(monitor.position(), monitor.size(), size);
                attrs = attrs.with_position(origin);
            }
        }

        let window = event_loop.create_window(attrs)?;
        let gpu_init = self.gpu_init.clone();

        SurfaceEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(|e| InitError::Renderer(format!("{e:#}")))
    }

    /// Buffers `ev`. When full, plain events are dropped, while a control
    /// signal evicts the oldest plain event so quit requests are never lost.
    fn enqueue(&mut self, ev: InputEvent) {
        if self.pending.len() >= MAX_PENDING_EVENTS {
            let evict = ControlSignal::from_event(&ev).and_then(|_| {
                self.pending
                    .iter()
                    .position(|e| ControlSignal::from_event(e).is_none())
            });

            if self.dropped_events == 0 {
                log::warn!("input buffer full; dropping events");
            }
            self.dropped_events += 1;

            match evict {
                Some(index) => {
                    self.pending.remove(index);
                }
                None => return,
            }
        }
        self.pending.push_back(ev);
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);

        if self.entry.is_some() || self.init_error.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => self.init_error = Some(e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        // Runtime-managed resize handling.
        match &event {
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            _ => {}
        }

        if let Some(ev) = entry.with_window(|w| translate_window_event(w, &event)) {
            self.enqueue(ev);
        }
    }
}
