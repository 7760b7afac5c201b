//! The winit event loop: owns the window, graphics state, input, and clock,
//! and drives the fixed per-frame sequence through the [`BasaltApp`]
//! callbacks and the renderer's frame API.

use std::sync::Arc;

use basalt_core::{FrameClock, InputState};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::builder::AppConfig;
use crate::context::FrameContext;
use crate::graphics::GraphicsState;
use crate::traits::BasaltApp;

struct Runner<A: BasaltApp> {
    app: A,
    config: AppConfig,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    input: InputState,
    window_size: (u32, u32),
    clock: FrameClock,
}

impl<A: BasaltApp> Runner<A> {
    fn new(app: A, config: AppConfig) -> Self {
        Self {
            app,
            config,
            window: None,
            graphics: None,
            input: InputState::new(),
            window_size: (0, 0),
            clock: FrameClock::new(),
        }
    }
}

impl<A: BasaltApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let mut attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_resizable(self.config.resizable)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        if self.config.fullscreen {
            attributes = attributes.with_fullscreen(Some(winit::window::Fullscreen::Borderless(
                None,
            )));
        }

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window_size = (self.config.width, self.config.height);

        let mut gfx = match pollster::block_on(GraphicsState::new(
            window.clone(),
            self.config.width,
            self.config.height,
            self.config.vsync,
            self.config.sample_count,
        )) {
            Ok(g) => g,
            Err(e) => {
                log::error!("graphics init failed: {e:#}");
                event_loop.exit();
                return;
            }
        };

        gfx.renderer.projection = basalt_core::Projection::new(
            self.config.fov_y.to_radians(),
            self.config.width,
            self.config.height,
            self.config.znear,
            self.config.zfar,
        );

        // User setup runs with graphics live but before the first frame.
        {
            let mut ctx = FrameContext {
                input: &mut self.input,
                time: self.clock.peek(),
                window_size: self.window_size,
                window: &window,
                renderer: &mut gfx.renderer,
                exit_requested: false,
            };
            self.app.setup(&mut ctx);
            if ctx.exit_requested {
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.graphics = Some(gfx);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // Input bookkeeping before the app sees the event.
        match &event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    self.input
                        .set_key(code, key_event.state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.set_mouse_position(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input
                    .set_button(*button, *state == ElementState::Pressed);
            }
            _ => {}
        }

        let (Some(window), Some(gfx)) = (self.window.clone(), &mut self.graphics) else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        {
            let mut ctx = FrameContext {
                input: &mut self.input,
                time: self.clock.peek(),
                window_size: self.window_size,
                window: &window,
                renderer: &mut gfx.renderer,
                exit_requested: false,
            };
            self.app.on_window_event(&event, &mut ctx);
            if ctx.exit_requested {
                event_loop.exit();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                gfx.resize(size.width, size.height);
                if size.width > 0 && size.height > 0 {
                    self.window_size = (size.width, size.height);
                }
                let mut ctx = FrameContext {
                    input: &mut self.input,
                    time: self.clock.peek(),
                    window_size: self.window_size,
                    window: &window,
                    renderer: &mut gfx.renderer,
                    exit_requested: false,
                };
                self.app.on_resize(self.window_size, &mut ctx);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gfx), Some(window)) = (&mut self.graphics, &self.window) else {
            return;
        };

        let time = self.clock.tick();

        // 1. App logic.
        {
            let mut ctx = FrameContext {
                input: &mut self.input,
                time,
                window_size: self.window_size,
                window,
                renderer: &mut gfx.renderer,
                exit_requested: false,
            };
            self.app.update(&mut ctx);
            if ctx.exit_requested {
                event_loop.exit();
                return;
            }
        }

        // 2. Refresh cached matrices and upload this frame's constants.
        gfx.renderer.update(time);

        // 3. Acquire the swap-chain image.
        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                gfx.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => return,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                event_loop.exit();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // 4. Record, submit, present, rotate + stall.
        let mut encoder = gfx.renderer.begin_frame();
        gfx.renderer.render(&mut encoder, &view);
        gfx.renderer.submit_frame(encoder);
        frame.present();
        gfx.renderer.finish_frame();

        window.request_redraw();
    }
}

pub(crate) fn run_internal<A: BasaltApp + 'static>(
    config: AppConfig,
    app: A,
) -> anyhow::Result<()> {
    let mut runner = Runner::new(app, config);
    let event_loop = EventLoop::new()?;
    // Spin as fast as presentation allows; pacing comes from vsync and the
    // end-of-frame stall.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;
    Ok(())
}
