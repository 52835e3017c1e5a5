use glam::Mat4;
use log::{error, warn};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::{
    controller::Controller, error::Error, renderer::Renderer, screen, settings::Settings,
};

/// All state of the running viewer. Owned by the event loop.
pub struct App {
    window: Window,
    renderer: Renderer,
    controller: Controller,
}

impl App {
    pub fn new(event_loop: &EventLoop<()>, settings: Settings) -> Result<Self, Error> {
        let window = WindowBuilder::new()
            .with_title(settings.title)
            .with_inner_size(settings.window_size)
            .build(event_loop)?;
        let viewport = screen::Size::from(window.inner_size());
        let renderer = Renderer::new(&window, viewport, settings.present_mode)?;

        let controller = Controller::new(settings.view, viewport);
        if let Some(mvp) = controller.projection() {
            renderer.upload_projection(mvp);
        }

        Ok(Self {
            window,
            renderer,
            controller,
        })
    }

    pub fn run(self, event_loop: EventLoop<()>) -> ! {
        let mut app = Some(self);

        event_loop.run(move |event, _, control_flow| {
            if let Event::LoopDestroyed = event {
                if let Some(app) = app.take() {
                    app.destroy();
                }
                return;
            }
            let Some(this) = app.as_mut() else {
                return;
            };

            match event {
                Event::WindowEvent { window_id, event } if window_id == this.window.id() => {
                    this.window_event(event, control_flow)
                }
                Event::MainEventsCleared => this.end_frame(control_flow),
                Event::RedrawRequested(window_id) if window_id == this.window.id() => {
                    this.redraw(control_flow)
                }
                _ => {}
            }
        })
    }

    fn window_event(&mut self, event: WindowEvent, control_flow: &mut ControlFlow) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        ..
                    },
                ..
            } => control_flow.set_exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => self.resize(*new_inner_size),
            WindowEvent::CursorMoved { position, .. } => {
                self.controller.cursor_moved(position.x, position.y)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.mouse_input(button, state)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let projection = self.controller.mouse_wheel(delta);
                self.upload(projection);
            }
            _ => {}
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let viewport = screen::Size::from(size);
        self.renderer.resize(viewport);
        let projection = self.controller.resize(viewport);
        self.upload(projection);
    }

    fn upload(&self, projection: Option<Mat4>) {
        if let Some(mvp) = projection {
            self.renderer.upload_projection(mvp);
        }
    }

    /// Runs once all pending events have been handled.
    fn end_frame(&mut self, control_flow: &mut ControlFlow) {
        if matches!(control_flow, ControlFlow::ExitWithCode(_)) {
            return;
        }
        let projection = self.controller.end_frame();
        self.upload(projection);

        if self.controller.wants_redraw() {
            self.window.request_redraw();
            control_flow.set_poll();
        } else {
            control_flow.set_wait();
        }
    }

    fn redraw(&mut self, control_flow: &mut ControlFlow) {
        if !self.controller.take_frame() {
            return;
        }

        match self.renderer.draw() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.renderer.reconfigure();
                self.controller.frame_dropped();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out waiting for the next frame");
                self.controller.frame_dropped();
            }
            Err(err @ wgpu::SurfaceError::OutOfMemory) => {
                error!("can't draw: {}", err);
                control_flow.set_exit_with_code(1);
            }
        }
    }

    fn destroy(self) {
        self.renderer.destroy();
    }
}
