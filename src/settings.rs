use winit::dpi::LogicalSize;

use crate::view::ViewState;

/// Startup parameters. There is no configuration surface; these are the defaults.
#[derive(Clone, Debug)]
pub struct Settings {
    pub title: &'static str,
    pub window_size: LogicalSize<f64>,
    pub view: ViewState,
    pub present_mode: wgpu::PresentMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "wgpu GPGPU: Mandelbrot Set with WGSL",
            window_size: LogicalSize::new(800.0, 450.0),
            view: ViewState::default(),
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}
