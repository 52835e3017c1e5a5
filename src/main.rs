use anyhow::Context;
use wgpu_mandelbrot_viewer::{app::App, settings::Settings};
use winit::event_loop::EventLoop;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new();
    let app = App::new(&event_loop, Settings::default()).context("can't start the viewer")?;
    app.run(event_loop)
}
