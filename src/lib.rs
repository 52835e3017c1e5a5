//! Real-time Mandelbrot viewer: a fragment shader evaluates the escape time of
//! every pixel of one large quad, and a small camera model pans and zooms it.

pub mod app;
pub mod command_buffer;
pub mod command_encoder;
pub mod controller;
pub mod error;
pub mod fractal;
pub mod geometry;
pub mod input;
pub mod redraw;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod typed_buffer;
pub mod var;
pub mod view;
