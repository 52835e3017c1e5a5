/*!
Escape-time evaluation of the Mandelbrot set.

The image is produced per pixel by `fragment_main` in `shader.wgsl`. The
functions here are the same computation on the CPU, step for step and in the
shader's `f32` precision, so the colouring can be checked without a GPU.
*/

use glam::Vec2;

/// WGSL source for the quad's vertex and fragment stages.
pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Corresponds to `shader.wgsl#max_it`.
pub const MAX_ITERATIONS: u32 = 1000;

/// An orbit has escaped once `|z|^2` reaches this (`|z| >= 2`).
pub const ESCAPE_RADIUS_SQUARED: f32 = 4.0;

/// `(a + bi)^2`
fn square(z: Vec2) -> Vec2 {
    Vec2::new(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y)
}

/// Number of iterations of `z = z^2 + c` performed before `|z|^2 >= 4`,
/// capped at [`MAX_ITERATIONS`].
pub fn escape_time(c: Vec2) -> u32 {
    let mut z = Vec2::ZERO;
    let mut it = 0;
    while z.dot(z) < ESCAPE_RADIUS_SQUARED && it < MAX_ITERATIONS {
        z = square(z) + c;
        it += 1;
    }
    it
}

/// Log-scaled brightness of an iteration count.
///
/// Points inside the set come out very slightly negative; the render target
/// clamps them to black.
pub fn brightness(iterations: u32) -> f32 {
    let max = MAX_ITERATIONS as f32;
    -((iterations + 1) as f32 / max).ln() / max.ln()
}

/// Opaque grayscale colour for a point of the complex plane.
pub fn shade(c: Vec2) -> [f32; 4] {
    let scale = brightness(escape_time(c));
    [scale, scale, scale, 1.0]
}
