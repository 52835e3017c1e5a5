//! The static quad the fractal is drawn on.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};

/// Quad corner in local (complex plane) coordinates.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

/// Three indices into [`QUAD_VERTICES`].
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub index: [u32; 3],
}

/// Large enough that any zoomed-out view stays covered; the view only ever
/// moves through the projection matrix.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { x: -10.0, y: -10.0 },
    Vertex { x: 10.0, y: -10.0 },
    Vertex { x: 10.0, y: 10.0 },
    Vertex { x: -10.0, y: 10.0 },
];

pub const QUAD_TRIANGLES: [Triangle; 2] = [
    Triangle { index: [0, 1, 2] },
    Triangle { index: [0, 2, 3] },
];

pub const QUAD_INDEX_COUNT: u32 = (QUAD_TRIANGLES.len() * 3) as u32;

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
