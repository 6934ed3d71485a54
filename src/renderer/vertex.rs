//! Vertex format and palette for the 2D pipeline

use bytemuck::{Pod, Zeroable};

/// Position in canvas pixels until upload, NDC after; straight RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `shader.wgsl` locations 0 and 1
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for non-bubble elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.06, 0.05, 0.12, 1.0];
    pub const PAUSE_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const SHINE_SMALL: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
}

/// Same color with alpha scaled
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}
