//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// `0xRRGGBB` plus alpha to a normalized color
pub const fn rgb_hex(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb_hex;

    pub const BACKGROUND: [f32; 4] = rgb_hex(0x0b0d17, 1.0);
    pub const GRID: [f32; 4] = rgb_hex(0xffffff, 0.06);
    pub const PLAYER: [f32; 4] = rgb_hex(0x6666ff, 1.0);
    pub const BARREL: [f32; 4] = rgb_hex(0x111122, 1.0);
    pub const BULLET: [f32; 4] = rgb_hex(0xffffff, 0.47);
    pub const BULLET_RIM: [f32; 4] = rgb_hex(0xffffff, 0.13);
    /// Three or more hit points left
    pub const ENEMY_TOUGH: [f32; 4] = rgb_hex(0xff6b6b, 1.0);
    /// Exactly two hit points left
    pub const ENEMY_HURT: [f32; 4] = rgb_hex(0xff9f43, 1.0);
    /// One hit point left
    pub const ENEMY_WEAK: [f32; 4] = rgb_hex(0xffd166, 1.0);
    pub const ENEMY_RIM: [f32; 4] = rgb_hex(0x000000, 0.2);
    pub const ENEMY_EYE: [f32; 4] = rgb_hex(0x111111, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_hex(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
        assert_eq!(colors::PLAYER[0], 0x66 as f32 / 255.0);
    }

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
