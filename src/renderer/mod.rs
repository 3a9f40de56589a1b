//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles (`scene`,
//! `shapes`) and drawn by a single pass-through pipeline (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use scene::{build_frame, enemy_color};
pub use vertex::Vertex;

use thiserror::Error;

/// Failures while bringing up the GPU surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
