//! Error types for mesh loading and renderer start-up

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or preparing a triangle mesh
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to open mesh file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed OBJ data: {0}")]
    Parse(#[from] obj::ObjError),

    #[error("mesh has no vertices")]
    Empty,

    #[error("face references vertex {index}, but the mesh only has {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Errors raised while acquiring the GPU for rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create rendering surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire graphics device")]
    Device(#[from] wgpu::RequestDeviceError),
}
