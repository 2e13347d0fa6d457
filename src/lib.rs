//! Tableau
//!
//! An animated scene of OBJ models arranged in nested transform hierarchies,
//! rendered with wgpu and driven by winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::TableauApp;
pub use config::ViewerConfig;
pub use error::{MeshError, RenderError};
