//! GPU resource management
//!
//! Handles depth textures, global uniforms and material colours.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{DirectionalLight, GlobalBindings, GlobalUBO, GlobalUniform};
pub use material::{Diffuse, MaterialState};
pub use texture_resource::TextureResource;
