//! # Scene Management Module
//!
//! Loads the meshes, lays them out through the fixed transform hierarchy and
//! keeps per-object GPU state in step with the animation.
//!
//! ## Key Components
//!
//! - [`Scene`] - meshes, objects, camera, animation and lights
//! - [`mesh`] - OBJ loading, normalisation and normal estimation
//! - [`hierarchy`] - the nested groups of models and their materials
//! - [`TransformStack`] - push/pop matrix stack used to compose the hierarchy
//! - [`Vertex3D`] - vertex layout shared by every mesh

pub mod animation;
pub mod hierarchy;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod transform_stack;
pub mod vertex;

// Re-export main types
pub use animation::Animation;
pub use mesh::MeshData;
pub use object::{DrawObject, Mesh, Object};
pub use scene::{Scene, SceneStatistics};
pub use transform_stack::TransformStack;
pub use vertex::Vertex3D;
