//! # Graphics Module
//!
//! Everything between the OBJ files on disk and pixels on screen.
//!
//! - **Camera** ([`camera`]) - orbit camera driven by mouse drags
//! - **Geometry** ([`geometry`]) - bounding boxes and generated primitives
//! - **Rendering** ([`rendering`]) - surface, pipelines and the frame loop
//! - **Resources** ([`resources`]) - uniforms, depth buffer and materials
//! - **Scene** ([`scene`]) - mesh loading, hierarchy and animation

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
