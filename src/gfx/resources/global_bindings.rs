//! Global uniform bindings for projection and lighting
//!
//! Holds the per-frame data every draw shares: the projection matrix and the
//! three directional lights, already expressed in eye space. Bound to slot 0
//! in the scene pipelines.

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Number of directional lights the shaders evaluate
pub const LIGHT_COUNT: usize = 3;

/// Directional light; `direction` points from the surface toward the light
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub diffuse: [f32; 3],
}

impl DirectionalLight {
    /// Carries the direction through `matrix`, ignoring translation
    pub fn transformed(&self, matrix: Matrix4<f32>) -> Self {
        let [x, y, z] = self.direction;
        let v = matrix * Vector4::new(x, y, z, 0.0);
        Self {
            direction: [v.x, v.y, v.z],
            diffuse: self.diffuse,
        }
    }
}

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    projection: [[f32; 4]; 4],
    light_directions: [[f32; 4]; LIGHT_COUNT],
    light_diffuse: [[f32; 4]; LIGHT_COUNT],
}
// 64 + 3 * 16 + 3 * 16 = 160 bytes

impl GlobalUniform {
    /// Packs the projection and eye-space lights; directions are normalised here
    pub fn new(projection: Matrix4<f32>, lights: &[DirectionalLight; LIGHT_COUNT]) -> Self {
        let mut light_directions = [[0.0; 4]; LIGHT_COUNT];
        let mut light_diffuse = [[0.0; 4]; LIGHT_COUNT];

        for (i, light) in lights.iter().enumerate() {
            let dir = Vector3::from(light.direction);
            let dir = if dir.magnitude2() > 0.0 {
                dir.normalize()
            } else {
                dir
            };
            light_directions[i] = [dir.x, dir.y, dir.z, 0.0];
            let [r, g, b] = light.diffuse;
            light_diffuse[i] = [r, g, b, 1.0];
        }

        Self {
            projection: projection.into(),
            light_directions,
            light_diffuse,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Manages bind group layouts and bind groups for global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    /// Creates the layout and binds `ubo` to it
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
