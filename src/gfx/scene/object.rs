use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::{util::DeviceExt, Device};

use super::{hierarchy::Model, mesh::MeshData, vertex::Vertex3D};
use crate::{
    gfx::resources::material::MaterialState,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Triangle mesh with its GPU buffers, shared by every object using the model
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Uploads each triangle starting at its last corner, so flat
    /// interpolation (which takes the first vertex) colours a face from the
    /// same corner GL's provoking vertex does. Winding is unchanged.
    pub fn new(data: &MeshData) -> Self {
        Self {
            vertices: Vertex3D::interleave(&data.positions, &data.normals),
            indices: data
                .indices
                .chunks_exact(3)
                .flat_map(|t| [t[2], t[0], t[1]])
                .collect(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: (data.triangle_count() * 3) as u32,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.index_count as usize / 3
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Per-object uniform content
///
/// MUST match the `ObjectUniform` struct in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    model_view: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    front_diffuse: [f32; 4],
    back_diffuse: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model_view: Matrix4<f32>, material: &MaterialState) -> Self {
        Self {
            model_view: model_view.into(),
            normal_matrix: normal_matrix(model_view).into(),
            front_diffuse: material.front.to_rgba(),
            back_diffuse: material.back.to_rgba(),
        }
    }
}

/// Inverse-transpose of `model_view`, or identity when it is singular
pub fn normal_matrix(model_view: Matrix4<f32>) -> Matrix4<f32> {
    model_view
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix4::identity)
}

/// Layout of the per-object bind group (group 1 in the scene pipelines)
pub fn object_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

pub struct ObjectGpuResources {
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// One placement of a model in the scene
pub struct Object {
    pub name: &'static str,
    pub model: Model,
    /// Object-to-eye transform for the current frame
    pub model_view: Matrix4<f32>,
    pub material: MaterialState,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    pub fn new(name: &'static str, model: Model) -> Self {
        Self {
            name,
            model,
            model_view: Matrix4::identity(),
            material: MaterialState::default(),
            gpu_resources: None,
        }
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform::new(self.model_view, &self.material)
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &BindGroupLayoutWithDesc) {
        let uniform = UniformBuffer::<ObjectUniform>::new(device);
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, self.name);
        self.gpu_resources = Some(ObjectGpuResources {
            uniform,
            bind_group,
        });
    }

    /// Uploads the current transform and material
    pub fn update_gpu_resources(&mut self, queue: &wgpu::Queue) {
        let content = self.uniform();
        if let Some(gpu_resources) = &mut self.gpu_resources {
            gpu_resources.uniform.update_content(queue, content);
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object, mesh: &'a Mesh);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Not uploaded yet
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &'b Object, mesh: &'b Mesh) {
        let Some(bind_group) = object.bind_group() else {
            return;
        };
        self.set_bind_group(1, bind_group, &[]);
        self.draw_mesh(mesh);
    }
}
