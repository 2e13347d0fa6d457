//! # Vertex Data Structures
//!
//! GPU vertex format shared by every mesh in the scene.

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the field order and packing that [`Vertex3D::desc`]
/// describes to the pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Unit normal [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Interleaves separate position and normal arrays
    pub fn interleave(positions: &[[f32; 3]], normals: &[[f32; 3]]) -> Vec<Self> {
        positions
            .iter()
            .zip(normals)
            .map(|(&position, &normal)| Vertex3D { position, normal })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex3D::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_interleave() {
        let vertices = Vertex3D::interleave(&[[1.0, 2.0, 3.0]], &[[0.0, 1.0, 0.0]]);
        assert_eq!(
            vertices,
            vec![Vertex3D {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 1.0, 0.0],
            }]
        );
    }
}
