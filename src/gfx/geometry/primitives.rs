//! # Primitive Shape Generation

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere centred at the origin
///
/// # Arguments
/// * `slices` - Number of segments around the vertical axis
/// * `stacks` - Number of segments from pole to pole
/// * `radius` - Sphere radius
///
/// Triangles are wound counter-clockwise when seen from outside, so the
/// sphere survives back-face culling.
pub fn generate_sphere(slices: u32, stacks: u32, radius: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let slices = slices.max(3);
    let stacks = stacks.max(2);

    for stack in 0..=stacks {
        let theta = stack as f32 * PI / stacks as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for slice in 0..=slices {
            let phi = slice as f32 * 2.0 * PI / slices as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for stack in 0..stacks {
        for slice in 0..slices {
            let first = stack * (slices + 1) + slice;
            let second = first + slices + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn test_sphere_counts() {
        let sphere = generate_sphere(20, 22, 0.2);
        assert_eq!(sphere.vertex_count(), 21 * 23);
        assert_eq!(sphere.triangle_count(), 20 * 22 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
    }

    #[test]
    fn test_sphere_radius() {
        let sphere = generate_sphere(8, 6, 0.5);
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = generate_sphere(12, 8, 1.0);
        for tri in sphere.indices.chunks(3) {
            let a = sphere.vertices[tri[0] as usize];
            let b = sphere.vertices[tri[1] as usize];
            let c = sphere.vertices[tri[2] as usize];
            let n = cross(sub(b, a), sub(c, a));
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            // Pole triangles collapse to zero area
            assert!(dot >= -1e-6);
        }
    }

    #[test]
    fn test_sphere_minimum_resolution() {
        let sphere = generate_sphere(0, 0, 1.0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
    }
}
