//! # Mesh Loading
//!
//! Reads triangle meshes from Wavefront OBJ files and prepares them for the
//! scene: every mesh is centred on the centroid of its vertices, scaled so its
//! largest bounding-box edge is one unit long, and given smooth per-vertex
//! normals estimated from the faces around each vertex.
//!
//! Only vertex positions and faces are used. Texture coordinates, normals and
//! materials in the file are ignored; faces with more than three corners are
//! split into a triangle fan. Points and lines are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use cgmath::{InnerSpace, Vector3, Zero};
use log::info;
use obj::raw::object::Polygon;

use crate::{
    error::MeshError,
    gfx::geometry::{Bounds, GeometryData},
};

/// CPU-side triangle mesh with one normal per vertex
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Loads and normalises a mesh from an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&mut BufReader::new(file))?;
    info!(
        "Read {} vertices and {} faces from {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}

/// Parses OBJ text and normalises the resulting mesh
///
/// Every `v` record counts, whether or not a face uses it, and face indices
/// refer to the single vertex list of the whole file. Objects and groups
/// therefore merge into one mesh and share vertices across their seams.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<MeshData, MeshError> {
    let raw = obj::raw::parse_obj(reader)?;

    let positions: Vec<[f32; 3]> = raw.positions.iter().map(|&(x, y, z, _)| [x, y, z]).collect();

    let mut indices = Vec::new();
    for polygon in &raw.polygons {
        let corners = polygon_positions(polygon);
        // Fan around the first corner
        for i in 1..corners.len().saturating_sub(1) {
            for corner in [corners[0], corners[i], corners[i + 1]] {
                indices.push(u32::try_from(corner).unwrap_or(u32::MAX));
            }
        }
    }

    MeshData::from_triangles(positions, indices)
}

/// Position indices of a face, whatever attributes it carries
fn polygon_positions(polygon: &Polygon) -> Vec<usize> {
    match polygon {
        Polygon::P(corners) => corners.clone(),
        Polygon::PT(corners) | Polygon::PN(corners) => corners.iter().map(|&(p, _)| p).collect(),
        Polygon::PTN(corners) => corners.iter().map(|&(p, _, _)| p).collect(),
    }
}

impl MeshData {
    /// Builds a normalised mesh from raw positions and triangle indices
    ///
    /// Positions are moved so their centroid sits at the origin and divided by
    /// the largest bounding-box extent. A mesh whose extent is zero is only
    /// centred. Trailing indices that do not form a whole triangle are ignored.
    pub fn from_triangles(
        mut positions: Vec<[f32; 3]>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        let bounds = Bounds::from_points(&positions).ok_or(MeshError::Empty)?;

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        let centroid = positions
            .iter()
            .fold(Vector3::zero(), |sum, &p| sum + Vector3::from(p))
            / positions.len() as f32;
        let extent = bounds.max_extent();

        for p in positions.iter_mut() {
            let mut v = Vector3::from(*p) - centroid;
            if extent > 0.0 {
                v /= extent;
            }
            *p = v.into();
        }

        let normals = estimate_vertex_normals(&positions, &indices);

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Wraps generated geometry as-is, without normalisation
    pub fn from_geometry(geometry: GeometryData) -> Self {
        Self {
            positions: geometry.vertices,
            normals: geometry.normals,
            indices: geometry.indices,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.positions)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Area-weighted vertex normals
///
/// Each triangle adds the unnormalised cross product of the two edges leaving
/// a corner to that corner's normal, so larger faces pull harder. Vertices
/// whose sum is zero get `+Y`.
pub fn estimate_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vector3::<f32>::zero(); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let (a, b, c) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let (pa, pb, pc) = (
            Vector3::from(positions[a]),
            Vector3::from(positions[b]),
            Vector3::from(positions[c]),
        );

        sums[a] += (pb - pa).cross(pc - pa);
        sums[b] += (pc - pb).cross(pa - pb);
        sums[c] += (pa - pc).cross(pb - pc);
    }

    sums.into_iter()
        .map(|n| {
            let length = n.magnitude();
            if length > 0.0 && length.is_finite() {
                (n / length).into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<MeshData, MeshError> {
        parse_obj(&mut source.as_bytes())
    }

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < 1e-5,
                "{:?} != {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_close(mesh.positions[0], [-1.0 / 3.0, -1.0 / 3.0, 0.0]);
        for normal in &mesh.normals {
            assert_close(*normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let mesh = parse("# a comment\n\nv 0 0 0\nv 1 0 0\n\nv 0 1 0\n# another\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_normalisation_centres_and_scales() {
        // Box spanning 4 x 2 x 1 units, offset far from the origin
        let mut positions = Vec::new();
        for &x in &[10.0, 14.0] {
            for &y in &[-3.0, -1.0] {
                for &z in &[5.0, 6.0] {
                    positions.push([x, y, z]);
                }
            }
        }
        let mesh = MeshData::from_triangles(positions, vec![0, 1, 2, 1, 3, 2]).unwrap();

        let centroid = mesh.positions.iter().fold([0.0f32; 3], |acc, p| {
            [acc[0] + p[0], acc[1] + p[1], acc[2] + p[2]]
        });
        assert_close(centroid, [0.0, 0.0, 0.0]);

        let bounds = mesh.bounds().unwrap();
        assert!((bounds.max_extent() - 1.0).abs() < 1e-6);
        assert_close(bounds.size(), [1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_centroid_is_vertex_mean_not_box_centre() {
        // Three vertices on the left, one on the right
        let positions = vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [4.0, 0.0, 0.0]];
        let mesh = MeshData::from_triangles(positions, vec![0, 1, 2]).unwrap();
        // Mean x is 1.0, extent is 4.0
        assert_close(mesh.positions[0], [-0.25, -0.0625, -0.0625]);
        assert_close(mesh.positions[3], [0.75, -0.0625, -0.0625]);
    }

    #[test]
    fn test_normals_are_area_weighted() {
        let positions = vec![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        // Large triangle facing +Z, small triangle facing +Y
        let normals = estimate_vertex_normals(&positions, &[0, 1, 2, 0, 3, 1]);
        let expected = [0.0, 2.0 / 20.0f32.sqrt(), 4.0 / 20.0f32.sqrt()];
        assert_close(normals[0], expected);
        assert_close(normals[2], [0.0, 0.0, 1.0]);
        assert_close(normals[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normals_have_unit_length() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0.5 0.5 1\n\
             f 1 2 5\nf 2 3 5\nf 3 4 5\nf 4 1 5\nf 1 4 3 2\n",
        )
        .unwrap();
        for n in &mesh.normals {
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_quad_faces_are_triangulated() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        for normal in &mesh.normals {
            assert_close(*normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_texture_and_normal_records_are_not_vertices() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 -1\n\
             f 1/1/1 2/2/1 3/3/1\n",
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        // File normals are replaced by estimated ones
        assert_close(mesh.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_objects_are_merged() {
        let mesh = parse(
            "o first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
             o second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices.iter().max(), Some(&5));
    }

    #[test]
    fn test_groups_share_vertices_across_seam() {
        let grouped = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 1\ng a\nf 1 2 3\ng b\nf 1 3 4\n").unwrap();
        let plain = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 1\nf 1 2 3\nf 1 3 4\n").unwrap();

        assert_eq!(grouped.vertex_count(), 4);
        assert_eq!(grouped.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(grouped, plain);

        // Vertex 1 averages the normals of both faces
        let s = 6.0f32.sqrt();
        assert_close(grouped.normals[0], [1.0 / s, -1.0 / s, 2.0 / s]);
    }

    #[test]
    fn test_unreferenced_vertices_count_towards_centroid() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 9 9 9\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 1);

        // Centroid (2.5, 2.5, 2.25), extent 9
        assert_close(mesh.positions[0], [-2.5 / 9.0, -2.5 / 9.0, -0.25]);
        assert_close(mesh.positions[3], [6.5 / 9.0, 6.5 / 9.0, 0.75]);
        assert_close(mesh.normals[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unreferenced_vertex_gets_up_normal() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [5.0, 5.0, 5.0]];
        let mesh = MeshData::from_triangles(positions, vec![0, 1, 2]).unwrap();
        assert_close(mesh.normals[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_degenerate_extent_only_centres() {
        let positions = vec![[2.0, 2.0, 2.0]; 3];
        let mesh = MeshData::from_triangles(positions, vec![0, 1, 2]).unwrap();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert_close(*p, [0.0, 0.0, 0.0]);
            assert_close(*n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(matches!(parse("# nothing here\n"), Err(MeshError::Empty)));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let err = MeshData::from_triangles(positions, vec![0, 1, 3]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_malformed_vertex_is_rejected() {
        assert!(matches!(
            parse("v 0 zero 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"),
            Err(MeshError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, MeshError::Open { .. }));
    }

    #[test]
    fn test_load_obj_from_disk() {
        let path = std::env::temp_dir().join(format!("tableau-mesh-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 2 0 0\nv 0 2 0\nf 1 2 3\n").unwrap();
        let mesh = load_obj(&path);
        std::fs::remove_file(&path).ok();

        let mesh = mesh.unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert!((mesh.bounds().unwrap().max_extent() - 1.0).abs() < 1e-6);
    }
}
