//! Face and vertex normal estimation.
//!
//! Face normals are the normalized cross product of two triangle edges,
//! following the counter-clockwise winding. Vertex normals are the
//! normalized, unweighted sum of the normals of the incident faces.
//!
//! Faces with zero area have no normal. They are reported in
//! [`Normals::degenerate_faces`], get a zero face normal and do not
//! contribute to their vertices. Vertices with no usable incident face get
//! a zero vertex normal.
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::normals::update_normals;
//!
//! let mut mesh: Mesh = tessera::mesh::primitives::icosahedron().unwrap();
//! let degenerate = update_normals(&mut mesh).unwrap();
//! assert!(degenerate.is_empty());
//! assert_eq!(mesh.vertex_normals().len(), 12);
//! ```

use nalgebra::Vector3;

use super::triangle::{degenerate_faces, mesh_triangles, scatter_corners, CornerSum, Triangle};
use crate::error::Result;
use crate::mesh::{FaceId, Mesh, MeshIndex};

/// Normals of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Normals<I: MeshIndex = u32> {
    /// Unit normal per face; zero for degenerate faces.
    pub face: Vec<Vector3<f64>>,
    /// Unit normal per vertex; zero for vertices without usable faces.
    pub vertex: Vec<Vector3<f64>>,
    /// Faces skipped because they have zero area.
    pub degenerate_faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> Normals<I> {
    /// True if any face was skipped.
    #[inline]
    pub fn has_degenerate_faces(&self) -> bool {
        !self.degenerate_faces.is_empty()
    }
}

/// Compute face and vertex normals.
///
/// This function uses parallel computation by default. Use
/// [`compute_normals_sequential`] for single-threaded execution.
pub fn compute_normals<I: MeshIndex>(mesh: &Mesh<I>) -> Normals<I> {
    compute_normals_impl(mesh, true)
}

/// Compute face and vertex normals (sequential version).
pub fn compute_normals_sequential<I: MeshIndex>(mesh: &Mesh<I>) -> Normals<I> {
    compute_normals_impl(mesh, false)
}

/// Compute normals and store them in the mesh's normal attributes.
///
/// Returns the faces that were skipped as degenerate.
pub fn update_normals<I: MeshIndex>(mesh: &mut Mesh<I>) -> Result<Vec<FaceId<I>>> {
    let normals = compute_normals(mesh);
    mesh.set_face_normals(normals.face)?;
    mesh.set_vertex_normals(normals.vertex)?;
    Ok(normals.degenerate_faces)
}

fn compute_normals_impl<I: MeshIndex>(mesh: &Mesh<I>, parallel: bool) -> Normals<I> {
    let triangles = mesh_triangles(mesh, parallel);
    let vertex = vertex_normals(mesh, &triangles, parallel);

    let degenerate_faces = degenerate_faces(&triangles);
    if !degenerate_faces.is_empty() {
        log::warn!(
            "skipped {} degenerate faces while computing normals",
            degenerate_faces.len()
        );
    }

    Normals {
        face: triangles
            .iter()
            .map(|t| t.as_ref().map_or_else(Vector3::zeros, |t| t.normal))
            .collect(),
        vertex,
        degenerate_faces,
    }
}

/// Unweighted vertex normals from precomputed triangles. Skipped faces
/// contribute nothing and vertices without faces get the zero vector.
pub(crate) fn vertex_normals<I: MeshIndex>(
    mesh: &Mesh<I>,
    triangles: &[Option<Triangle>],
    parallel: bool,
) -> Vec<Vector3<f64>> {
    scatter_corners(mesh, triangles, parallel, |tri| {
        [CornerSum {
            vector: tri.normal,
            scalar: 0.0,
        }; 3]
    })
    .into_iter()
    .map(|s| {
        s.vector
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::{icosphere, plane_grid};
    use nalgebra::Point3;

    #[test]
    fn test_single_triangle() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let normals = compute_normals(&mesh);

        assert!((normals.face[0] - Vector3::z()).norm() < 1e-12);
        for n in &normals.vertex {
            assert!((n - Vector3::z()).norm() < 1e-12);
        }
        assert!(!normals.has_degenerate_faces());
    }

    #[test]
    fn test_winding_flips_normal() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 2, 1]]).unwrap();
        let normals = compute_normals(&mesh);
        assert!((normals.face[0] + Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_vertex_normals_are_unweighted() {
        // A large and a small face meeting at a right angle along the y axis;
        // the shared vertices get the bisector regardless of face size.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.1),
        ];
        let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 2, 1], [0, 1, 3]]).unwrap();
        let normals = compute_normals(&mesh);

        let expected = Vector3::new(1.0, 0.0, 1.0).normalize();
        assert!((normals.vertex[0] - expected).norm() < 1e-12);
        assert!((normals.vertex[1] - expected).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_face_is_skipped() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        // Face 1 is collinear; vertex 3 only belongs to it.
        let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2], [0, 1, 3]]).unwrap();
        let normals = compute_normals(&mesh);

        assert_eq!(normals.degenerate_faces, vec![FaceId::new(1)]);
        assert_eq!(normals.face[1], Vector3::zeros());
        assert_eq!(normals.vertex[3], Vector3::zeros());
        assert!((normals.vertex[0] - Vector3::z()).norm() < 1e-12);
        for n in normals.face.iter().chain(&normals.vertex) {
            assert!(n.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn test_isolated_vertex_gets_zero_normal() {
        let mut mesh: Mesh = plane_grid(2, 1.0).unwrap();
        let lone = mesh.push_vertex(Point3::new(5.0, 5.0, 5.0)).unwrap();
        let normals = compute_normals(&mesh);
        assert_eq!(normals.vertex[lone.index()], Vector3::zeros());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh: Mesh = icosphere(2).unwrap();
        let par = compute_normals(&mesh);
        let seq = compute_normals_sequential(&mesh);

        assert_eq!(par.face, seq.face);
        for (a, b) in par.vertex.iter().zip(&seq.vertex) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_update_normals_writes_mesh() {
        let mut mesh: Mesh = plane_grid(3, 1.0).unwrap();
        let degenerate = update_normals(&mut mesh).unwrap();
        assert!(degenerate.is_empty());
        assert_eq!(mesh.face_normals().len(), mesh.num_faces());
        assert_eq!(mesh.vertex_normals().len(), mesh.num_vertices());
        assert!(mesh.validate().is_ok());
    }
}
