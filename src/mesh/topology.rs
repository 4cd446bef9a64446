//! Vertex adjacency derived from the face list.
//!
//! [`Topology`] caches, for every vertex, the unique neighbor vertices and the
//! unique incident faces. It is a snapshot: editing the face list of the mesh
//! makes it stale, and it has to be rebuilt by the caller. Operations that
//! take both a mesh and a topology refuse a topology whose element counts no
//! longer match.
//!
//! Border classification works on arbitrary (also non-manifold) triangle
//! soups: a vertex is on the border as soon as one of its edges is used by
//! fewer than two faces.

use crate::error::{MeshError, Result};

use super::index::{FaceId, MeshIndex, VertexId};
use super::store::Mesh;

/// Neighbor vertex and neighbor face sets for each vertex of a mesh.
///
/// Both sets are stored as sorted, deduplicated lists, so two topologies built
/// from the same faces compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology<I: MeshIndex = u32> {
    neighbor_vertices: Vec<Vec<VertexId<I>>>,
    neighbor_faces: Vec<Vec<FaceId<I>>>,
    num_faces: usize,
}

impl<I: MeshIndex> Topology<I> {
    /// Build the adjacency of `mesh`.
    ///
    /// Vertices not referenced by any face get empty sets (isolated).
    ///
    /// # Example
    /// ```
    /// use tessera::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    ///     Point3::new(5.0, 5.0, 5.0),
    /// ];
    /// let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
    /// let topo = Topology::build(&mesh);
    ///
    /// assert_eq!(topo.neighbor_vertices(VertexId::new(0)).len(), 2);
    /// assert!(topo.is_isolated(VertexId::new(3)));
    /// assert!(topo.is_border_vertex(VertexId::new(0)));
    /// ```
    pub fn build(mesh: &Mesh<I>) -> Self {
        let n = mesh.num_vertices();
        let mut neighbor_vertices: Vec<Vec<VertexId<I>>> = vec![Vec::new(); n];
        let mut neighbor_faces: Vec<Vec<FaceId<I>>> = vec![Vec::new(); n];

        for (fi, face) in mesh.faces().iter().enumerate() {
            let fid = FaceId::new(fi);
            for i in 0..3 {
                let v = face[i];
                neighbor_faces[v.index()].push(fid);
                neighbor_vertices[v.index()].push(face[(i + 1) % 3]);
                neighbor_vertices[v.index()].push(face[(i + 2) % 3]);
            }
        }

        // Faces are visited in id order, so only the vertex lists need sorting.
        for list in &mut neighbor_vertices {
            list.sort_unstable();
            list.dedup();
        }

        log::debug!(
            "built topology for {} vertices and {} faces",
            n,
            mesh.num_faces()
        );

        Self {
            neighbor_vertices,
            neighbor_faces,
            num_faces: mesh.num_faces(),
        }
    }

    /// Number of vertices covered.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.neighbor_vertices.len()
    }

    /// Number of faces the topology was built from.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Unique vertices sharing a face with `v`, in ascending order.
    #[inline]
    pub fn neighbor_vertices(&self, v: VertexId<I>) -> &[VertexId<I>] {
        &self.neighbor_vertices[v.index()]
    }

    /// Unique faces incident to `v`, in ascending order.
    #[inline]
    pub fn neighbor_faces(&self, v: VertexId<I>) -> &[FaceId<I>] {
        &self.neighbor_faces[v.index()]
    }

    /// Number of neighbor vertices.
    #[inline]
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.neighbor_vertices[v.index()].len()
    }

    /// A vertex without incident faces.
    #[inline]
    pub fn is_isolated(&self, v: VertexId<I>) -> bool {
        self.neighbor_faces[v.index()].is_empty()
    }

    /// Number of unique undirected edges.
    pub fn num_edges(&self) -> usize {
        let twice: usize = self.neighbor_vertices.iter().map(Vec::len).sum();
        twice / 2
    }

    /// Number of faces shared by the edge `(u, v)`.
    ///
    /// Zero when `u` and `v` are not adjacent.
    pub fn edge_face_count(&self, u: VertexId<I>, v: VertexId<I>) -> usize {
        count_common(
            &self.neighbor_faces[u.index()],
            &self.neighbor_faces[v.index()],
        )
    }

    /// Check whether `v` lies on the border.
    ///
    /// True if some neighbor shares fewer than two faces with `v`. Edges with
    /// three or more faces do not count. Isolated vertices have no edges and
    /// are not on the border.
    pub fn is_border_vertex(&self, v: VertexId<I>) -> bool {
        self.neighbor_vertices[v.index()]
            .iter()
            .any(|&u| self.edge_face_count(v, u) < 2)
    }

    /// All border vertices, in ascending order.
    pub fn border_vertices(&self) -> Vec<VertexId<I>> {
        (0..self.num_vertices())
            .map(VertexId::new)
            .filter(|&v| self.is_border_vertex(v))
            .collect()
    }

    /// Border flag per vertex, indexed by vertex id.
    pub fn border_mask(&self) -> Vec<bool> {
        (0..self.num_vertices())
            .map(|i| self.is_border_vertex(VertexId::new(i)))
            .collect()
    }

    /// Check that the topology still describes `mesh`.
    ///
    /// Only element counts are compared; rewiring faces in place without
    /// changing their number goes unnoticed.
    pub fn is_consistent_with(&self, mesh: &Mesh<I>) -> bool {
        self.num_vertices() == mesh.num_vertices() && self.num_faces == mesh.num_faces()
    }

    /// Like [`Topology::is_consistent_with`], but returns an error.
    pub fn ensure_consistent_with(&self, mesh: &Mesh<I>) -> Result<()> {
        if self.is_consistent_with(mesh) {
            Ok(())
        } else {
            Err(MeshError::StaleTopology {
                topology_vertices: self.num_vertices(),
                topology_faces: self.num_faces,
                mesh_vertices: mesh.num_vertices(),
                mesh_faces: mesh.num_faces(),
            })
        }
    }
}

/// Size of the intersection of two sorted lists.
fn count_common<T: Ord>(a: &[T], b: &[T]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}
