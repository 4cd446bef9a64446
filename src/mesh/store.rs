//! Face-vertex mesh storage.
//!
//! [`Mesh`] holds vertex positions, triangle index triples and the optional
//! per-vertex and per-face attributes that loaders and writers exchange with
//! the algorithms. It carries no adjacency; see [`Topology`](super::Topology).

use nalgebra::{Point2, Point3, Vector3};

use super::index::{FaceId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A triangle mesh stored as a vertex list and a face list.
///
/// Faces are fixed-order triples of vertex ids. Every id is guaranteed to be
/// in range once the face is in the mesh; positions can be changed freely but
/// vertices are never removed.
///
/// Optional attributes are either empty or exactly as long as the element
/// they describe. The setters enforce this, and [`Mesh::validate`] re-checks it
/// after vertices or faces have been appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh<I: MeshIndex = u32> {
    positions: Vec<Point3<f64>>,
    faces: Vec<[VertexId<I>; 3]>,
    vertex_normals: Vec<Vector3<f64>>,
    face_normals: Vec<Vector3<f64>>,
    colors: Vec<Vector3<f64>>,
    texcoords: Vec<Point2<f64>>,
}

impl<I: MeshIndex> Mesh<I> {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
            vertex_normals: Vec::new(),
            face_normals: Vec::new(),
            colors: Vec::new(),
            texcoords: Vec::new(),
        }
    }

    /// Create an empty mesh with preallocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
            ..Self::new()
        }
    }

    /// Build a mesh from positions and triangle index triples.
    ///
    /// Every index must be smaller than `vertices.len()` and no face may name
    /// the same vertex twice. Faces with distinct but collinear vertices are
    /// accepted; the estimators report them as degenerate.
    ///
    /// # Example
    /// ```
    /// use tessera::mesh::Mesh;
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.5, 1.0, 0.0),
    /// ];
    /// let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.num_vertices(), 3);
    /// assert_eq!(mesh.num_faces(), 1);
    ///
    /// assert!(Mesh::<u32>::from_triangles(&vertices, &[[0, 1, 3]]).is_err());
    /// ```
    pub fn from_triangles(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Result<Self> {
        if vertices.len() > I::MAX {
            return Err(MeshError::invalid_param(
                "vertex_count",
                vertices.len(),
                "too many vertices for the index type",
            ));
        }
        if faces.len() > I::MAX {
            return Err(MeshError::invalid_param(
                "face_count",
                faces.len(),
                "too many faces for the index type",
            ));
        }

        let mut mesh = Self::with_capacity(vertices.len(), faces.len());
        mesh.positions.extend_from_slice(vertices);
        for (fi, face) in faces.iter().enumerate() {
            check_face(fi, face, vertices.len())?;
            mesh.faces.push(face.map(VertexId::new));
        }
        Ok(mesh)
    }

    /// Check the structural invariants of the mesh.
    ///
    /// Face indices must be in range and non-repeating, and every non-empty
    /// attribute must match its element count.
    pub fn validate(&self) -> Result<()> {
        let nv = self.positions.len();
        for (fi, face) in self.faces.iter().enumerate() {
            check_face(fi, &face.map(|v| v.index()), nv)?;
        }

        check_attribute("vertex normals", self.vertex_normals.len(), nv)?;
        check_attribute("face normals", self.face_normals.len(), self.faces.len())?;
        check_attribute("colors", self.colors.len(), nv)?;
        check_attribute("texture coordinates", self.texcoords.len(), nv)?;
        Ok(())
    }

    // ==================== Counts and iteration ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    // ==================== Geometry access ====================

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.positions[v.index()] = pos;
    }

    /// All vertex positions, indexed by vertex id.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Mutable position buffer for the smoothing engine's double buffering.
    #[inline]
    pub(crate) fn positions_mut(&mut self) -> &mut Vec<Point3<f64>> {
        &mut self.positions
    }

    /// Get the three vertices of a face.
    #[inline]
    pub fn face(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        self.faces[f.index()]
    }

    /// All faces, indexed by face id.
    #[inline]
    pub fn faces(&self) -> &[[VertexId<I>; 3]] {
        &self.faces
    }

    /// Get the corner positions of a face.
    #[inline]
    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        self.face(f).map(|v| self.positions[v.index()])
    }

    /// Euclidean area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Axis-aligned bounding box, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    /// Average of all vertex positions.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.positions.is_empty() {
            return None;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Some(Point3::from(sum / self.positions.len() as f64))
    }

    // ==================== Construction ====================

    /// Append a vertex and return its id.
    ///
    /// Fails with [`MeshError::InvalidParameter`] once the index type has no
    /// id left. Non-empty per-vertex attributes no longer match the vertex
    /// count afterwards; [`Mesh::validate`] reports this until they are reset.
    pub fn push_vertex(&mut self, position: Point3<f64>) -> Result<VertexId<I>> {
        check_capacity::<I>("vertex_count", self.positions.len())?;
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        Ok(id)
    }

    /// Append a face after checking its indices.
    ///
    /// Any [`Topology`](super::Topology) built earlier is stale afterwards.
    pub fn push_face(&mut self, face: [usize; 3]) -> Result<FaceId<I>> {
        check_capacity::<I>("face_count", self.faces.len())?;
        check_face(self.faces.len(), &face, self.positions.len())?;
        let id = FaceId::new(self.faces.len());
        self.faces.push(face.map(VertexId::new));
        Ok(id)
    }

    // ==================== Attributes ====================

    /// Per-vertex normals (empty when not computed).
    #[inline]
    pub fn vertex_normals(&self) -> &[Vector3<f64>] {
        &self.vertex_normals
    }

    /// Per-face normals (empty when not computed).
    #[inline]
    pub fn face_normals(&self) -> &[Vector3<f64>] {
        &self.face_normals
    }

    /// Per-vertex colors (empty when absent).
    #[inline]
    pub fn colors(&self) -> &[Vector3<f64>] {
        &self.colors
    }

    /// Per-vertex texture coordinates (empty when absent).
    #[inline]
    pub fn texcoords(&self) -> &[Point2<f64>] {
        &self.texcoords
    }

    /// Replace the per-vertex normals.
    pub fn set_vertex_normals(&mut self, normals: Vec<Vector3<f64>>) -> Result<()> {
        check_attribute("vertex normals", normals.len(), self.num_vertices())?;
        self.vertex_normals = normals;
        Ok(())
    }

    /// Replace the per-face normals.
    pub fn set_face_normals(&mut self, normals: Vec<Vector3<f64>>) -> Result<()> {
        check_attribute("face normals", normals.len(), self.num_faces())?;
        self.face_normals = normals;
        Ok(())
    }

    /// Replace the per-vertex colors. Components must lie in [0, 1].
    pub fn set_colors(&mut self, colors: Vec<Vector3<f64>>) -> Result<()> {
        check_attribute("colors", colors.len(), self.num_vertices())?;
        if let Some(vertex) = colors
            .iter()
            .position(|c| c.iter().any(|x| !(0.0..=1.0).contains(x)))
        {
            return Err(MeshError::ColorOutOfRange { vertex });
        }
        self.colors = colors;
        Ok(())
    }

    /// Replace the per-vertex texture coordinates.
    pub fn set_texcoords(&mut self, texcoords: Vec<Point2<f64>>) -> Result<()> {
        check_attribute("texture coordinates", texcoords.len(), self.num_vertices())?;
        self.texcoords = texcoords;
        Ok(())
    }

    /// Drop stored normals, e.g. after positions have been smoothed.
    pub fn clear_normals(&mut self) {
        self.vertex_normals.clear();
        self.face_normals.clear();
    }
}

fn check_face(fi: usize, face: &[usize; 3], num_vertices: usize) -> Result<()> {
    for &vi in face {
        if vi >= num_vertices {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }
    if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
        return Err(MeshError::RepeatedVertex { face: fi });
    }
    Ok(())
}

/// An element with id `len` fits only while `len <= I::MAX`.
fn check_capacity<I: MeshIndex>(name: &'static str, len: usize) -> Result<()> {
    if len > I::MAX {
        return Err(MeshError::invalid_param(
            name,
            len + 1,
            "too many elements for the index type",
        ));
    }
    Ok(())
}

fn check_attribute(attribute: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != 0 && actual != expected {
        return Err(MeshError::AttributeLength {
            attribute,
            expected,
            actual,
        });
    }
    Ok(())
}
