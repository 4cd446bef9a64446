//! Error types for tessera.
//!
//! Precondition violations (bad indices, mismatched attribute lengths, stale
//! topology) are reported as [`MeshError`] before any computation runs.
//! Degenerate triangles are not errors for the estimators: they are skipped
//! and listed in the result instead.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A face references a vertex index outside the vertex range.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face names the same vertex more than once.
    #[error("face {face} repeats a vertex index")]
    RepeatedVertex {
        /// The face index.
        face: usize,
    },

    /// An optional attribute array does not match the element count.
    #[error("{attribute} has {actual} entries, expected {expected}")]
    AttributeLength {
        /// Attribute name.
        attribute: &'static str,
        /// Vertex or face count the attribute must match.
        expected: usize,
        /// Actual attribute length.
        actual: usize,
    },

    /// A vertex color has a component outside [0, 1].
    #[error("color of vertex {vertex} has a component outside [0, 1]")]
    ColorOutOfRange {
        /// The vertex index.
        vertex: usize,
    },

    /// The topology was built for a different mesh.
    #[error(
        "topology covers {topology_vertices} vertices / {topology_faces} faces, \
         mesh has {mesh_vertices} / {mesh_faces}; rebuild it"
    )]
    StaleTopology {
        /// Vertex count recorded in the topology.
        topology_vertices: usize,
        /// Face count recorded in the topology.
        topology_faces: usize,
        /// Current vertex count of the mesh.
        mesh_vertices: usize,
        /// Current face count of the mesh.
        mesh_faces: usize,
    },

    /// A triangle collapsed to zero area during an iterative operation.
    #[error("face {face} became degenerate in iteration {iteration}")]
    DegenerateGeometry {
        /// Zero-based iteration in which the degeneracy was found.
        iteration: usize,
        /// The degenerate face.
        face: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
