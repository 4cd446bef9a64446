//! Core mesh data structures.
//!
//! # Overview
//!
//! A [`Mesh`] is a plain face-vertex triangle list with optional per-vertex
//! and per-face attributes. Adjacency is derived separately into a
//! [`Topology`], which the curvature and smoothing algorithms take alongside
//! the mesh. Keeping the two apart lets non-manifold input through unchanged:
//! nothing here requires edges to have at most two faces.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait).
//!
//! # Construction
//!
//! ```
//! use tessera::mesh::{Mesh, Topology};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! let topology = Topology::build(&mesh);
//! assert_eq!(topology.border_vertices().len(), 3);
//! ```

mod index;
pub mod primitives;
mod store;
mod topology;

pub use index::{FaceId, MeshIndex, VertexId};
pub use store::Mesh;
pub use topology::Topology;
