//! # Tessera
//!
//! Differential geometry on triangle meshes: adjacency, normals, discrete
//! curvature and smoothing.
//!
//! A [`Mesh`](mesh::Mesh) is a face-vertex triangle list with optional
//! per-vertex and per-face attributes. A [`Topology`](mesh::Topology) derived
//! from it holds the neighbor sets and border information the estimators
//! need. Loading and saving meshes is left to the caller.
//!
//! ## Features
//!
//! - **Flexible indexing**: type-safe vertex and face ids over 16-, 32- or
//!   64-bit integers
//! - **Normals**: per-face and per-vertex, with degenerate faces reported
//! - **Curvature**: cotangent normal curvature, angle-defect Gaussian
//!   curvature, mean and principal curvatures over mixed Voronoi areas
//! - **Smoothing**: uniform Laplacian and normalized curvature flow with
//!   fixed border vertices
//! - **Parallel**: every estimator runs on rayon, with a sequential variant
//!
//! ## Quick Start
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::curvature::compute_curvature;
//! use tessera::algo::normals::update_normals;
//!
//! let mut mesh: Mesh = tessera::mesh::primitives::icosphere(2).unwrap();
//! let topology = Topology::build(&mesh);
//!
//! update_normals(&mut mesh).unwrap();
//! let curvature = compute_curvature(&mesh, &topology).unwrap();
//!
//! for v in mesh.vertex_ids().take(3) {
//!     println!("{:?}: K = {:.3}, H = {:.3}", v, curvature.gaussian(v), curvature.mean(v));
//! }
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! let mesh: Mesh = Mesh::from_triangles(&vertices, &faces).unwrap();
//! let topology = Topology::build(&mesh);
//! assert_eq!(topology.valence(VertexId::new(0)), 3);
//! assert!(topology.border_vertices().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types:
///
/// ```
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{FaceId, Mesh, MeshIndex, Topology, VertexId};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
