//! Mesh processing algorithms.
//!
//! - **Normals**: face normals and unweighted vertex normals
//! - **Curvature**: normal curvature vector, Gaussian, mean and principal
//!   curvatures from the cotangent and angle-defect operators
//! - **Smoothing**: uniform Laplacian smoothing, normalized curvature flow
//!
//! The estimators take a [`Mesh`](crate::mesh::Mesh) and, where adjacency is
//! needed, a [`Topology`](crate::mesh::Topology) built from it. Every
//! estimator has a parallel entry point and a `_sequential` variant.

pub mod curvature;
pub mod normals;
pub mod progress;
pub mod smooth;
mod triangle;

pub use progress::Progress;
