//! Discrete curvature estimation on triangle meshes.
//!
//! # Curvature Types
//!
//! - **Normal curvature vector**: the cotangent-weighted Laplace-Beltrami of
//!   the position, `Σ (cot α + cot β)(x_i - x_j) / (2 A_mixed)`. It
//!   approximates `2H n`; on a convex closed surface with counter-clockwise
//!   faces it points outward.
//! - **Gaussian curvature K**: angle defect `(2π - Σθ) / A_mixed`.
//! - **Mean curvature H**: half the length of the normal curvature vector,
//!   signed by its direction relative to the vertex normal.
//! - **Principal curvatures k1, k2**: `H ± sqrt(H² - K)`.
//!
//! `A_mixed` is the mixed Voronoi area: Voronoi regions for non-obtuse
//! triangles, and half/quarter splits of the triangle area for obtuse ones.
//!
//! Curvature is undefined on open boundaries and non-manifold edges, so
//! border vertices (see [`Topology::is_border_vertex`]) report zero, as do
//! isolated vertices. Degenerate faces are skipped and listed in the result.
//!
//! Every estimator rejects a topology built for a different mesh and a mesh
//! that fails [`Mesh::validate`], e.g. one whose attributes fell out of step
//! with its vertices.
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::curvature::compute_curvature;
//!
//! let mesh: Mesh = tessera::mesh::primitives::icosphere(2).unwrap();
//! let topology = Topology::build(&mesh);
//! let result = compute_curvature(&mesh, &topology).unwrap();
//!
//! let v = VertexId::new(0);
//! assert!(result.gaussian(v) > 0.5);
//! assert!(result.mean(v) > 0.5);
//! let (k1, k2) = result.principal(v);
//! assert!(k1 >= k2);
//! ```
//!
//! # References
//!
//! - Meyer, M., Desbrun, M., Schröder, P., Barr, A. H. (2003). "Discrete
//!   Differential-Geometry Operators for Triangulated 2-Manifolds."
//!   Visualization and Mathematics III.

use std::f64::consts::PI;

use nalgebra::Vector3;
use rayon::prelude::*;

use super::normals::vertex_normals;
use super::triangle::{degenerate_faces, mesh_triangles, scatter_corners, CornerSum, Triangle};
use crate::error::Result;
use crate::mesh::{FaceId, Mesh, MeshIndex, Topology, VertexId};

pub use super::triangle::cotangent;

/// A per-vertex estimate together with the faces that had to be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexField<T, I: MeshIndex = u32> {
    /// One value per vertex, indexed by vertex id.
    pub values: Vec<T>,
    /// Faces with zero area that did not contribute.
    pub degenerate_faces: Vec<FaceId<I>>,
}

impl<T: Copy, I: MeshIndex> VertexField<T, I> {
    /// Value at a vertex.
    #[inline]
    pub fn get(&self, v: VertexId<I>) -> T {
        self.values[v.index()]
    }

    /// True if some faces were skipped.
    #[inline]
    pub fn has_degenerate_faces(&self) -> bool {
        !self.degenerate_faces.is_empty()
    }
}

/// Result of a full curvature computation.
#[derive(Debug, Clone)]
pub struct CurvatureField<I: MeshIndex = u32> {
    normal: Vec<Vector3<f64>>,
    gaussian: Vec<f64>,
    mean: Vec<f64>,
    principal_max: Vec<f64>,
    principal_min: Vec<f64>,
    mixed_area: Vec<f64>,
    degenerate_faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> CurvatureField<I> {
    /// Normal curvature vector at a vertex.
    #[inline]
    pub fn normal_curvature(&self, v: VertexId<I>) -> Vector3<f64> {
        self.normal[v.index()]
    }

    /// Gaussian curvature at a vertex.
    #[inline]
    pub fn gaussian(&self, v: VertexId<I>) -> f64 {
        self.gaussian[v.index()]
    }

    /// Signed mean curvature at a vertex.
    #[inline]
    pub fn mean(&self, v: VertexId<I>) -> f64 {
        self.mean[v.index()]
    }

    /// Principal curvatures at a vertex, `(k1, k2)` with `k1 >= k2`.
    #[inline]
    pub fn principal(&self, v: VertexId<I>) -> (f64, f64) {
        (self.principal_max[v.index()], self.principal_min[v.index()])
    }

    /// Mixed Voronoi area of a vertex. Also filled in for border vertices.
    #[inline]
    pub fn mixed_area(&self, v: VertexId<I>) -> f64 {
        self.mixed_area[v.index()]
    }

    /// All normal curvature vectors.
    #[inline]
    pub fn normal_curvature_values(&self) -> &[Vector3<f64>] {
        &self.normal
    }

    /// All Gaussian curvatures.
    #[inline]
    pub fn gaussian_values(&self) -> &[f64] {
        &self.gaussian
    }

    /// All mean curvatures.
    #[inline]
    pub fn mean_values(&self) -> &[f64] {
        &self.mean
    }

    /// All mixed areas.
    #[inline]
    pub fn mixed_areas(&self) -> &[f64] {
        &self.mixed_area
    }

    /// Faces skipped as degenerate.
    #[inline]
    pub fn degenerate_faces(&self) -> &[FaceId<I>] {
        &self.degenerate_faces
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.gaussian.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gaussian.is_empty()
    }

    /// Shape index `(2/π) atan((k1 + k2) / (k1 - k2))`.
    ///
    /// Range: [-1, 1], where -1 = cup, 0 = saddle, 1 = cap
    pub fn shape_index(&self, v: VertexId<I>) -> f64 {
        let (k1, k2) = self.principal(v);
        let diff = k1 - k2;
        if diff.abs() < 1e-10 {
            // Umbilic: a cap or cup unless the point is flat.
            if k1.abs() < 1e-10 {
                0.0
            } else {
                k1.signum()
            }
        } else {
            (2.0 / PI) * ((k1 + k2) / diff).atan()
        }
    }

    /// Curvedness `sqrt((k1² + k2²) / 2)`.
    pub fn curvedness(&self, v: VertexId<I>) -> f64 {
        let (k1, k2) = self.principal(v);
        ((k1 * k1 + k2 * k2) / 2.0).sqrt()
    }
}

/// Sum the cotangent Laplacian (vector) and the mixed area (scalar) of
/// every vertex.
fn accumulate<I: MeshIndex>(
    mesh: &Mesh<I>,
    triangles: &[Option<Triangle>],
    parallel: bool,
) -> Vec<CornerSum> {
    scatter_corners(mesh, triangles, parallel, |tri| {
        let contributions = tri.curvature_contributions();
        let areas = tri.mixed_areas();
        std::array::from_fn(|i| CornerSum {
            vector: contributions[i],
            scalar: areas[i],
        })
    })
}

fn curvature_vector(acc: &CornerSum, defined: bool) -> Vector3<f64> {
    if !defined || acc.scalar <= 0.0 {
        return Vector3::zeros();
    }
    let k = acc.vector / (2.0 * acc.scalar);
    if k.iter().all(|x| x.is_finite()) {
        k
    } else {
        Vector3::zeros()
    }
}

/// Angle-defect Gaussian curvature of one vertex, gathered from its faces.
fn vertex_gaussian<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
    triangles: &[Option<Triangle>],
    v: VertexId<I>,
) -> f64 {
    if topology.is_isolated(v) || topology.is_border_vertex(v) {
        return 0.0;
    }

    let mut angle_sum = 0.0;
    let mut area = 0.0;
    for &f in topology.neighbor_faces(v) {
        let Some(tri) = &triangles[f.index()] else {
            continue;
        };
        let Some(corner) = mesh.face(f).iter().position(|&u| u == v) else {
            continue;
        };
        angle_sum += tri.angles[corner];
        area += tri.mixed_areas()[corner];
    }

    if area > 0.0 {
        (2.0 * PI - angle_sum) / area
    } else {
        0.0
    }
}

fn map_vertices<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

fn log_degenerate<I: MeshIndex>(faces: &[FaceId<I>], what: &str) {
    if !faces.is_empty() {
        log::warn!("skipped {} degenerate faces while computing {}", faces.len(), what);
    }
}

/// Compute the normal curvature vector of every vertex.
///
/// Border and isolated vertices get the zero vector.
///
/// This function uses parallel computation by default. Use
/// [`normal_curvature_sequential`] for single-threaded execution.
pub fn normal_curvature<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<VertexField<Vector3<f64>, I>> {
    normal_curvature_impl(mesh, topology, true)
}

/// Compute the normal curvature vector of every vertex (sequential version).
pub fn normal_curvature_sequential<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<VertexField<Vector3<f64>, I>> {
    normal_curvature_impl(mesh, topology, false)
}

fn normal_curvature_impl<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
    parallel: bool,
) -> Result<VertexField<Vector3<f64>, I>> {
    topology.ensure_consistent_with(mesh)?;
    mesh.validate()?;

    let triangles = mesh_triangles(mesh, parallel);
    let acc = accumulate(mesh, &triangles, parallel);
    let values = map_vertices(mesh.num_vertices(), parallel, |i| {
        let v = VertexId::new(i);
        curvature_vector(&acc[i], !topology.is_border_vertex(v))
    });

    let degenerate_faces = degenerate_faces(&triangles);
    log_degenerate(&degenerate_faces, "normal curvature");
    Ok(VertexField {
        values,
        degenerate_faces,
    })
}

/// Compute Gaussian curvature for all vertices.
///
/// Uses the angle defect formula `K = (2π - Σθ) / A_mixed`. Border and
/// isolated vertices get zero.
///
/// This function uses parallel computation by default. Use
/// [`gaussian_curvature_sequential`] for single-threaded execution.
pub fn gaussian_curvature<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<VertexField<f64, I>> {
    gaussian_curvature_impl(mesh, topology, true)
}

/// Compute Gaussian curvature for all vertices (sequential version).
pub fn gaussian_curvature_sequential<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<VertexField<f64, I>> {
    gaussian_curvature_impl(mesh, topology, false)
}

fn gaussian_curvature_impl<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
    parallel: bool,
) -> Result<VertexField<f64, I>> {
    topology.ensure_consistent_with(mesh)?;
    mesh.validate()?;

    let triangles = mesh_triangles(mesh, parallel);
    let values = map_vertices(mesh.num_vertices(), parallel, |i| {
        vertex_gaussian(mesh, topology, &triangles, VertexId::new(i))
    });

    let degenerate_faces = degenerate_faces(&triangles);
    log_degenerate(&degenerate_faces, "Gaussian curvature");
    Ok(VertexField {
        values,
        degenerate_faces,
    })
}

/// Compute all curvature quantities at once.
///
/// Shares the triangle geometry between the estimators, which is cheaper
/// than calling them one by one.
///
/// This function uses parallel computation by default. Use
/// [`compute_curvature_sequential`] for single-threaded execution.
pub fn compute_curvature<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<CurvatureField<I>> {
    compute_curvature_impl(mesh, topology, true)
}

/// Compute all curvature quantities (sequential version).
pub fn compute_curvature_sequential<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
) -> Result<CurvatureField<I>> {
    compute_curvature_impl(mesh, topology, false)
}

/// Per-vertex curvature data computed in parallel.
#[derive(Debug, Clone, Copy)]
struct VertexCurvature {
    normal: Vector3<f64>,
    gaussian: f64,
    mean: f64,
    principal_max: f64,
    principal_min: f64,
}

fn compute_curvature_impl<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
    parallel: bool,
) -> Result<CurvatureField<I>> {
    topology.ensure_consistent_with(mesh)?;
    mesh.validate()?;

    let n = mesh.num_vertices();
    let triangles = mesh_triangles(mesh, parallel);
    let acc = accumulate(mesh, &triangles, parallel);
    let normals = vertex_normals(mesh, &triangles, parallel);

    let results = map_vertices(n, parallel, |i| {
        let v = VertexId::new(i);
        let defined = !topology.is_isolated(v) && !topology.is_border_vertex(v);

        let normal = curvature_vector(&acc[i], defined);
        let k = if defined {
            vertex_gaussian(mesh, topology, &triangles, v)
        } else {
            0.0
        };

        let h_unsigned = normal.norm() / 2.0;
        let h = if normal.dot(&normals[i]) >= 0.0 {
            h_unsigned
        } else {
            -h_unsigned
        };

        // k1, k2 = H ± sqrt(H² - K)
        let discriminant = h * h - k;
        let (principal_max, principal_min) = if discriminant >= 0.0 {
            let sqrt_disc = discriminant.sqrt();
            (h + sqrt_disc, h - sqrt_disc)
        } else {
            // Discretization error can push K slightly above H².
            (h, h)
        };

        VertexCurvature {
            normal,
            gaussian: k,
            mean: h,
            principal_max,
            principal_min,
        }
    });

    let mut field = CurvatureField {
        normal: Vec::with_capacity(n),
        gaussian: Vec::with_capacity(n),
        mean: Vec::with_capacity(n),
        principal_max: Vec::with_capacity(n),
        principal_min: Vec::with_capacity(n),
        mixed_area: acc.iter().map(|a| a.scalar).collect(),
        degenerate_faces: degenerate_faces(&triangles),
    };
    for vc in results {
        field.normal.push(vc.normal);
        field.gaussian.push(vc.gaussian);
        field.mean.push(vc.mean);
        field.principal_max.push(vc.principal_max);
        field.principal_min.push(vc.principal_min);
    }

    log_degenerate(&field.degenerate_faces, "curvature");
    log::debug!("computed curvature for {} vertices", n);
    Ok(field)
}
