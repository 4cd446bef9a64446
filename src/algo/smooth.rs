//! Mesh smoothing.
//!
//! Two explicit, iterative smoothing operators that displace vertex
//! positions in place:
//!
//! - [`uniform_laplacian_smooth`]: moves every vertex towards the mean of its
//!   neighbors.
//! - [`curvature_flow_smooth`]: moves every vertex along the
//!   cotangent-weighted Laplacian, normalized by the sum of its cotangent
//!   weights. Geometry is recomputed every iteration.
//!
//! Each iteration is synchronous: all displacements are computed from the
//! previous iteration's positions into a second buffer, which then replaces
//! the mesh positions. Border vertices are held fixed unless
//! [`SmoothOptions::allow_border_movement`] is set; isolated vertices never
//! move.
//!
//! Both operators only touch positions. Normals stored on the mesh and any
//! curvature computed before smoothing are stale afterwards; recompute them.
//!
//! # Stability
//!
//! The diffusion rate is used as given. Rates outside (0, 1] overshoot, and
//! repeated overshooting steps fold triangles over and self-intersect the
//! surface. Prefer more iterations to a larger rate.
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::smooth::{uniform_laplacian_smooth, SmoothOptions};
//!
//! let mut mesh: Mesh = tessera::mesh::primitives::jagged_grid(8, 1.0, 0.05).unwrap();
//! let topology = Topology::build(&mesh);
//!
//! let options = SmoothOptions::default().with_iterations(5);
//! let report = uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
//! assert_eq!(report.iterations_completed, 5);
//! ```

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::triangle::{mesh_triangles, scatter_corners, CornerSum};
use super::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, Mesh, MeshIndex, Topology, VertexId};

const UNIFORM_STAGE: &str = "Uniform Laplacian smoothing";
const FLOW_STAGE: &str = "Curvature flow smoothing";

/// Options for mesh smoothing.
#[derive(Debug, Clone)]
pub struct SmoothOptions {
    /// Number of smoothing iterations.
    pub iterations: usize,

    /// Fraction of the computed displacement applied per iteration.
    /// Not clamped; see the module docs on stability.
    pub diffusion_rate: f64,

    /// Whether to hold border vertices fixed.
    pub preserve_border: bool,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            diffusion_rate: 0.5,
            preserve_border: true,
            parallel: true,
        }
    }
}

impl SmoothOptions {
    /// Create options with the specified number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create options with the specified diffusion rate.
    pub fn with_diffusion_rate(mut self, diffusion_rate: f64) -> Self {
        self.diffusion_rate = diffusion_rate;
        self
    }

    /// Create options that allow border vertices to move.
    pub fn allow_border_movement(mut self) -> Self {
        self.preserve_border = false;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that the options can be used.
    ///
    /// Only a non-finite diffusion rate is rejected.
    pub fn validate(&self) -> Result<()> {
        if !self.diffusion_rate.is_finite() {
            return Err(MeshError::invalid_param(
                "diffusion_rate",
                self.diffusion_rate,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Where a curvature-flow run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateStep<I: MeshIndex = u32> {
    /// Zero-based iteration that was not applied.
    pub iteration: usize,
    /// First degenerate face found in that iteration.
    pub face: FaceId<I>,
}

/// Outcome of a smoothing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothReport<I: MeshIndex = u32> {
    /// Iterations whose displacements were applied to the mesh.
    pub iterations_completed: usize,
    /// Largest single-vertex displacement over all applied iterations.
    pub max_displacement: f64,
    /// Set when the run stopped early on a degenerate face.
    pub halted: Option<DegenerateStep<I>>,
}

impl<I: MeshIndex> SmoothReport<I> {
    fn new() -> Self {
        Self {
            iterations_completed: 0,
            max_displacement: 0.0,
            halted: None,
        }
    }

    fn record_step(&mut self, max_displacement: f64) {
        self.iterations_completed += 1;
        self.max_displacement = self.max_displacement.max(max_displacement);
    }

    /// True if every requested iteration ran.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    /// Convert an early halt into [`MeshError::DegenerateGeometry`].
    ///
    /// The mesh still holds the positions of the completed iterations.
    pub fn into_result(self) -> Result<Self> {
        match self.halted {
            Some(step) => Err(MeshError::DegenerateGeometry {
                iteration: step.iteration,
                face: step.face.index(),
            }),
            None => Ok(self),
        }
    }
}

/// Performs uniform Laplacian smoothing.
///
/// Each iteration moves every free vertex by
/// `diffusion_rate * (mean of neighbor positions - position)`.
/// Runs exactly `options.iterations` iterations; there is no convergence
/// check.
///
/// # Errors
///
/// Returns an error if the topology does not match the mesh, the mesh
/// fails [`Mesh::validate`] or the diffusion rate is not finite. The mesh
/// is untouched in that case.
///
/// # Example
///
/// ```
/// use tessera::prelude::*;
/// use tessera::algo::smooth::{uniform_laplacian_smooth, SmoothOptions};
///
/// let mut mesh: Mesh = tessera::mesh::primitives::icosphere(1).unwrap();
/// let topology = Topology::build(&mesh);
///
/// let options = SmoothOptions::default()
///     .with_iterations(3)
///     .with_diffusion_rate(0.3);
/// let report = uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
/// assert!(report.is_complete());
/// ```
pub fn uniform_laplacian_smooth<I: MeshIndex>(
    mesh: &mut Mesh<I>,
    topology: &Topology<I>,
    options: &SmoothOptions,
) -> Result<SmoothReport<I>> {
    uniform_laplacian_smooth_with_progress(mesh, topology, options, &Progress::none())
}

/// Uniform Laplacian smoothing with progress reporting.
pub fn uniform_laplacian_smooth_with_progress<I: MeshIndex>(
    mesh: &mut Mesh<I>,
    topology: &Topology<I>,
    options: &SmoothOptions,
    progress: &Progress,
) -> Result<SmoothReport<I>> {
    let fixed = prepare(mesh, topology, options)?;
    let rate = options.diffusion_rate;
    let mut next = mesh.positions().to_vec();
    let mut report = SmoothReport::new();

    for iteration in 0..options.iterations {
        progress.report(iteration, options.iterations, UNIFORM_STAGE);

        let current = mesh.positions();
        let step = apply_step(current, &mut next, options.parallel, |v| {
            let neighbors = topology.neighbor_vertices(VertexId::new(v));
            if fixed[v] || neighbors.is_empty() {
                return None;
            }
            let sum = neighbors
                .iter()
                .fold(Vector3::zeros(), |acc, u| acc + current[u.index()].coords);
            let mean = sum / neighbors.len() as f64;
            Some((mean - current[v].coords) * rate)
        });

        std::mem::swap(mesh.positions_mut(), &mut next);
        report.record_step(step);
    }

    progress.report(options.iterations, options.iterations, UNIFORM_STAGE);
    log::debug!(
        "uniform Laplacian smoothing: {} iterations, max displacement {:e}",
        report.iterations_completed,
        report.max_displacement
    );
    Ok(report)
}

/// Performs normalized curvature-flow smoothing.
///
/// Each iteration recomputes the cotangents from the current positions and
/// moves every free vertex by
///
/// ```text
/// diffusion_rate * Σ (cot α_ij + cot β_ij)(x_j - x_i) / Σ (cot α_ij + cot β_ij)
/// ```
///
/// which points against the normal curvature vector, into the surface on
/// convex regions. Vertices whose weight sum vanishes stay in place.
///
/// If any face is degenerate at the start of an iteration, that iteration
/// is not applied and the run stops. The returned report records where;
/// call [`SmoothReport::into_result`] to treat this as an error.
///
/// # Errors
///
/// Returns an error if the topology does not match the mesh, the mesh
/// fails [`Mesh::validate`] or the diffusion rate is not finite. The mesh
/// is untouched in that case.
///
/// # Reference
///
/// Desbrun, M., et al. (1999). "Implicit fairing of irregular meshes using
/// diffusion and curvature flow." SIGGRAPH 99.
pub fn curvature_flow_smooth<I: MeshIndex>(
    mesh: &mut Mesh<I>,
    topology: &Topology<I>,
    options: &SmoothOptions,
) -> Result<SmoothReport<I>> {
    curvature_flow_smooth_with_progress(mesh, topology, options, &Progress::none())
}

/// Curvature-flow smoothing with progress reporting.
pub fn curvature_flow_smooth_with_progress<I: MeshIndex>(
    mesh: &mut Mesh<I>,
    topology: &Topology<I>,
    options: &SmoothOptions,
    progress: &Progress,
) -> Result<SmoothReport<I>> {
    let fixed = prepare(mesh, topology, options)?;
    let rate = options.diffusion_rate;
    let mut next = mesh.positions().to_vec();
    let mut report = SmoothReport::new();

    for iteration in 0..options.iterations {
        progress.report(iteration, options.iterations, FLOW_STAGE);

        let triangles = mesh_triangles(mesh, options.parallel);
        if let Some(fi) = triangles.iter().position(Option::is_none) {
            let face = FaceId::new(fi);
            log::warn!(
                "curvature flow halted in iteration {}: face {:?} is degenerate",
                iteration,
                face
            );
            report.halted = Some(DegenerateStep { iteration, face });
            break;
        }

        let sums = scatter_corners(mesh, &triangles, options.parallel, |tri| {
            let contributions = tri.curvature_contributions();
            let weights = tri.cotangent_weights();
            std::array::from_fn(|i| CornerSum {
                vector: -contributions[i],
                scalar: weights[i],
            })
        });

        let step = apply_step(mesh.positions(), &mut next, options.parallel, |v| {
            let sum = &sums[v];
            if fixed[v] || sum.scalar.abs() <= f64::EPSILON {
                return None;
            }
            let displacement = sum.vector * (rate / sum.scalar);
            displacement
                .iter()
                .all(|x| x.is_finite())
                .then_some(displacement)
        });

        std::mem::swap(mesh.positions_mut(), &mut next);
        report.record_step(step);
    }

    progress.report(report.iterations_completed, options.iterations, FLOW_STAGE);
    log::debug!(
        "curvature flow smoothing: {}/{} iterations, max displacement {:e}",
        report.iterations_completed,
        options.iterations,
        report.max_displacement
    );
    Ok(report)
}

/// Validate the inputs and build the fixed-vertex mask.
fn prepare<I: MeshIndex>(
    mesh: &Mesh<I>,
    topology: &Topology<I>,
    options: &SmoothOptions,
) -> Result<Vec<bool>> {
    options.validate()?;
    topology.ensure_consistent_with(mesh)?;
    mesh.validate()?;

    Ok(if options.preserve_border {
        topology.border_mask()
    } else {
        vec![false; mesh.num_vertices()]
    })
}

/// Write `current + displacement` into `next` for every vertex.
///
/// `None` copies the current position unchanged. Returns the largest
/// displacement length.
fn apply_step<F>(
    current: &[Point3<f64>],
    next: &mut [Point3<f64>],
    parallel: bool,
    displace: F,
) -> f64
where
    F: Fn(usize) -> Option<Vector3<f64>> + Sync + Send,
{
    let write = |(v, out): (usize, &mut Point3<f64>)| match displace(v) {
        Some(d) => {
            *out = current[v] + d;
            d.norm()
        }
        None => {
            *out = current[v];
            0.0
        }
    };

    if parallel {
        next.par_iter_mut()
            .enumerate()
            .map(write)
            .reduce(|| 0.0, f64::max)
    } else {
        next.iter_mut().enumerate().map(write).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::{icosphere, jagged_grid};
    use std::sync::{Arc, Mutex};

    fn max_height(mesh: &Mesh) -> f64 {
        mesh.positions().iter().map(|p| p.z.abs()).fold(0.0, f64::max)
    }

    fn max_radius(mesh: &Mesh) -> f64 {
        mesh.positions()
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Closed tetrahedron plus a collinear face glued to edge (0, 1).
    fn tetrahedron_with_sliver() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3], [0, 1, 4]];
        Mesh::from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_options_builders() {
        let options = SmoothOptions::default()
            .with_iterations(7)
            .with_diffusion_rate(2.5)
            .allow_border_movement()
            .sequential();

        assert_eq!(options.iterations, 7);
        assert_eq!(options.diffusion_rate, 2.5, "rate must not be clamped");
        assert!(!options.preserve_border);
        assert!(!options.parallel);
        assert!(options.validate().is_ok());
        assert!(options.with_parallel(true).parallel);
    }

    #[test]
    fn test_non_finite_rate_is_rejected() {
        let mut mesh: Mesh = icosphere(1).unwrap();
        let topology = Topology::build(&mesh);
        let original = mesh.positions().to_vec();

        for rate in [f64::NAN, f64::INFINITY] {
            let options = SmoothOptions::default().with_diffusion_rate(rate);
            assert!(matches!(
                uniform_laplacian_smooth(&mut mesh, &topology, &options),
                Err(MeshError::InvalidParameter { .. })
            ));
            assert!(curvature_flow_smooth(&mut mesh, &topology, &options).is_err());
        }
        assert_eq!(mesh.positions(), &original[..]);
    }

    #[test]
    fn test_stale_topology_is_rejected() {
        let mut mesh: Mesh = icosphere(1).unwrap();
        let topology = Topology::build(&mesh);
        mesh.push_vertex(Point3::origin()).unwrap();

        let options = SmoothOptions::default();
        assert!(matches!(
            uniform_laplacian_smooth(&mut mesh, &topology, &options),
            Err(MeshError::StaleTopology { .. })
        ));
        assert!(curvature_flow_smooth(&mut mesh, &topology, &options).is_err());
    }

    #[test]
    fn test_zero_rate_is_fixed_point() {
        let mut mesh: Mesh = jagged_grid(5, 1.0, 0.1).unwrap();
        let topology = Topology::build(&mesh);
        let original = mesh.positions().to_vec();

        let options = SmoothOptions::default()
            .with_iterations(10)
            .with_diffusion_rate(0.0);
        uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
        assert_eq!(mesh.positions(), &original[..]);

        let report = curvature_flow_smooth(&mut mesh, &topology, &options).unwrap();
        assert_eq!(mesh.positions(), &original[..]);
        assert_eq!(report.max_displacement, 0.0);
    }

    #[test]
    fn test_zero_iterations_no_change() {
        let mut mesh: Mesh = jagged_grid(4, 1.0, 0.1).unwrap();
        let topology = Topology::build(&mesh);
        let original = mesh.positions().to_vec();

        let options = SmoothOptions::default().with_iterations(0);
        let report = uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
        assert_eq!(report.iterations_completed, 0);
        let report = curvature_flow_smooth(&mut mesh, &topology, &options).unwrap();
        assert_eq!(report.iterations_completed, 0);
        assert!(report.is_complete());
        assert_eq!(mesh.positions(), &original[..]);
    }

    #[test]
    fn test_border_vertices_do_not_move() {
        let reference: Mesh = jagged_grid(6, 1.0, 0.05).unwrap();
        let topology = Topology::build(&reference);
        let border = topology.border_vertices();
        assert!(!border.is_empty());

        let options = SmoothOptions::default().with_iterations(10);
        let mut uniform = reference.clone();
        uniform_laplacian_smooth(&mut uniform, &topology, &options).unwrap();
        let mut flow = reference.clone();
        curvature_flow_smooth(&mut flow, &topology, &options).unwrap();

        for &v in &border {
            assert_eq!(uniform.position(v), reference.position(v), "{:?} moved", v);
            assert_eq!(flow.position(v), reference.position(v), "{:?} moved", v);
        }
    }

    #[test]
    fn test_border_moves_when_allowed() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mut mesh: Mesh = Mesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let topology = Topology::build(&mesh);

        let options = SmoothOptions::default().allow_border_movement();
        let report = uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
        assert!(report.max_displacement > 0.0);
        assert_ne!(mesh.positions(), &vertices[..]);
    }

    #[test]
    fn test_isolated_vertex_never_moves() {
        let mut reference: Mesh = jagged_grid(6, 1.0, 0.05).unwrap();
        let lone = reference.push_vertex(Point3::new(0.37, -2.5, 0.81)).unwrap();
        let topology = Topology::build(&reference);
        assert!(topology.is_isolated(lone));
        assert!(!topology.is_border_vertex(lone));

        for options in [
            SmoothOptions::default().with_iterations(5),
            SmoothOptions::default()
                .with_iterations(5)
                .allow_border_movement()
                .sequential(),
        ] {
            let mut uniform = reference.clone();
            uniform_laplacian_smooth(&mut uniform, &topology, &options).unwrap();
            let mut flow = reference.clone();
            curvature_flow_smooth(&mut flow, &topology, &options).unwrap();

            let original = reference.position(lone).coords;
            assert_eq!(uniform.position(lone).coords.as_slice(), original.as_slice());
            assert_eq!(flow.position(lone).coords.as_slice(), original.as_slice());
        }
    }

    #[test]
    fn test_mismatched_attributes_are_rejected() {
        let mut mesh: Mesh = jagged_grid(3, 1.0, 0.05).unwrap();
        let n = mesh.num_vertices();
        mesh.set_vertex_normals(vec![Vector3::z(); n]).unwrap();
        mesh.push_vertex(Point3::origin()).unwrap();
        let topology = Topology::build(&mesh);
        let original = mesh.positions().to_vec();

        let options = SmoothOptions::default();
        assert!(matches!(
            uniform_laplacian_smooth(&mut mesh, &topology, &options),
            Err(MeshError::AttributeLength { attribute: "vertex normals", .. })
        ));
        assert!(curvature_flow_smooth(&mut mesh, &topology, &options).is_err());
        assert_eq!(mesh.positions(), &original[..]);
    }

    #[test]
    fn test_smoothing_flattens_jagged_grid() {
        let reference: Mesh = jagged_grid(6, 1.0, 0.05).unwrap();
        let topology = Topology::build(&reference);
        let options = SmoothOptions::default().with_iterations(5);

        let mut uniform = reference.clone();
        let report = uniform_laplacian_smooth(&mut uniform, &topology, &options).unwrap();
        assert_eq!(report.iterations_completed, 5);
        assert!(report.max_displacement > 0.0);
        assert!(
            max_height(&uniform) < 0.01,
            "uniform smoothing left height {}",
            max_height(&uniform)
        );

        let mut flow = reference.clone();
        let report = curvature_flow_smooth(&mut flow, &topology, &options).unwrap();
        assert!(report.is_complete());
        assert!(
            max_height(&flow) < 0.01,
            "curvature flow left height {}",
            max_height(&flow)
        );
    }

    #[test]
    fn test_closed_sphere_shrinks() {
        let reference: Mesh = icosphere(1).unwrap();
        let topology = Topology::build(&reference);
        let options = SmoothOptions::default()
            .with_iterations(10)
            .with_diffusion_rate(0.1);

        let mut uniform = reference.clone();
        uniform_laplacian_smooth(&mut uniform, &topology, &options).unwrap();
        assert!(max_radius(&uniform) < 0.95, "radius {}", max_radius(&uniform));

        let mut flow = reference.clone();
        curvature_flow_smooth(&mut flow, &topology, &options).unwrap();
        assert!(max_radius(&flow) < 0.95, "radius {}", max_radius(&flow));
        assert!(flow.surface_area() < reference.surface_area());
    }

    #[test]
    fn test_flow_halts_on_degenerate_face() {
        let mut mesh = tetrahedron_with_sliver();
        let topology = Topology::build(&mesh);
        let original = mesh.positions().to_vec();

        let options = SmoothOptions::default().with_iterations(3);
        let report = curvature_flow_smooth(&mut mesh, &topology, &options).unwrap();

        assert_eq!(report.iterations_completed, 0);
        assert_eq!(
            report.halted,
            Some(DegenerateStep {
                iteration: 0,
                face: FaceId::new(4)
            })
        );
        assert_eq!(mesh.positions(), &original[..]);
        assert_eq!(
            report.into_result(),
            Err(MeshError::DegenerateGeometry {
                iteration: 0,
                face: 4
            })
        );

        // Uniform smoothing has no cotangents and runs through.
        let report = uniform_laplacian_smooth(&mut mesh, &topology, &options).unwrap();
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_flow_positions_stay_finite() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let mut mesh: Mesh = Mesh::from_triangles(&vertices, &faces).unwrap();
        let topology = Topology::build(&mesh);

        // Long enough for the tetrahedron to collapse.
        let options = SmoothOptions::default().with_iterations(50);
        let report = curvature_flow_smooth(&mut mesh, &topology, &options).unwrap();

        if let Some(step) = report.halted {
            assert_eq!(step.iteration, report.iterations_completed);
        }
        for p in mesh.positions() {
            assert!(p.iter().all(|x| x.is_finite()), "non-finite position {:?}", p);
        }
    }

    #[test]
    fn test_progress_reports_every_iteration() {
        let mut mesh: Mesh = jagged_grid(4, 1.0, 0.1).unwrap();
        let topology = Topology::build(&mesh);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });

        let options = SmoothOptions::default().with_iterations(3);
        curvature_flow_smooth_with_progress(&mut mesh, &topology, &options, &progress).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![(0, 3), (1, 3), (2, 3), (3, 3)]);

        calls.lock().unwrap().clear();
        uniform_laplacian_smooth_with_progress(&mut mesh, &topology, &options, &progress)
            .unwrap();
        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let reference: Mesh = jagged_grid(8, 1.0, 0.05).unwrap();
        let topology = Topology::build(&reference);
        let options = SmoothOptions::default().with_iterations(4);

        let mut par = reference.clone();
        let mut seq = reference.clone();
        uniform_laplacian_smooth(&mut par, &topology, &options).unwrap();
        uniform_laplacian_smooth(&mut seq, &topology, &options.clone().sequential()).unwrap();
        assert_eq!(par.positions(), seq.positions());

        let mut par = reference.clone();
        let mut seq = reference.clone();
        curvature_flow_smooth(&mut par, &topology, &options).unwrap();
        curvature_flow_smooth(&mut seq, &topology, &options.clone().sequential()).unwrap();
        for (a, b) in par.positions().iter().zip(seq.positions()) {
            assert!((a - b).norm() < 1e-10);
        }
    }
}
