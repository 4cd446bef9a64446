//! Per-triangle quantities shared by the normal, curvature and smoothing code.
//!
//! A [`Triangle`] is only constructed for faces with non-zero area, so every
//! cotangent and angle it carries is finite. Callers treat `None` from
//! [`Triangle::new`] as a degenerate face and skip its contribution.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::mesh::{FaceId, Mesh, MeshIndex};

/// Faces whose doubled area is below this fraction of the squared longest
/// edge are degenerate.
pub(crate) const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Cotangent of the angle between `u` and `v`.
///
/// Equals `dot(u, v) / sqrt(|u|²|v|² - dot(u, v)²)`, with the denominator
/// taken as the cross-product magnitude. Parallel or zero vectors yield an
/// infinite or NaN result; guard against degenerate triangles before calling.
///
/// ```
/// use tessera::algo::curvature::cotangent;
/// use nalgebra::Vector3;
///
/// let c = cotangent(&Vector3::x(), &Vector3::new(1.0, 1.0, 0.0));
/// assert!((c - 1.0).abs() < 1e-12); // 45 degrees
/// ```
#[inline]
pub fn cotangent(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    u.dot(v) / u.cross(v).norm()
}

/// Geometry of one non-degenerate triangle.
///
/// Corner `i` is opposite the edge between corners `i + 1` and `i + 2`
/// (mod 3).
#[derive(Debug, Clone)]
pub(crate) struct Triangle {
    pub corners: [Point3<f64>; 3],
    /// Cotangent of the interior angle at each corner.
    pub cot: [f64; 3],
    /// Interior angle at each corner, in [0, π].
    pub angles: [f64; 3],
    pub area: f64,
    /// Unit normal, counter-clockwise orientation.
    pub normal: Vector3<f64>,
}

impl Triangle {
    /// Returns `None` for zero-area or non-finite triangles.
    pub fn new(corners: [Point3<f64>; 3]) -> Option<Self> {
        let [a, b, c] = corners;
        let cross = (b - a).cross(&(c - a));
        let double_area = cross.norm();

        let longest_sq = (b - a)
            .norm_squared()
            .max((c - b).norm_squared())
            .max((a - c).norm_squared());
        if !(double_area > DEGENERACY_TOLERANCE * longest_sq) || !double_area.is_finite() {
            return None;
        }

        let mut cot = [0.0; 3];
        let mut angles = [0.0; 3];
        for i in 0..3 {
            let p = corners[i];
            let to_next = corners[(i + 1) % 3] - p;
            let to_prev = corners[(i + 2) % 3] - p;
            let dot = to_next.dot(&to_prev);
            // |to_next x to_prev| is the doubled area at every corner.
            cot[i] = dot / double_area;
            angles[i] = double_area.atan2(dot);
        }

        Some(Self {
            corners,
            cot,
            angles,
            area: 0.5 * double_area,
            normal: cross / double_area,
        })
    }

    /// Index of the corner with an angle above π/2, if any.
    #[inline]
    pub fn obtuse_corner(&self) -> Option<usize> {
        self.cot.iter().position(|&c| c < 0.0)
    }

    /// Mixed Voronoi area assigned to each corner.
    ///
    /// Non-obtuse triangles split into their Voronoi regions; an obtuse
    /// triangle gives half its area to the obtuse corner and a quarter to
    /// each of the others.
    pub fn mixed_areas(&self) -> [f64; 3] {
        match self.obtuse_corner() {
            Some(o) => {
                let mut areas = [self.area / 4.0; 3];
                areas[o] = self.area / 2.0;
                areas
            }
            None => std::array::from_fn(|i| {
                let j = (i + 1) % 3;
                let k = (i + 2) % 3;
                let p = self.corners[i];
                let ij_sq = (self.corners[j] - p).norm_squared();
                let ik_sq = (self.corners[k] - p).norm_squared();
                (ik_sq * self.cot[j] + ij_sq * self.cot[k]) / 8.0
            }),
        }
    }

    /// Cotangent-weighted edge sum at each corner,
    /// `cot(k) (x_i - x_j) + cot(j) (x_i - x_k)`.
    ///
    /// Summed over the faces around a vertex this is twice the area-weighted
    /// mean curvature normal, pointing out of convex regions.
    pub fn curvature_contributions(&self) -> [Vector3<f64>; 3] {
        std::array::from_fn(|i| {
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;
            let p = self.corners[i];
            (p - self.corners[j]) * self.cot[k] + (p - self.corners[k]) * self.cot[j]
        })
    }

    /// Sum of the two cotangent weights of the edges leaving each corner.
    #[inline]
    pub fn cotangent_weights(&self) -> [f64; 3] {
        std::array::from_fn(|i| self.cot[(i + 1) % 3] + self.cot[(i + 2) % 3])
    }
}

/// Triangle geometry for every face, `None` where the face is degenerate.
pub(crate) fn mesh_triangles<I: MeshIndex>(mesh: &Mesh<I>, parallel: bool) -> Vec<Option<Triangle>> {
    let build = |fi: usize| Triangle::new(mesh.face_positions(FaceId::new(fi)));
    if parallel {
        (0..mesh.num_faces()).into_par_iter().map(build).collect()
    } else {
        (0..mesh.num_faces()).map(build).collect()
    }
}

/// A vector and a scalar summed per vertex over its incident faces.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CornerSum {
    pub vector: Vector3<f64>,
    pub scalar: f64,
}

impl CornerSum {
    pub fn zero() -> Self {
        Self {
            vector: Vector3::zeros(),
            scalar: 0.0,
        }
    }
}

/// Scatter per-corner values of every non-degenerate face onto its vertices.
///
/// In parallel mode each worker sums into a private buffer and the buffers
/// are added at the end, so no two threads write the same vertex.
pub(crate) fn scatter_corners<I, F>(
    mesh: &Mesh<I>,
    triangles: &[Option<Triangle>],
    parallel: bool,
    corner_values: F,
) -> Vec<CornerSum>
where
    I: MeshIndex,
    F: Fn(&Triangle) -> [CornerSum; 3] + Sync + Send,
{
    let n = mesh.num_vertices();
    let scatter = |mut acc: Vec<CornerSum>, fi: usize| {
        if let Some(tri) = &triangles[fi] {
            let values = corner_values(tri);
            for (i, v) in mesh.faces()[fi].iter().enumerate() {
                let a = &mut acc[v.index()];
                a.vector += values[i].vector;
                a.scalar += values[i].scalar;
            }
        }
        acc
    };

    if parallel {
        (0..triangles.len())
            .into_par_iter()
            .fold(|| vec![CornerSum::zero(); n], scatter)
            .reduce(
                || vec![CornerSum::zero(); n],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        x.vector += y.vector;
                        x.scalar += y.scalar;
                    }
                    a
                },
            )
    } else {
        (0..triangles.len()).fold(vec![CornerSum::zero(); n], scatter)
    }
}

/// Ids of the faces without triangle geometry.
pub(crate) fn degenerate_faces<I: MeshIndex>(triangles: &[Option<Triangle>]) -> Vec<FaceId<I>> {
    triangles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_none())
        .map(|(fi, _)| FaceId::new(fi))
        .collect()
}
