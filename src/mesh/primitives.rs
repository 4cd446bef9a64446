//! Procedural test meshes.
//!
//! Small generators used by the tests, the benchmarks and the CLI. All
//! triangles are counter-clockwise when seen from outside (or from +z for the
//! grids).

use std::collections::HashMap;
use std::f64::consts::PI;

use nalgebra::Point3;

use super::index::MeshIndex;
use super::store::Mesh;
use crate::error::{MeshError, Result};

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> Vec<Point3<f64>> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let scale = 1.0 / (1.0 + phi * phi).sqrt();

    vec![
        Point3::new(-1.0, phi, 0.0) * scale,
        Point3::new(1.0, phi, 0.0) * scale,
        Point3::new(-1.0, -phi, 0.0) * scale,
        Point3::new(1.0, -phi, 0.0) * scale,
        Point3::new(0.0, -1.0, phi) * scale,
        Point3::new(0.0, 1.0, phi) * scale,
        Point3::new(0.0, -1.0, -phi) * scale,
        Point3::new(0.0, 1.0, -phi) * scale,
        Point3::new(phi, 0.0, -1.0) * scale,
        Point3::new(phi, 0.0, 1.0) * scale,
        Point3::new(-phi, 0.0, -1.0) * scale,
        Point3::new(-phi, 0.0, 1.0) * scale,
    ]
}

/// Regular icosahedron inscribed in the unit sphere (12 vertices, 20 faces).
pub fn icosahedron<I: MeshIndex>() -> Result<Mesh<I>> {
    Mesh::from_triangles(&icosahedron_vertices(), &ICOSAHEDRON_FACES)
}

/// Unit sphere approximated by a subdivided icosahedron.
///
/// Each subdivision splits every triangle into four and projects the new
/// edge midpoints onto the sphere, giving `10 * 4^n + 2` vertices.
pub fn icosphere<I: MeshIndex>(subdivisions: usize) -> Result<Mesh<I>> {
    let mut vertices = icosahedron_vertices();
    let mut faces = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut new_faces = Vec::with_capacity(faces.len() * 4);
        let mut edge_midpoints: HashMap<(usize, usize), usize> = HashMap::new();

        for face in &faces {
            let mut mids = [0usize; 3];

            for i in 0..3 {
                let v0 = face[i];
                let v1 = face[(i + 1) % 3];
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };

                mids[i] = *edge_midpoints.entry(key).or_insert_with(|| {
                    let mid = (vertices[v0].coords + vertices[v1].coords) / 2.0;
                    vertices.push(Point3::from(mid.normalize()));
                    vertices.len() - 1
                });
            }

            new_faces.push([face[0], mids[0], mids[2]]);
            new_faces.push([face[1], mids[1], mids[0]]);
            new_faces.push([face[2], mids[2], mids[1]]);
            new_faces.push([mids[0], mids[1], mids[2]]);
        }

        faces = new_faces;
    }

    Mesh::from_triangles(&vertices, &faces)
}

/// Flat `n x n` grid of quads split into triangles, spanning
/// `[0, size] x [0, size]` in the z = 0 plane.
pub fn plane_grid<I: MeshIndex>(n: usize, size: f64) -> Result<Mesh<I>> {
    jagged_grid(n, size, 0.0)
}

/// Like [`plane_grid`], with interior vertices lifted alternately to
/// `+amplitude` and `-amplitude` in a checkerboard pattern.
///
/// Border vertices stay at z = 0. This is the highest-frequency noise the
/// grid can carry, which makes it a convenient smoothing input.
pub fn jagged_grid<I: MeshIndex>(n: usize, size: f64, amplitude: f64) -> Result<Mesh<I>> {
    if n == 0 {
        return Err(MeshError::invalid_param("n", n, "grid needs at least one cell"));
    }
    if !(size.is_finite() && size > 0.0) {
        return Err(MeshError::invalid_param("size", size, "must be positive"));
    }

    let step = size / n as f64;
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            let interior = i > 0 && i < n && j > 0 && j < n;
            let z = if interior {
                if (i + j) % 2 == 0 {
                    amplitude
                } else {
                    -amplitude
                }
            } else {
                0.0
            };
            vertices.push(Point3::new(i as f64 * step, j as f64 * step, z));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    Mesh::from_triangles(&vertices, &faces)
}

/// Open cylinder of radius 1 along z, with `segments` around and `rings`
/// quad rows of height `2π / segments`.
///
/// Both rims are borders. Interior vertices have Gaussian curvature 0 and
/// mean curvature 1/2.
pub fn open_cylinder<I: MeshIndex>(segments: usize, rings: usize) -> Result<Mesh<I>> {
    if segments < 3 {
        return Err(MeshError::invalid_param("segments", segments, "need at least 3"));
    }
    if rings == 0 {
        return Err(MeshError::invalid_param("rings", rings, "need at least 1"));
    }

    let height = 2.0 * PI / segments as f64;
    let mut vertices = Vec::with_capacity(segments * (rings + 1));
    let mut faces = Vec::with_capacity(segments * rings * 2);

    for r in 0..=rings {
        for s in 0..segments {
            let theta = 2.0 * PI * s as f64 / segments as f64;
            vertices.push(Point3::new(theta.cos(), theta.sin(), r as f64 * height));
        }
    }

    for r in 0..rings {
        for s in 0..segments {
            let v00 = r * segments + s;
            let v10 = r * segments + (s + 1) % segments;
            let v01 = v00 + segments;
            let v11 = v10 + segments;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    Mesh::from_triangles(&vertices, &faces)
}
