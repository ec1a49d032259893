//! Face and vertex normal estimation for indexed triangle meshes.
//!
//! Face normals follow the grid's winding: for triangle `(p1, p2, p3)` the
//! normal is `normalize((p2 - p1) x (p3 - p1))`, which points towards +z for
//! every triangle `GridMesh::build` emits.

use bevy::math::Vec3;
use smallvec::SmallVec;

/// Incident triangles of one vertex. Interior grid vertices have six.
pub type Incidence = SmallVec<[u32; 6]>;

/// How incident face normals are combined into a vertex normal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalWeighting {
    /// Sum the unit face normals and normalize. Always unit length.
    #[default]
    Smooth,
    /// Normalize the sum, then divide by the number of incident triangles.
    /// Magnitude is `1 / count`, so only vertices with a single incident
    /// triangle end up unit length.
    DividedByCount,
}

/// Unit normal of every triangle, in triangle order.
pub fn face_normals(positions: &[[f32; 3]], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let p1 = Vec3::from(positions[a as usize]);
            let p2 = Vec3::from(positions[b as usize]);
            let p3 = Vec3::from(positions[c as usize]);

            let v1 = p3 - p1;
            let v2 = p2 - p1;
            v2.cross(v1).normalize_or_zero()
        })
        .collect()
}

/// For each vertex, the indices of the triangles that reference it.
pub fn vertex_adjacency(triangles: &[[u32; 3]], vertex_count: usize) -> Vec<Incidence> {
    let mut adjacency = vec![Incidence::new(); vertex_count];
    for (t, triangle) in triangles.iter().enumerate() {
        for &v in triangle {
            adjacency[v as usize].push(t as u32);
        }
    }
    adjacency
}

/// One normal per vertex from the faces around it.
///
/// Vertices not referenced by any triangle keep `(0, 0, 1)`.
pub fn compute_vertex_normals(
    positions: &[[f32; 3]],
    triangles: &[[u32; 3]],
    weighting: NormalWeighting,
) -> Vec<[f32; 3]> {
    let faces = face_normals(positions, triangles);
    let adjacency = vertex_adjacency(triangles, positions.len());

    adjacency
        .iter()
        .map(|incident| {
            if incident.is_empty() {
                return [0.0, 0.0, 1.0];
            }

            let sum: Vec3 = incident.iter().map(|&t| faces[t as usize]).sum();
            let normal = sum.normalize_or_zero();

            let normal = match weighting {
                NormalWeighting::Smooth => normal,
                NormalWeighting::DividedByCount => normal / incident.len() as f32,
            };
            normal.to_array()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::{Bounds, GridMesh};

    fn bumpy_grid(n: u32) -> GridMesh {
        let mut grid = GridMesh::build(n, &Bounds::default()).unwrap();
        for (k, p) in grid.positions.iter_mut().enumerate() {
            p[2] = ((k * 7919) % 13) as f32 * 0.1;
        }
        grid
    }

    #[test]
    fn flat_grid_faces_point_up() {
        let grid = GridMesh::build(3, &Bounds::default()).unwrap();
        for normal in face_normals(&grid.positions, &grid.triangles) {
            assert!((normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn incidence_matches_grid_topology() {
        let grid = GridMesh::build(4, &Bounds::default()).unwrap();
        let adjacency = vertex_adjacency(&grid.triangles, grid.vertex_count());
        let side = grid.side();

        // Corners on the split diagonal touch two triangles, the others one.
        assert_eq!(adjacency[0].len(), 1);
        assert_eq!(adjacency[side - 1].len(), 2);
        assert_eq!(adjacency[side * (side - 1)].len(), 2);
        assert_eq!(adjacency[side * side - 1].len(), 1);
        // Interior vertex.
        assert_eq!(adjacency[2 * side + 2].len(), 6);
        assert!(adjacency.iter().all(|a| !a.is_empty() && a.len() <= 6));
    }

    #[test]
    fn smooth_normals_are_unit_and_upward() {
        let grid = bumpy_grid(8);
        let normals =
            compute_vertex_normals(&grid.positions, &grid.triangles, NormalWeighting::Smooth);
        assert_eq!(normals.len(), grid.vertex_count());
        for n in normals {
            let n = Vec3::from(n);
            assert!((n.length() - 1.0).abs() < 1e-3);
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn divided_normals_shrink_by_incidence() {
        let grid = bumpy_grid(8);
        let adjacency = vertex_adjacency(&grid.triangles, grid.vertex_count());
        let normals = compute_vertex_normals(
            &grid.positions,
            &grid.triangles,
            NormalWeighting::DividedByCount,
        );

        for (n, incident) in normals.iter().zip(&adjacency) {
            let length = Vec3::from(*n).length();
            assert!(length > 0.0 && length <= 1.0 + 1e-6);
            assert!((length - 1.0 / incident.len() as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn tilted_plane_keeps_its_normal() {
        let mut grid = GridMesh::build(4, &Bounds::new(0.0, 4.0, 0.0, 4.0)).unwrap();
        for p in grid.positions.iter_mut() {
            p[2] = p[0];
        }
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let normals =
            compute_vertex_normals(&grid.positions, &grid.triangles, NormalWeighting::Smooth);
        for n in normals {
            assert!((Vec3::from(n) - expected).length() < 1e-5);
        }
    }
}
