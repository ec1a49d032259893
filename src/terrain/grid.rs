//! Flat grid mesh: planar vertex lattice plus triangle index list.

use super::error::{Result, TerrainError, MAX_RESOLUTION};

/// Axis-aligned rectangle the grid is laid out over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Reject non-finite or zero/negative-area rectangles, including ones whose
    /// extent overflows `f32`.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.min_x,
            self.max_x,
            self.min_y,
            self.max_y,
            self.width(),
            self.height(),
        ]
        .iter()
        .all(|v| v.is_finite());

        if !finite || self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(TerrainError::DegenerateBounds {
                min_x: self.min_x,
                max_x: self.max_x,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(-4.0, 4.0, -4.0, 4.0)
    }
}

/// Planar `(n+1) x (n+1)` grid with two triangles per cell.
///
/// Vertices are row-major: vertex `i * (n + 1) + j` sits at row `i` (y) and
/// column `j` (x). Every cell is split along the same diagonal, and both
/// triangles wind so their face normal points towards +z.
#[derive(Clone, Debug)]
pub struct GridMesh {
    pub resolution: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl GridMesh {
    /// Lay out the planar grid over `bounds`.
    ///
    /// Any positive resolution is accepted here; the power-of-two requirement
    /// belongs to the heightfield.
    pub fn build(resolution: u32, bounds: &Bounds) -> Result<Self> {
        if resolution == 0 {
            return Err(TerrainError::InvalidResolution(resolution));
        }
        if resolution > MAX_RESOLUTION {
            return Err(TerrainError::ResolutionTooLarge {
                resolution,
                max: MAX_RESOLUTION,
            });
        }
        bounds.validate()?;

        let n = resolution;
        let side = (n + 1) as usize;
        let delta_x = bounds.width() / n as f32;
        let delta_y = bounds.height() / n as f32;

        let mut positions = Vec::with_capacity(side * side);
        for i in 0..=n {
            for j in 0..=n {
                positions.push([
                    bounds.min_x + delta_x * j as f32,
                    bounds.min_y + delta_y * i as f32,
                    0.0,
                ]);
            }
        }
        let normals = vec![[0.0, 0.0, 1.0]; side * side];

        let mut triangles = Vec::with_capacity(2 * (n * n) as usize);
        for i in 0..n {
            for j in 0..n {
                let vid = i * (n + 1) + j;
                triangles.push([vid, vid + 1, vid + n + 1]);
                triangles.push([vid + 1, vid + n + 2, vid + n + 1]);
            }
        }

        Ok(Self {
            resolution,
            positions,
            normals,
            triangles,
        })
    }

    /// Vertices along one edge of the grid.
    pub fn side(&self) -> usize {
        self.resolution as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
