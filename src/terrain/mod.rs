//! Procedural terrain mesh generation.
//!
//! Pipeline, run once per terrain:
//! - [`GridMesh::build`] lays out the planar grid and triangle list
//! - [`Heightfield::diamond_square`] synthesizes elevations
//! - [`apply_heights`] writes them into vertex z and picks band colors
//! - [`compute_vertex_normals`] derives smooth shading normals
//! - [`edges_from_triangles`] derives the wireframe line list
//!
//! Nothing here touches rendering; the output arrays are handed to the
//! renderer as-is.

use bevy::log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub mod colorize;
pub mod edges;
pub mod error;
pub mod grid;
pub mod heightfield;
pub mod normals;

pub use colorize::{apply_heights, ColorBand, HeightPalette, Rgba};
pub use edges::edges_from_triangles;
pub use error::{Result, TerrainError, MAX_RESOLUTION};
pub use grid::{Bounds, GridMesh};
pub use heightfield::Heightfield;
pub use normals::{compute_vertex_normals, face_normals, vertex_adjacency, NormalWeighting};

/// Everything that shapes a generated terrain apart from the random source.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Cells per side; must be a power of two.
    pub resolution: u32,
    pub bounds: Bounds,
    /// Initial displacement amplitude, halved at every subdivision level.
    pub roughness: f32,
    pub normal_weighting: NormalWeighting,
    pub palette: HeightPalette,
}

impl TerrainSettings {
    pub fn new(resolution: u32, bounds: Bounds) -> Self {
        Self {
            resolution,
            bounds,
            roughness: 0.6,
            normal_weighting: NormalWeighting::default(),
            palette: HeightPalette::default(),
        }
    }

    /// Check every precondition without generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 || !self.resolution.is_power_of_two() {
            return Err(TerrainError::InvalidResolution(self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(TerrainError::ResolutionTooLarge {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        self.bounds.validate()?;
        if !self.roughness.is_finite() || self.roughness < 0.0 {
            return Err(TerrainError::InvalidRoughness(self.roughness));
        }
        Ok(())
    }
}

/// Render-ready terrain arrays.
///
/// `V = (n+1)^2` vertices, `T = 2n^2` triangles and `3T` edges.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub resolution: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<Rgba>,
    pub triangles: Vec<[u32; 3]>,
    pub edges: Vec<[u32; 2]>,
    /// Lowest and highest elevation.
    pub height_range: (f32, f32),
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Flat `x y z` floats, `3V` long.
    pub fn position_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat normal components, `3V` long.
    pub fn normal_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Flat RGBA floats, `4V` long.
    pub fn color_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Flat triangle indices, `3T` long.
    pub fn triangle_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Flat edge indices, two per edge.
    pub fn edge_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.edges)
    }
}

/// Generate a terrain, drawing displacements from `rng`.
pub fn generate<R: Rng>(settings: &TerrainSettings, rng: &mut R) -> Result<TerrainMesh> {
    settings.validate()?;

    let mut grid = GridMesh::build(settings.resolution, &settings.bounds)?;
    let heights = Heightfield::diamond_square(settings.resolution, settings.roughness, rng)?;
    let colors = apply_heights(&mut grid, &heights, &settings.palette)?;

    grid.normals = compute_vertex_normals(
        &grid.positions,
        &grid.triangles,
        settings.normal_weighting,
    );
    let edges = edges_from_triangles(&grid.triangles);
    let height_range = heights.range();

    info!(
        "Terrain generated: {} vertices, {} triangles, heights {:.3}..{:.3}",
        grid.vertex_count(),
        grid.triangle_count(),
        height_range.0,
        height_range.1
    );

    Ok(TerrainMesh {
        resolution: grid.resolution,
        positions: grid.positions,
        normals: grid.normals,
        colors,
        triangles: grid.triangles,
        edges,
        height_range,
    })
}

/// [`generate`] with a `StdRng` seeded from `seed`.
pub fn generate_seeded(settings: &TerrainSettings, seed: u64) -> Result<TerrainMesh> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(settings, &mut rng)
}
