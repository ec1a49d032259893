//! World management: terrain configuration and one-shot generation.

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::terrain::{self, Bounds, NormalWeighting, TerrainMesh, TerrainSettings};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainConfig>()
            .add_systems(Startup, generate_terrain);
    }
}

/// Terrain generation settings.
#[derive(Resource, Clone)]
pub struct TerrainConfig {
    /// Cells per side (power of two).
    pub resolution: u32,
    /// Extent of the grid in model space.
    pub bounds: Bounds,
    /// Initial diamond-square displacement amplitude.
    pub roughness: f32,
    /// Fixed seed for reproducible terrain; `None` draws from entropy.
    pub seed: Option<u64>,
    pub normal_weighting: NormalWeighting,
    /// Whether the wireframe overlay starts visible.
    pub show_edges: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            bounds: Bounds::new(-4.0, 4.0, -4.0, 4.0),
            roughness: 0.6,
            seed: None,
            normal_weighting: NormalWeighting::Smooth,
            show_edges: false,
        }
    }
}

impl TerrainConfig {
    pub fn settings(&self) -> TerrainSettings {
        TerrainSettings {
            roughness: self.roughness,
            normal_weighting: self.normal_weighting,
            ..TerrainSettings::new(self.resolution, self.bounds)
        }
    }
}

/// The generated terrain, available once `Startup` has run.
#[derive(Resource)]
pub struct Terrain(pub TerrainMesh);

/// Generate the terrain mesh from the current config.
pub fn generate_terrain(mut commands: Commands, config: Res<TerrainConfig>) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match terrain::generate(&config.settings(), &mut rng) {
        Ok(mesh) => {
            info!(
                "Terrain ready: {}x{} grid over [{}, {}] x [{}, {}]",
                config.resolution,
                config.resolution,
                config.bounds.min_x,
                config.bounds.max_x,
                config.bounds.min_y,
                config.bounds.max_y
            );
            commands.insert_resource(Terrain(mesh));
        }
        Err(err) => error!("Terrain generation rejected: {}", err),
    }
}
