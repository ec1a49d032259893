//! Rendering: terrain meshes and scene lighting.

use bevy::prelude::*;

pub mod lighting;
pub mod terrain_mesh;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(lighting::LightingPlugin)
            .add_plugins(terrain_mesh::TerrainMeshPlugin);
    }
}
