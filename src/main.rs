//! Terrain Flight - cruise over a diamond-square landscape.
//!
//! Arrow keys pitch and roll, Space pauses the cruise, Tab toggles the
//! wireframe overlay.

use bevy::prelude::*;

use terrain_flight::{camera, render, world};

fn main() {
    // Force Vulkan backend on Windows (DX12 causes crashes on some systems)
    #[cfg(target_os = "windows")]
    std::env::set_var("WGPU_BACKEND", "vulkan");
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terrain Flight".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Terrain generation
        .add_plugins(world::WorldPlugin)
        // Meshes and lighting
        .add_plugins(render::RenderPlugin)
        // Flight controls
        .add_plugins(camera::CameraPlugin)
        .run();
}
