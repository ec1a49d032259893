//! Terrain surface and wireframe meshes.
//!
//! Uploads the generated arrays unchanged: positions, normals and vertex
//! colors feed a triangle list, the edge list feeds a line list drawn on top.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};

use crate::terrain::TerrainMesh;
use crate::world::{generate_terrain, Terrain, TerrainConfig};

pub struct TerrainMeshPlugin;

impl Plugin for TerrainMeshPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_terrain.after(generate_terrain))
            .add_systems(Update, toggle_wireframe);
    }
}

/// Marker for the shaded terrain surface.
#[derive(Component)]
pub struct TerrainSurface;

/// Marker for the wireframe overlay.
#[derive(Component)]
pub struct TerrainWireframe;

/// Model transform: the terrain is z-up, so tip it onto the XZ plane and
/// drop it slightly below the camera's starting height.
pub fn terrain_transform() -> Transform {
    Transform::from_xyz(0.0, -0.25, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
}

fn spawn_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    terrain: Option<Res<Terrain>>,
    config: Res<TerrainConfig>,
) {
    let Some(terrain) = terrain else {
        warn!("No terrain generated, nothing to draw");
        return;
    };

    let surface_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        reflectance: 0.1,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(build_surface_mesh(&terrain.0))),
        MeshMaterial3d(surface_material),
        terrain_transform(),
        TerrainSurface,
    ));

    let wire_material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        depth_bias: 1.0,
        ..default()
    });
    let visibility = if config.show_edges {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    commands.spawn((
        Mesh3d(meshes.add(build_wireframe_mesh(&terrain.0))),
        MeshMaterial3d(wire_material),
        terrain_transform(),
        visibility,
        TerrainWireframe,
    ));

    info!(
        "Terrain meshes spawned: {} triangles, {} edges",
        terrain.0.triangle_count(),
        terrain.0.edge_count()
    );
}

/// Triangle list with per-vertex position, normal and color.
pub fn build_surface_mesh(terrain: &TerrainMesh) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD);

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, terrain.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, terrain.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, terrain.colors.clone());
    mesh.insert_indices(Indices::U32(terrain.triangle_indices().to_vec()));

    mesh
}

/// Line list over the same vertices, one segment per triangle edge.
pub fn build_wireframe_mesh(terrain: &TerrainMesh) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, terrain.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, terrain.normals.clone());
    mesh.insert_indices(Indices::U32(terrain.edge_indices().to_vec()));

    mesh
}

/// Tab shows or hides the wireframe overlay.
fn toggle_wireframe(
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Visibility, With<TerrainWireframe>>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }

    for mut visibility in &mut query {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
        info!("Wireframe: {}", if *visibility == Visibility::Hidden { "OFF" } else { "ON" });
    }
}
