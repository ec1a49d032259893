//! Scene lighting: a single fixed light plus a dim ambient floor.

use bevy::prelude::*;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightingConfig>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_lighting);
    }
}

/// Light placement and intensity.
#[derive(Resource, Clone)]
pub struct LightingConfig {
    /// Where the light shines from; it points at the origin.
    pub light_position: Vec3,
    /// Diffuse light color.
    pub diffuse: Color,
    /// Directional illuminance in lux.
    pub illuminance: f32,
    /// Ambient color and brightness.
    pub ambient: Color,
    pub ambient_brightness: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(30.0, 60.0, 100.0),
            diffuse: Color::srgb(0.47, 0.47, 0.47),
            illuminance: 12_000.0,
            ambient: Color::WHITE,
            ambient_brightness: 80.0,
        }
    }
}

fn setup_lighting(mut commands: Commands, config: Res<LightingConfig>) {
    commands.insert_resource(AmbientLight {
        color: config.ambient,
        brightness: config.ambient_brightness,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: config.illuminance,
            color: config.diffuse,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(config.light_position).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Lighting set up from {:?}", config.light_position);
}
