//! Flight camera: arrow keys pitch and roll, the view drifts forward on its own.
//!
//! The view basis lives in a [`FlightView`] component on the camera entity and
//! is copied into its `Transform` every frame.

use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlightConfig>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (toggle_auto_advance, steer_flight, advance_flight, sync_camera_transform).chain(),
            );
    }
}

/// Steering and cruise settings.
#[derive(Resource)]
pub struct FlightConfig {
    /// Forward speed in world units per second.
    pub forward_speed: f32,
    /// Pitch rate in degrees per second while Up/Down is held.
    pub pitch_rate: f32,
    /// Roll rate in degrees per second while Left/Right is held.
    pub roll_rate: f32,
    /// Whether the camera cruises forward without input.
    pub auto_advance: bool,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            forward_speed: 0.078,
            pitch_rate: 9.0,
            roll_rate: 18.0,
            auto_advance: true,
            fov: 45.0,
        }
    }
}

/// Eye position plus the view direction and up vector it looks along.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct FlightView {
    pub eye: Vec3,
    pub view_dir: Vec3,
    pub up: Vec3,
}

impl Default for FlightView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 4.0),
            view_dir: Vec3::new(0.0, -0.2, -1.0),
            up: Vec3::Y,
        }
    }
}

impl FlightView {
    /// Rotate view direction and up about the right axis. Positive noses up.
    pub fn pitch(&mut self, angle: f32) {
        let right = self.view_dir.cross(self.up);
        let Some(axis) = right.try_normalize() else {
            return;
        };
        let rotation = Quat::from_axis_angle(axis, angle);
        self.view_dir = rotation * self.view_dir;
        self.up = rotation * self.up;
    }

    /// Rotate up about the view direction (right-handed).
    pub fn roll(&mut self, angle: f32) {
        let Some(axis) = self.view_dir.try_normalize() else {
            return;
        };
        self.up = Quat::from_axis_angle(axis, angle) * self.up;
    }

    /// Move the eye along the view direction.
    pub fn advance(&mut self, distance: f32) {
        if let Some(forward) = self.view_dir.try_normalize() {
            self.eye += forward * distance;
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye).looking_to(self.view_dir, self.up)
    }
}

fn setup_camera(mut commands: Commands, config: Res<FlightConfig>) {
    let view = FlightView::default();

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov.to_radians(),
            near: 0.1,
            far: 900.0,
            ..default()
        }),
        view.transform(),
        view,
    ));
}

fn toggle_auto_advance(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<FlightConfig>) {
    if keys.just_pressed(KeyCode::Space) {
        config.auto_advance = !config.auto_advance;
        info!(
            "Auto advance: {}",
            if config.auto_advance { "ON" } else { "OFF" }
        );
    }
}

fn steer_flight(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<FlightConfig>,
    mut query: Query<&mut FlightView>,
) {
    let dt = time.delta_secs();
    let mut pitch = 0.0;
    let mut roll = 0.0;

    if keys.pressed(KeyCode::ArrowUp) {
        pitch += config.pitch_rate;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        pitch -= config.pitch_rate;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        roll += config.roll_rate;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        roll -= config.roll_rate;
    }

    if pitch == 0.0 && roll == 0.0 {
        return;
    }

    for mut view in &mut query {
        if pitch != 0.0 {
            view.pitch((pitch * dt).to_radians());
        }
        if roll != 0.0 {
            view.roll((roll * dt).to_radians());
        }
    }
}

fn advance_flight(time: Res<Time>, config: Res<FlightConfig>, mut query: Query<&mut FlightView>) {
    if !config.auto_advance {
        return;
    }

    let distance = config.forward_speed * time.delta_secs();
    for mut view in &mut query {
        view.advance(distance);
    }
}

fn sync_camera_transform(mut query: Query<(&FlightView, &mut Transform), Changed<FlightView>>) {
    for (view, mut transform) in &mut query {
        *transform = view.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn level_view() -> FlightView {
        FlightView {
            eye: Vec3::ZERO,
            view_dir: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }

    #[test]
    fn pitch_up_raises_the_nose() {
        let mut view = level_view();
        view.pitch(10f32.to_radians());

        assert!(view.view_dir.y > 0.0);
        assert!((view.view_dir.length() - 1.0).abs() < EPS);
        assert!(view.view_dir.dot(view.up).abs() < EPS);
        // Right axis is unchanged by pitching.
        assert!((view.view_dir.cross(view.up).normalize() - Vec3::X).length() < EPS);
    }

    #[test]
    fn pitch_round_trip_restores_basis() {
        let mut view = FlightView::default();
        let start = view;
        view.pitch(0.3f32.to_radians());
        view.pitch(-0.3f32.to_radians());

        assert!((view.view_dir - start.view_dir).length() < EPS);
        assert!((view.up - start.up).length() < EPS);
    }

    #[test]
    fn roll_keeps_view_direction() {
        let mut view = level_view();
        view.roll(90f32.to_radians());

        assert!((view.view_dir - Vec3::NEG_Z).length() < EPS);
        // Right-handed about -Z tips up towards +X.
        assert!((view.up - Vec3::X).length() < EPS);
    }

    #[test]
    fn advance_moves_along_view_direction() {
        let mut view = FlightView {
            view_dir: Vec3::new(0.0, 0.0, -2.0),
            ..level_view()
        };
        view.advance(0.5);
        assert!((view.eye - Vec3::new(0.0, 0.0, -0.5)).length() < EPS);
    }

    #[test]
    fn degenerate_basis_is_left_alone() {
        let mut view = FlightView {
            eye: Vec3::ONE,
            view_dir: Vec3::Y,
            up: Vec3::Y,
        };
        let before = view;
        view.pitch(0.5);
        assert_eq!(view, before);
    }

    #[test]
    fn transform_looks_along_view_direction() {
        let view = FlightView::default();
        let transform = view.transform();
        let forward = transform.forward();
        assert!((*forward - view.view_dir.normalize()).length() < EPS);
        assert_eq!(transform.translation, view.eye);
    }
}
