//! Terrain Flight - fly over procedurally generated terrain.
//!
//! The [`terrain`] module builds the mesh arrays with no rendering
//! dependency; the plugins wire it into a Bevy app with a flight camera.

pub mod camera;
pub mod render;
pub mod terrain;
pub mod world;
