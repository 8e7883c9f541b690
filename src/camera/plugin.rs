use bevy::prelude::*;

use super::follow::{follow_player, frame, CameraRig, SceneCamera};
use crate::world::{Mode, ModeController};

/// Plugin for the mode-aware scene camera
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModeController>();

        app.add_systems(Startup, spawn_camera);
        app.add_systems(Update, follow_player);
    }
}

fn spawn_camera(mut commands: Commands) {
    let rig = CameraRig::default();
    commands.spawn((
        SceneCamera,
        rig,
        Camera3d::default(),
        frame(Vec3::ZERO, Mode::FreeRoam, &rig),
    ));
}
