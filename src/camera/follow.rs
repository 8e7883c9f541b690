use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::player::{Body, Player};
use crate::world::{Mode, ModeController};

/// Marker for the camera that frames the player
#[derive(Component, Default)]
pub struct SceneCamera;

/// Camera offsets relative to the player, per mode
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Free-roam: behind and above, looking at the player
    pub chase_offset: Vec3,
    /// Platform: straight above, looking down
    pub overhead_offset: Vec3,
    /// Fixed orientation used in Platform mode
    pub overhead_rotation: Quat,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            chase_offset: Vec3::new(0.0, 15.0, 10.0),
            overhead_offset: Vec3::new(0.0, 10.0, 0.0),
            overhead_rotation: Quat::from_euler(EulerRot::XYZ, -FRAC_PI_2, 0.0, PI),
        }
    }
}

/// Camera transform for the player at `position`. Pure: no smoothing and
/// no state carried between frames.
pub fn frame(position: Vec3, mode: Mode, rig: &CameraRig) -> Transform {
    match mode {
        Mode::Platform => Transform::from_translation(position + rig.overhead_offset)
            .with_rotation(rig.overhead_rotation),
        Mode::FreeRoam => {
            Transform::from_translation(position + rig.chase_offset).looking_at(position, Vec3::Y)
        }
    }
}

/// Reframes every scene camera on the player for the current mode
pub fn follow_player(
    player_query: Query<&Body, With<Player>>,
    mode: Res<ModeController>,
    mut camera_query: Query<(&CameraRig, &mut Transform), With<SceneCamera>>,
) {
    let Ok(body) = player_query.single() else {
        return;
    };

    for (rig, mut transform) in &mut camera_query {
        *transform = frame(body.position, mode.current(), rig);
    }
}
