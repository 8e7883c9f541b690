use bevy::prelude::*;

use super::compose::compose_frame;
use super::frame::Frame;
use super::surface::{present_frame, PresentedEntities};

/// Plugin that composes each frame and presents it through Bevy
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Frame>()
            .init_resource::<PresentedEntities>();

        app.add_systems(Update, (compose_frame, present_frame).chain());
    }
}
