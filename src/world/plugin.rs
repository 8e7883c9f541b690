use bevy::prelude::*;

use super::mode::{ModeChanged, ModeController};
use super::pickup::{detect_pickup, Collectible};
use crate::TickSet;

/// Where the world's fixed objects start
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldConfig {
    pub collectible_position: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            collectible_position: Vec3::new(5.0, 0.0, 5.0),
        }
    }
}

/// Plugin for the mode controller and the collectible that drives it
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_tick_sets(app);

        app.init_resource::<WorldConfig>()
            .init_resource::<ModeController>()
            .add_message::<ModeChanged>();

        app.add_systems(Startup, spawn_collectible);
        app.add_systems(FixedUpdate, detect_pickup.in_set(TickSet::Pickup));
    }
}

fn spawn_collectible(mut commands: Commands, config: Res<WorldConfig>) {
    commands.spawn(Collectible::new(config.collectible_position));
}
