use bevy::prelude::*;

use super::mode::{Mode, ModeChanged, ModeController};
use crate::player::{Body, Player};

/// Default pickup distance in world units
pub const PICKUP_RADIUS: f32 = 1.0;

/// One-time pickup that switches the scene into Platform mode
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    pub position: Vec3,
    /// Pickup triggers strictly inside this distance
    pub radius: f32,
    pub active: bool,
}

impl Collectible {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            radius: PICKUP_RADIUS,
            active: true,
        }
    }
}

/// Tests the entity against the collectible and consumes it on contact.
///
/// Returns true exactly once per collectible; an inactive collectible never
/// reports a pickup regardless of distance.
pub fn check(entity_pos: Vec3, collectible: &mut Collectible) -> bool {
    if !collectible.active {
        return false;
    }
    if entity_pos.distance(collectible.position) < collectible.radius {
        collectible.active = false;
        return true;
    }
    false
}

/// Detects pickups while free-roaming and flips the mode on contact
pub fn detect_pickup(
    player_query: Query<&Body, With<Player>>,
    mut collectibles: Query<&mut Collectible>,
    mut mode: ResMut<ModeController>,
    mut writer: MessageWriter<ModeChanged>,
) {
    let Ok(body) = player_query.single() else {
        return;
    };

    if mode.current() != Mode::FreeRoam {
        return;
    }

    for mut collectible in &mut collectibles {
        if !check(body.position, &mut collectible) {
            continue;
        }

        info!("Collected item at {:?}", collectible.position);
        let from = mode.current();
        if mode.trigger_collected() {
            info!("Mode changed: {:?} -> {:?}", from, mode.current());
            writer.write(ModeChanged {
                from,
                to: mode.current(),
            });
        }
        break;
    }
}
