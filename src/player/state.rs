use bevy::prelude::*;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player movement configuration, in world units per fixed tick
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Horizontal displacement applied per tick while a direction key is held
    pub move_step: f32,
    /// Vertical velocity set when jumping from the ground
    pub jump_velocity: f32,
    /// Vertical velocity removed per airborne tick
    pub gravity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_step: 0.1,
            jump_velocity: 0.3,
            gravity: 0.01,
        }
    }
}

/// Kinematic state of the player, advanced once per fixed tick
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Body {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    /// Standing on (or below) the ground plane
    pub fn is_grounded(&self) -> bool {
        self.position.y <= 0.0
    }
}

/// Ground contact reported by a single integration step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Airborne,
    Grounded,
    /// Airborne at the start of the step, clamped to the ground at the end
    Landed,
}

/// Emitted on the tick the player touches down after being airborne
#[derive(Message, Clone, Copy, Debug)]
pub struct Landed {
    pub position: Vec3,
}
