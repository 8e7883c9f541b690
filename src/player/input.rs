use bevy::ecs::observer::On;
use bevy::prelude::{Component, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

/// Move in a direction (WASD / arrows)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// The five logical keys the simulation reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKey {
    Left,
    Right,
    Forward,
    Back,
    Jump,
}

impl InputKey {
    pub const ALL: [InputKey; 5] = [
        InputKey::Left,
        InputKey::Right,
        InputKey::Forward,
        InputKey::Back,
        InputKey::Jump,
    ];

    /// Maps a host key name (`"a"`, `" "`, `"ArrowLeft"`, ...) to a logical key
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "a" | "A" | "ArrowLeft" => Some(InputKey::Left),
            "d" | "D" | "ArrowRight" => Some(InputKey::Right),
            "w" | "W" | "ArrowUp" => Some(InputKey::Forward),
            "s" | "S" | "ArrowDown" => Some(InputKey::Back),
            " " | "Space" => Some(InputKey::Jump),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held-state of every logical key. Nothing is held until a key event says so.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 5],
}

impl InputState {
    pub fn with(mut self, key: InputKey) -> Self {
        self.set(key, true);
        self
    }

    /// Last writer wins
    pub fn set(&mut self, key: InputKey, held: bool) {
        self.held[key.index()] = held;
    }

    pub fn is_held(&self, key: InputKey) -> bool {
        self.held[key.index()]
    }

    /// Applies a raw key event; unknown key names are ignored
    pub fn apply_key_event(&mut self, name: &str, held: bool) {
        if let Some(key) = InputKey::from_key_name(name) {
            self.set(key, held);
        }
    }

    pub fn release_all(&mut self) {
        self.held = [false; 5];
    }

    /// Stores a move axis as direction keys (+y is forward)
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.set(InputKey::Left, axis.x < 0.0);
        self.set(InputKey::Right, axis.x > 0.0);
        self.set(InputKey::Forward, axis.y > 0.0);
        self.set(InputKey::Back, axis.y < 0.0);
    }
}

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut InputState>) {
    if let Ok(mut input) = query.get_mut(trigger.event_target()) {
        input.set_move_axis(trigger.value);
    }
}

/// Clear direction keys when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut InputState>) {
    if let Ok(mut input) = query.get_mut(trigger.event_target()) {
        input.set_move_axis(Vec2::ZERO);
    }
}

/// Handle jump press
pub fn handle_jump_start(trigger: On<Start<JumpAction>>, mut query: Query<&mut InputState>) {
    if let Ok(mut input) = query.get_mut(trigger.event_target()) {
        input.set(InputKey::Jump, true);
    }
}

/// Handle jump release
pub fn handle_jump_end(trigger: On<Complete<JumpAction>>, mut query: Query<&mut InputState>) {
    if let Ok(mut input) = query.get_mut(trigger.event_target()) {
        input.set(InputKey::Jump, false);
    }
}
