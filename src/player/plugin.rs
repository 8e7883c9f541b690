use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::input::{
    handle_jump_end, handle_jump_start, handle_move_end, handle_move_input, InputState,
    JumpAction, MoveAction,
};
use super::movement::integrate_player;
use super::state::*;
use crate::world::ModeController;
use crate::TickSet;

/// Plugin for the kinematic player controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }
        crate::configure_tick_sets(app);

        // Register input context for player
        app.add_input_context::<Player>();

        // Input observers write InputState outside the fixed step
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_jump_end);

        app.init_resource::<ModeController>().add_message::<Landed>();

        app.add_systems(Startup, setup_player);
        app.add_systems(FixedUpdate, integrate_player.in_set(TickSet::Integrate));
    }
}

fn setup_player(mut commands: Commands) {
    spawn_player(&mut commands, MotionConfig::default(), Vec3::ZERO);
}

/// Spawns the player entity with its input bindings
pub fn spawn_player(commands: &mut Commands, config: MotionConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Player,
            config,
            Body::at(position),
            InputState::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                        (KeyCode::ArrowUp, SwizzleAxis::YXZ),
                        (KeyCode::ArrowDown, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::ArrowRight,
                        (KeyCode::ArrowLeft, Negate::all()),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
            ]),
        )
        .id()
}
