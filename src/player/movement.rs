use bevy::prelude::*;

use super::input::{InputKey, InputState};
use super::state::*;
use crate::world::{Mode, ModeController};

/// Result of one integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub body: Body,
    pub contact: Contact,
}

/// Advances the body by one fixed tick.
///
/// X moves in both modes, Z only while free-roaming. Gravity is not applied
/// on the launch tick, so a jump leaves the ground at exactly `jump_velocity`.
/// A body at or below the ground counts as grounded, so a negative height
/// heals on the next step.
pub fn step(body: Body, input: &InputState, mode: Mode, config: &MotionConfig) -> Step {
    let mut position = body.position;
    let mut velocity = body.velocity;
    let was_airborne = !body.is_grounded();

    if input.is_held(InputKey::Left) {
        position.x -= config.move_step;
    }
    if input.is_held(InputKey::Right) {
        position.x += config.move_step;
    }
    if mode == Mode::FreeRoam {
        if input.is_held(InputKey::Forward) {
            position.z -= config.move_step;
        }
        if input.is_held(InputKey::Back) {
            position.z += config.move_step;
        }
    }

    let launched = input.is_held(InputKey::Jump) && body.is_grounded();
    if launched {
        velocity.y = config.jump_velocity;
    }

    position.y += velocity.y;

    let contact = if position.y > 0.0 {
        if !launched {
            velocity.y -= config.gravity;
        }
        Contact::Airborne
    } else {
        position.y = 0.0;
        velocity.y = 0.0;
        if was_airborne {
            Contact::Landed
        } else {
            Contact::Grounded
        }
    };

    Step {
        body: Body { position, velocity },
        contact,
    }
}

/// Integrates the player body and reports landings
pub fn integrate_player(
    mut query: Query<(&InputState, &MotionConfig, &mut Body), With<Player>>,
    mode: Res<ModeController>,
    mut writer: MessageWriter<Landed>,
) {
    for (input, config, mut body) in &mut query {
        let next = step(*body, input, mode.current(), config);
        *body = next.body;

        if next.contact == Contact::Landed {
            writer.write(Landed {
                position: next.body.position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[InputKey]) -> InputState {
        keys.iter().fold(InputState::default(), |input, key| input.with(*key))
    }

    #[test]
    fn no_input_keeps_grounded_body_still() {
        let config = MotionConfig::default();
        let next = step(Body::default(), &InputState::default(), Mode::FreeRoam, &config);
        assert_eq!(next.body, Body::default());
        assert_eq!(next.contact, Contact::Grounded);
    }

    #[test]
    fn free_roam_moves_on_x_and_z() {
        let config = MotionConfig::default();
        let input = held(&[InputKey::Right, InputKey::Forward]);
        let next = step(Body::default(), &input, Mode::FreeRoam, &config);
        assert!((next.body.position.x - 0.1).abs() < 1e-6);
        assert!((next.body.position.z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn platform_locks_z() {
        let config = MotionConfig::default();
        let input = held(&[InputKey::Left, InputKey::Back, InputKey::Forward]);
        let next = step(Body::default(), &input, Mode::Platform, &config);
        assert!((next.body.position.x + 0.1).abs() < 1e-6);
        assert_eq!(next.body.position.z, 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let config = MotionConfig::default();
        let input = held(&[InputKey::Left, InputKey::Right]);
        let next = step(Body::default(), &input, Mode::FreeRoam, &config);
        assert_eq!(next.body.position.x, 0.0);
    }

    #[test]
    fn jump_from_ground_launches() {
        let config = MotionConfig::default();
        let input = held(&[InputKey::Jump]);
        let next = step(Body::default(), &input, Mode::FreeRoam, &config);
        assert!(next.body.position.y > 0.0);
        assert_eq!(next.body.position.y, config.jump_velocity);
        assert_eq!(next.body.velocity.y, config.jump_velocity);
        assert_eq!(next.contact, Contact::Airborne);
    }

    #[test]
    fn jump_is_ignored_while_airborne() {
        let config = MotionConfig::default();
        let body = Body {
            position: Vec3::new(0.0, 1.0, 0.0),
            velocity: Vec3::new(0.0, -0.05, 0.0),
        };
        let next = step(body, &held(&[InputKey::Jump]), Mode::FreeRoam, &config);
        assert!(next.body.velocity.y < body.velocity.y);
    }

    #[test]
    fn gravity_reduces_vertical_velocity_while_airborne() {
        let config = MotionConfig::default();
        let mut body = Body {
            position: Vec3::new(0.0, 2.0, 0.0),
            velocity: Vec3::new(0.0, 0.2, 0.0),
        };
        loop {
            let next = step(body, &InputState::default(), Mode::Platform, &config);
            if next.contact != Contact::Airborne {
                break;
            }
            assert!(next.body.velocity.y < body.velocity.y);
            body = next.body;
        }
    }

    #[test]
    fn landing_clamps_exactly_to_ground() {
        let config = MotionConfig::default();
        let body = Body {
            position: Vec3::new(1.0, 0.05, 2.0),
            velocity: Vec3::new(0.0, -0.4, 0.0),
        };
        let next = step(body, &InputState::default(), Mode::FreeRoam, &config);
        assert_eq!(next.contact, Contact::Landed);
        assert_eq!(next.body.position.y, 0.0);
        assert_eq!(next.body.velocity.y, 0.0);

        let again = step(next.body, &InputState::default(), Mode::FreeRoam, &config);
        assert_eq!(again.body, next.body);
        assert_eq!(again.contact, Contact::Grounded);
    }

    #[test]
    fn negative_height_heals_on_next_step() {
        let config = MotionConfig::default();
        let body = Body {
            position: Vec3::new(0.0, -0.5, 0.0),
            velocity: Vec3::new(0.0, -0.1, 0.0),
        };
        let next = step(body, &InputState::default(), Mode::FreeRoam, &config);
        assert_eq!(next.body.position.y, 0.0);
        assert_eq!(next.body.velocity.y, 0.0);
        assert_eq!(next.contact, Contact::Grounded);
    }
}
