use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::frame::*;
use crate::camera::{frame as camera_frame, CameraRig, SceneCamera};
use crate::player::{Body, Player};
use crate::trace::TraceArena;
use crate::world::{Collectible, Mode, ModeController};

const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
const COLLECTIBLE_SIZE: Vec3 = Vec3::splat(1.0);
const TRACE_SIZE: Vec3 = Vec3::splat(0.5);
const GRID_SIZE: Vec2 = Vec2::new(100.0, 100.0);
const PLATFORM_SIZE: Vec2 = Vec2::new(20.0, 10.0);
const POINT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);

const YELLOW: Color = Color::srgb(1.0, 1.0, 0.0);
const BLUE: Color = Color::srgb(0.0, 0.0, 1.0);
const GREY: Color = Color::srgb(0.5, 0.5, 0.5);

/// Everything the composer reads for one frame
pub struct SceneSnapshot<'a> {
    pub body: &'a Body,
    pub mode: Mode,
    pub collectible: Option<&'a Collectible>,
    pub traces: &'a TraceArena,
    pub camera: Transform,
}

/// Builds the full frame description: lights, one background for the mode,
/// the player, the collectible while it can still be picked up, and every
/// live trace at its current opacity.
pub fn compose(snapshot: &SceneSnapshot) -> Frame {
    let mut drawables = Vec::with_capacity(3 + snapshot.traces.len());

    drawables.push(background(snapshot.mode));

    let player_rotation = match snapshot.mode {
        Mode::FreeRoam => Quat::IDENTITY,
        Mode::Platform => Quat::from_rotation_y(FRAC_PI_2),
    };
    drawables.push(Drawable {
        id: DrawableId::Player,
        shape: Shape::Cuboid { size: PLAYER_SIZE },
        transform: Transform::from_translation(snapshot.body.position)
            .with_rotation(player_rotation),
        surface: Surface::lit(YELLOW),
    });

    if let Some(collectible) = snapshot.collectible
        && collectible.active
        && snapshot.mode == Mode::FreeRoam
    {
        drawables.push(Drawable {
            id: DrawableId::Collectible,
            shape: Shape::Cuboid {
                size: COLLECTIBLE_SIZE,
            },
            transform: Transform::from_translation(collectible.position),
            surface: Surface::lit(BLUE),
        });
    }

    drawables.extend(snapshot.traces.iter().map(|(slot, trace)| Drawable {
        id: DrawableId::Trace(slot),
        shape: Shape::Cuboid { size: TRACE_SIZE },
        transform: Transform::from_translation(trace.position),
        surface: Surface::lit(GREY).with_opacity(trace.opacity),
    }));

    Frame {
        lights: vec![
            Light::Ambient {
                color: Color::WHITE,
                brightness: 300.0,
            },
            Light::Point {
                position: POINT_LIGHT_POSITION,
            },
        ],
        drawables,
        camera: snapshot.camera,
    }
}

fn background(mode: Mode) -> Drawable {
    match mode {
        Mode::FreeRoam => Drawable {
            id: DrawableId::Background,
            shape: Shape::Plane {
                size: GRID_SIZE,
                normal: Dir3::Y,
            },
            transform: Transform::from_xyz(0.0, -1.0, 0.0),
            surface: Surface::lit(Color::WHITE),
        },
        Mode::Platform => Drawable {
            id: DrawableId::Background,
            shape: Shape::Plane {
                size: PLATFORM_SIZE,
                normal: Dir3::Z,
            },
            transform: Transform::from_xyz(0.0, 0.0, -0.1),
            surface: Surface::unlit(Color::WHITE),
        },
    }
}

/// Rebuilds the frame resource from the latest simulation state
pub fn compose_frame(
    player_query: Query<&Body, With<Player>>,
    collectible_query: Query<&Collectible>,
    camera_query: Query<&CameraRig, With<SceneCamera>>,
    mode: Res<ModeController>,
    traces: Res<TraceArena>,
    mut frame: ResMut<Frame>,
) {
    let Ok(body) = player_query.single() else {
        return;
    };
    let rig = camera_query.single().copied().unwrap_or_default();

    *frame = compose(&SceneSnapshot {
        body,
        mode: mode.current(),
        collectible: collectible_query.iter().next(),
        traces: &traces,
        camera: camera_frame(body.position, mode.current(), &rig),
    });
}
