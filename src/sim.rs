use std::time::Duration;

use bevy::prelude::*;

use crate::camera::{self, CameraRig};
use crate::player::{step, Body, Contact, InputState, MotionConfig};
use crate::scene::{compose, Frame, RenderSurface, SceneSnapshot};
use crate::trace::{ground_point, TraceArena, TraceConfig, TraceId};
use crate::world::{pickup, Collectible, Mode, ModeController, WorldConfig};

#[derive(Clone, Copy, Debug, Default)]
pub struct SimulationConfig {
    pub motion: MotionConfig,
    pub camera: CameraRig,
    pub traces: TraceConfig,
    pub world: WorldConfig,
    /// Where the player starts
    pub spawn: Vec3,
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub contact: Contact,
    pub collected: bool,
    pub spawned_trace: Option<TraceId>,
    pub retired_traces: usize,
}

/// Headless loop driver.
///
/// Owns one session's state and advances it with the same component
/// functions the Bevy systems use, in the same order: integrate, pickup,
/// traces. Hosts without an ECS (and tests) feed input and a clock and read
/// back frames.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    body: Body,
    input: InputState,
    mode: ModeController,
    collectible: Collectible,
    traces: TraceArena,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            body: Body::at(config.spawn),
            input: InputState::default(),
            mode: ModeController::default(),
            collectible: Collectible::new(config.world.collectible_position),
            traces: TraceArena::default(),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn mode(&self) -> Mode {
        self.mode.current()
    }

    pub fn collectible(&self) -> &Collectible {
        &self.collectible
    }

    pub fn traces(&self) -> &TraceArena {
        &self.traces
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Key events are written here between ticks
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Advances the session by one fixed tick at time `now`
    pub fn tick(&mut self, now: Duration) -> TickReport {
        let next = step(self.body, &self.input, self.mode.current(), &self.config.motion);
        self.body = next.body;

        let mut collected = false;
        if self.mode.current() == Mode::FreeRoam
            && pickup::check(self.body.position, &mut self.collectible)
        {
            collected = self.mode.trigger_collected();
            info!("Collected item, mode is now {:?}", self.mode.current());
        }

        let spawned_trace = (next.contact == Contact::Landed).then(|| {
            let point = ground_point(self.body.position, self.mode.current());
            self.traces.on_landed(point, now)
        });
        let retired_traces =
            self.traces
                .tick(now, self.config.traces.lifetime, self.config.traces.decay);

        TickReport {
            contact: next.contact,
            collected,
            spawned_trace,
            retired_traces,
        }
    }

    pub fn camera(&self) -> Transform {
        camera::frame(self.body.position, self.mode.current(), &self.config.camera)
    }

    pub fn frame(&self) -> Frame {
        compose(&SceneSnapshot {
            body: &self.body,
            mode: self.mode.current(),
            collectible: Some(&self.collectible),
            traces: &self.traces,
            camera: self.camera(),
        })
    }

    pub fn render(&self, surface: &mut impl RenderSurface) {
        surface.present(&self.frame());
    }
}
