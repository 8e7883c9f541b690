pub mod camera;
pub mod player;
pub mod scene;
pub mod sim;
pub mod trace;
pub mod world;

pub use camera::CameraPlugin;
pub use player::PlayerPlugin;
pub use scene::ScenePlugin;
pub use trace::TracePlugin;
pub use world::WorldPlugin;

use bevy::prelude::*;

/// Phases of one fixed tick, in order
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Player integration
    Integrate,
    /// Pickup detection and mode switching
    Pickup,
    /// Trace spawning and retirement
    Traces,
}

pub(crate) fn configure_tick_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (TickSet::Integrate, TickSet::Pickup, TickSet::Traces).chain(),
    );
}

/// Unified plugin that adds the player, world, traces, camera, and scene
/// presentation, stepping the simulation at `tick_hz`.
pub struct DimensionShiftPlugin {
    pub tick_hz: f64,
}

impl Default for DimensionShiftPlugin {
    fn default() -> Self {
        Self { tick_hz: 60.0 }
    }
}

impl Plugin for DimensionShiftPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.tick_hz));

        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
        if !app.is_plugin_added::<WorldPlugin>() {
            app.add_plugins(WorldPlugin);
        }
        if !app.is_plugin_added::<TracePlugin>() {
            app.add_plugins(TracePlugin);
        }
        if !app.is_plugin_added::<CameraPlugin>() {
            app.add_plugins(CameraPlugin);
        }
        if !app.is_plugin_added::<ScenePlugin>() {
            app.add_plugins(ScenePlugin);
        }
    }
}

pub mod prelude {
    pub use crate::camera::{CameraPlugin, CameraRig, SceneCamera};
    pub use crate::player::{
        spawn_player, Body, Contact, InputKey, InputState, Landed, MotionConfig, Player,
        PlayerPlugin,
    };
    pub use crate::scene::{Frame, RenderSurface, ScenePlugin};
    pub use crate::sim::{Simulation, SimulationConfig, TickReport};
    pub use crate::trace::{TraceArena, TraceConfig, TraceDecay, TracePlugin};
    pub use crate::world::{Collectible, Mode, ModeChanged, ModeController, WorldPlugin};
    pub use crate::{DimensionShiftPlugin, TickSet};
}
