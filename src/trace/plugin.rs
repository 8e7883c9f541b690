use std::time::Duration;

use bevy::prelude::*;

use super::arena::{TraceArena, TraceDecay};
use crate::player::Landed;
use crate::world::{Mode, ModeController};
use crate::TickSet;

/// Trace lifetime and fade curve
#[derive(Resource, Clone, Copy, Debug)]
pub struct TraceConfig {
    pub lifetime: Duration,
    pub decay: TraceDecay,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            lifetime: Duration::from_millis(1000),
            decay: TraceDecay::Stepped { steps: 10 },
        }
    }
}

/// Where a trace sits for a landing at `position`. Free-roam traces sit one
/// unit down, under the character's visual origin.
pub fn ground_point(position: Vec3, mode: Mode) -> Vec3 {
    match mode {
        Mode::FreeRoam => Vec3::new(position.x, -1.0, position.z),
        Mode::Platform => Vec3::new(position.x, 0.0, position.z),
    }
}

/// Plugin for landing traces
pub struct TracePlugin;

impl Plugin for TracePlugin {
    fn build(&self, app: &mut App) {
        crate::configure_tick_sets(app);

        app.init_resource::<TraceConfig>()
            .init_resource::<TraceArena>()
            .init_resource::<ModeController>()
            .add_message::<Landed>();

        app.add_systems(
            FixedUpdate,
            (spawn_traces, retire_traces).chain().in_set(TickSet::Traces),
        );
    }
}

/// Leaves a trace for every landing reported this tick
pub fn spawn_traces(
    mut reader: MessageReader<Landed>,
    mode: Res<ModeController>,
    mut arena: ResMut<TraceArena>,
    time: Res<Time>,
) {
    let now = time.elapsed();
    for landed in reader.read() {
        let point = ground_point(landed.position, mode.current());
        let id = arena.on_landed(point, now);
        debug!("Spawned trace {:?} at {:?}", id, point);
    }
}

/// Fades traces by age and drops the expired ones
pub fn retire_traces(mut arena: ResMut<TraceArena>, config: Res<TraceConfig>, time: Res<Time>) {
    let retired = arena.tick(time.elapsed(), config.lifetime, config.decay);
    if retired > 0 {
        debug!("Retired {} trace(s), {} live", retired, arena.len());
    }
}
