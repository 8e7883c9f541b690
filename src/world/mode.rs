use bevy::prelude::*;

/// Movement/presentation mode of the scene
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 3D exploration: X and Z movement, chase camera
    #[default]
    FreeRoam,
    /// Side-view platforming: Z locked, top-down camera
    Platform,
}

/// Owns the current mode. The only transition is FreeRoam -> Platform.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn current(&self) -> Mode {
        self.mode
    }

    /// Switches to Platform. Returns false if already there.
    pub fn trigger_collected(&mut self) -> bool {
        if self.mode == Mode::Platform {
            return false;
        }
        self.mode = Mode::Platform;
        true
    }
}

/// Emitted once, when the collectible flips the scene into Platform mode
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChanged {
    pub from: Mode,
    pub to: Mode,
}
