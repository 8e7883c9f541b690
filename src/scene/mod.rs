mod compose;
mod frame;
mod plugin;
mod surface;

pub use compose::{compose, SceneSnapshot};
pub use frame::*;
pub use plugin::ScenePlugin;
pub use surface::{BevySurface, Presented, PresentedEntities};
