mod mode;
pub mod pickup;
mod plugin;

pub use mode::{Mode, ModeChanged, ModeController};
pub use pickup::{Collectible, PICKUP_RADIUS};
pub use plugin::{WorldConfig, WorldPlugin};
