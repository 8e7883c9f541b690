pub mod input;
pub mod movement;
mod plugin;
mod state;

pub use input::{InputKey, InputState};
pub use movement::{step, Step};
pub use plugin::{spawn_player, PlayerPlugin};
pub use state::*;
