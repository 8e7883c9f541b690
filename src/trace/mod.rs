mod arena;
mod plugin;

pub use arena::{Trace, TraceArena, TraceDecay, TraceId};
pub use plugin::{ground_point, retire_traces, spawn_traces, TraceConfig, TracePlugin};
