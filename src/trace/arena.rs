use std::time::Duration;

use bevy::prelude::*;

/// Stable identity of a trace, independent of its creation time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(pub u64);

/// How opacity falls off with age
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceDecay {
    /// `1 - age / lifetime`
    Continuous,
    /// Drops by `1 / steps` every `lifetime / steps`
    Stepped { steps: u32 },
}

impl TraceDecay {
    /// Opacity for a trace of the given age, clamped to `[0, 1]`
    pub fn opacity(self, age: Duration, lifetime: Duration) -> f32 {
        if lifetime.is_zero() {
            return 0.0;
        }
        let progress = age.as_secs_f32() / lifetime.as_secs_f32();
        let faded = match self {
            TraceDecay::Continuous => progress,
            TraceDecay::Stepped { steps } => {
                let steps = steps.max(1) as f32;
                (progress * steps).floor() / steps
            }
        };
        (1.0 - faded).clamp(0.0, 1.0)
    }
}

/// A fading marker left where the player landed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    pub id: TraceId,
    pub position: Vec3,
    pub created_at: Duration,
    pub opacity: f32,
}

impl Trace {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }
}

/// Slot storage for live traces. Retired slots are reused before growing.
#[derive(Resource, Debug, Default)]
pub struct TraceArena {
    slots: Vec<Option<Trace>>,
    free: Vec<usize>,
    next_id: u64,
}

impl TraceArena {
    pub fn on_landed(&mut self, ground_point: Vec3, now: Duration) -> TraceId {
        let id = TraceId(self.next_id);
        self.next_id += 1;

        let trace = Trace {
            id,
            position: ground_point,
            created_at: now,
            opacity: 1.0,
        };
        match self.free.pop() {
            Some(slot) => self.slots[slot] = Some(trace),
            None => self.slots.push(Some(trace)),
        }
        id
    }

    /// Ages every live trace and retires the expired ones. Returns how many
    /// were retired.
    pub fn tick(&mut self, now: Duration, lifetime: Duration, decay: TraceDecay) -> usize {
        let mut retired = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(trace) = slot else {
                continue;
            };

            let age = trace.age(now);
            trace.opacity = trace.opacity.min(decay.opacity(age, lifetime));

            if age >= lifetime || trace.opacity <= 0.0 {
                *slot = None;
                self.free.push(index);
                retired += 1;
            }
        }
        retired
    }

    /// Live traces with their slot index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Trace)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|trace| (index, trace)))
    }

    pub fn get(&self, id: TraceId) -> Option<&Trace> {
        self.iter().map(|(_, trace)| trace).find(|trace| trace.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots allocated, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
