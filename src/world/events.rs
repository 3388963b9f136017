//! Append-only world event log
//!
//! Consumed by renderers and telemetry; the world only ever appends.

use serde::Serialize;

use crate::core::types::{ThingId, Tick};

/// One notable thing that happened during a tick
#[derive(Debug, Clone, Serialize)]
pub struct WorldEvent {
    pub tick: Tick,
    pub thing: ThingId,
    /// Name of the thing at the time of the event
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<WorldEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, thing: ThingId, name: String, description: String) {
        self.entries.push(WorldEvent {
            tick,
            thing,
            name,
            description,
        });
    }

    pub fn entries(&self) -> &[WorldEvent] {
        &self.entries
    }

    /// Events recorded for one tick, in order of occurrence
    pub fn for_tick(&self, tick: Tick) -> impl Iterator<Item = &WorldEvent> {
        self.entries.iter().filter(move |event| event.tick == tick)
    }
}
