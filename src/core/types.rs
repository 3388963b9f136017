//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Life cap for players and zombies
pub const MAX_LIFE: i32 = 100;

/// Handle to a thing stored in the world arena
///
/// Things are never removed from the arena, so handles stay valid for the
/// lifetime of the world. Handle order is spawn order, which gives the
/// deterministic iteration order the tick engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThingId(pub u32);

impl ThingId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Grid position, used as the key of the occupancy and decoration maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Position displaced by a relative offset
    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
