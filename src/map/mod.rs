//! Plain-text map loader
//!
//! Maps are text drawings, one character per cell. Walls and boxes become
//! world things; lowercase/uppercase spawn markers only record candidate
//! positions, the game decides what actually gets placed there. Any other
//! character is open ground, so hand-drawn maps can use dots or rubble for
//! texture; every character still counts toward the map size.
//!
//! ```text
//! w / W / █   wall
//! b / B / ▒   box
//! o / O       objective marker
//! p / P       player spawn candidate
//! z / Z       zombie spawn candidate
//! anything else   open ground
//! ```

use std::fs;
use std::path::Path;

use crate::core::error::{Result, ZombsoleError};
use crate::core::types::Position;
use crate::things::Thing;

/// A parsed map: static scenery plus spawn candidates
#[derive(Debug, Clone, Default)]
pub struct MapData {
    /// (width, height), covering the widest row and the last row
    pub size: (i32, i32),
    /// Walls, boxes and objective markers, ready to spawn
    pub things: Vec<Thing>,
    pub player_spawns: Vec<Position>,
    pub zombie_spawns: Vec<Position>,
    /// Objective positions, also present in `things` as markers
    pub objectives: Vec<Position>,
}

impl MapData {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    pub fn from_str(text: &str) -> Result<Self> {
        let mut map = MapData::default();
        let mut max_x = -1;
        let mut max_y = -1;

        for (row, line) in text.lines().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let position = Position {
                    x: col as i32,
                    y: row as i32,
                };
                max_x = max_x.max(position.x);
                max_y = max_y.max(position.y);
                match symbol.to_ascii_lowercase() {
                    'w' | '█' => map.things.push(Thing::wall(position)),
                    'b' | '▒' => map.things.push(Thing::box_obstacle(position)),
                    'o' => {
                        map.things.push(Thing::objective_location(position));
                        map.objectives.push(position);
                    }
                    'p' => map.player_spawns.push(position),
                    'z' => map.zombie_spawns.push(position),
                    _ => {}
                }
            }
        }

        if max_x < 0 {
            return Err(ZombsoleError::MalformedMap("map has no cells".to_string()));
        }
        map.size = (max_x + 1, max_y + 1);
        Ok(map)
    }
}
