//! Entity model: everything that can be placed in the world
//!
//! `Thing` is a closed tagged type matched exhaustively wherever behavior
//! differs (blocking, life access, decision capability), instead of an open
//! class hierarchy.

pub mod action;
pub mod behavior;

pub use action::{Action, ActionIntent, ActionType};

use serde::Serialize;

use crate::core::types::{Position, MAX_LIFE};
use crate::weapons::Weapon;

/// State shared by zombies
#[derive(Debug, Clone, Serialize)]
pub struct ZombieState {
    pub life: i32,
    pub weapon: Weapon,
    /// Human-readable last action
    pub status: String,
}

/// State shared by players and agents
#[derive(Debug, Clone, Serialize)]
pub struct FighterState {
    pub life: i32,
    pub weapon: Weapon,
    /// Human-readable last action
    pub status: String,
    /// Objective positions handed over by the map, used by some rules
    pub objectives: Vec<Position>,
    pub control: FighterControl,
}

/// Decision capability of a fighter
#[derive(Debug, Clone, Serialize)]
pub enum FighterControl {
    /// Built-in melee AI: attack the closest zombie, walk to it otherwise
    Brawler,
    /// Externally controlled: performs the injected intent, then idles
    Agent { pending: Option<ActionIntent> },
}

/// The variants of everything occupying or decorating a world cell
#[derive(Debug, Clone, Serialize)]
pub enum ThingKind {
    Wall,
    Box,
    /// Non-blocking marker used by win conditions
    ObjectiveLocation,
    /// Remains left behind on death, purely cosmetic
    DeadBody,
    Zombie(ZombieState),
    Fighter(FighterState),
}

/// Any occupant or marker placed in the world
#[derive(Debug, Clone, Serialize)]
pub struct Thing {
    pub name: String,
    pub position: Position,
    pub kind: ThingKind,
}

impl Thing {
    pub fn wall(position: Position) -> Self {
        Self {
            name: "wall".to_string(),
            position,
            kind: ThingKind::Wall,
        }
    }

    pub fn box_obstacle(position: Position) -> Self {
        Self {
            name: "box".to_string(),
            position,
            kind: ThingKind::Box,
        }
    }

    pub fn objective_location(position: Position) -> Self {
        Self {
            name: "objective".to_string(),
            position,
            kind: ThingKind::ObjectiveLocation,
        }
    }

    pub fn dead_body(name: String, position: Position) -> Self {
        Self {
            name,
            position,
            kind: ThingKind::DeadBody,
        }
    }

    pub fn zombie(position: Position, life: i32) -> Self {
        Self {
            name: "zombie".to_string(),
            position,
            kind: ThingKind::Zombie(ZombieState {
                life: life.clamp(0, MAX_LIFE),
                weapon: Weapon::zombie_claws(),
                status: String::new(),
            }),
        }
    }

    pub fn player(name: String, weapon: Weapon, objectives: Vec<Position>) -> Self {
        Self::fighter(name, weapon, objectives, FighterControl::Brawler)
    }

    pub fn agent(agent_id: String, weapon: Weapon, objectives: Vec<Position>) -> Self {
        Self::fighter(
            agent_id,
            weapon,
            objectives,
            FighterControl::Agent { pending: None },
        )
    }

    fn fighter(
        name: String,
        weapon: Weapon,
        objectives: Vec<Position>,
        control: FighterControl,
    ) -> Self {
        // Positions are assigned at spawn time
        Self {
            name,
            position: Position::new(0, 0),
            kind: ThingKind::Fighter(FighterState {
                life: MAX_LIFE,
                weapon,
                status: String::new(),
                objectives,
                control,
            }),
        }
    }

    /// Does this thing exclude other things from its cell?
    pub fn is_blocking(&self) -> bool {
        match self.kind {
            ThingKind::Wall | ThingKind::Box | ThingKind::Zombie(_) | ThingKind::Fighter(_) => true,
            ThingKind::ObjectiveLocation | ThingKind::DeadBody => false,
        }
    }

    /// Does this thing live in the decoration layer instead of occupancy?
    pub fn is_decoration(&self) -> bool {
        matches!(self.kind, ThingKind::ObjectiveLocation | ThingKind::DeadBody)
    }

    /// Can this thing act on its own during a tick?
    pub fn is_animate(&self) -> bool {
        matches!(self.kind, ThingKind::Zombie(_) | ThingKind::Fighter(_))
    }

    pub fn is_zombie(&self) -> bool {
        matches!(self.kind, ThingKind::Zombie(_))
    }

    pub fn is_fighter(&self) -> bool {
        matches!(self.kind, ThingKind::Fighter(_))
    }

    pub fn is_agent(&self) -> bool {
        matches!(
            self.kind,
            ThingKind::Fighter(FighterState {
                control: FighterControl::Agent { .. },
                ..
            })
        )
    }

    /// Current life, `None` for static things
    pub fn life(&self) -> Option<i32> {
        match &self.kind {
            ThingKind::Zombie(z) => Some(z.life),
            ThingKind::Fighter(f) => Some(f.life),
            _ => None,
        }
    }

    pub fn life_mut(&mut self) -> Option<&mut i32> {
        match &mut self.kind {
            ThingKind::Zombie(z) => Some(&mut z.life),
            ThingKind::Fighter(f) => Some(&mut f.life),
            _ => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life().map(|life| life > 0).unwrap_or(false)
    }

    /// Weapon carried by animate things
    pub fn weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ThingKind::Zombie(z) => Some(&z.weapon),
            ThingKind::Fighter(f) => Some(&f.weapon),
            _ => None,
        }
    }

    /// Update the human-readable status of an animate thing
    pub fn set_status(&mut self, status: impl Into<String>) {
        match &mut self.kind {
            ThingKind::Zombie(z) => z.status = status.into(),
            ThingKind::Fighter(f) => f.status = status.into(),
            _ => {}
        }
    }

    pub fn status(&self) -> &str {
        match &self.kind {
            ThingKind::Zombie(z) => &z.status,
            ThingKind::Fighter(f) => &f.status,
            _ => "",
        }
    }

    /// Display glyph; the basic set sticks to plain ASCII
    pub fn icon(&self, basic: bool) -> char {
        match (&self.kind, basic) {
            (ThingKind::Wall, false) => '█',
            (ThingKind::Wall, true) => 'W',
            (ThingKind::Box, false) => '▒',
            (ThingKind::Box, true) => 'B',
            (ThingKind::ObjectiveLocation, false) => '⚑',
            (ThingKind::ObjectiveLocation, true) => 'O',
            (ThingKind::DeadBody, false) => '☠',
            (ThingKind::DeadBody, true) => 'X',
            (ThingKind::Zombie(_), false) => '⚉',
            (ThingKind::Zombie(_), true) => 'Z',
            (
                ThingKind::Fighter(FighterState {
                    control: FighterControl::Agent { .. },
                    ..
                }),
                false,
            ) => '⩑',
            (
                ThingKind::Fighter(FighterState {
                    control: FighterControl::Agent { .. },
                    ..
                }),
                true,
            ) => 'A',
            (ThingKind::Fighter(_), false) => '⚇',
            (ThingKind::Fighter(_), true) => 'P',
        }
    }
}
