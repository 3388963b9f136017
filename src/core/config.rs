//! Game configuration with documented fields
//!
//! Everything the orchestrator needs to build an episode is collected here,
//! so a game can be reconstructed (and replayed deterministically) from one
//! value.

use crate::core::error::{Result, ZombsoleError};

pub const KNOWN_WEAPONS: [&str; 6] = ["knife", "axe", "gun", "rifle", "shotgun", "random"];
pub const KNOWN_RULES: [&str; 4] = ["extermination", "survival", "evacuation", "safehouse"];

/// Configuration for a single game episode
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Win/loss ruleset name, resolved through the rules factory
    pub rules_name: String,

    /// Number of built-in AI players to spawn at player spawn points
    pub players: u32,

    /// Identifiers of externally controlled agents
    ///
    /// Agents take no action on their own; an action intent must be
    /// injected for them before each `step()`.
    pub agent_ids: Vec<String>,

    /// Weapon names for the agents, cycled when shorter than `agent_ids`
    pub agent_weapons: Vec<String>,

    /// Zombies spawned before the first tick
    pub initial_zombies: u32,

    /// When the living zombie count drops below this, new zombies are
    /// spawned after the tick to top it back up
    pub minimum_zombies: u32,

    /// Seed for the world RNG (combat damage, spawn draws)
    ///
    /// Two games built from identical configs and identical agent inputs
    /// play out identically.
    pub seed: u64,

    /// Episode cap enforced by the orchestrator, not the world.
    /// `None` means the game only ends when the rules say so.
    pub max_ticks: Option<u64>,

    /// Use plain ASCII icons instead of the fancy unicode set
    pub use_basic_icons: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules_name: "extermination".to_string(),
            players: 1,
            agent_ids: Vec::new(),
            agent_weapons: vec!["rifle".to_string()],
            initial_zombies: 5,
            minimum_zombies: 0,
            seed: 12345,
            max_ticks: None,
            use_basic_icons: false,
        }
    }
}

impl GameConfig {
    /// Validate configuration for internal consistency
    ///
    /// Name lookups fail fast here instead of deep inside spawning.
    pub fn validate(&self) -> Result<()> {
        if !KNOWN_RULES.contains(&self.rules_name.as_str()) {
            return Err(ZombsoleError::InvalidRules(self.rules_name.clone()));
        }

        for name in &self.agent_weapons {
            if !KNOWN_WEAPONS.contains(&name.to_lowercase().as_str()) {
                return Err(ZombsoleError::InvalidWeapon(name.clone()));
            }
        }

        if !self.agent_ids.is_empty() && self.agent_weapons.is_empty() {
            return Err(ZombsoleError::InvalidConfig(
                "agents configured but no agent weapons given".to_string(),
            ));
        }

        if self.players == 0 && self.agent_ids.is_empty() {
            return Err(ZombsoleError::InvalidConfig(
                "a game needs at least one player or agent".to_string(),
            ));
        }

        Ok(())
    }

    /// Weapon name for the agent at `index`, cycling the configured list
    pub fn agent_weapon_name(&self, index: usize) -> &str {
        &self.agent_weapons[index % self.agent_weapons.len()]
    }
}
