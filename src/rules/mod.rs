//! Pluggable win/loss rules
//!
//! A rules object inspects a read-only view of the game after each tick and
//! decides whether the game is over and how it went. Rules never mutate the
//! world.

pub mod evacuation;
pub mod extermination;
pub mod safehouse;
pub mod survival;

pub use evacuation::EvacuationRules;
pub use extermination::ExterminationRules;
pub use safehouse::SafeHouseRules;
pub use survival::SurvivalRules;

use crate::core::error::{Result, ZombsoleError};
use crate::core::types::ThingId;
use crate::things::Thing;
use crate::world::World;

/// Read-only view handed to rules after each tick
pub struct GameView<'a> {
    pub world: &'a World,
    /// Built-in players, in spawn order
    pub players: &'a [ThingId],
    /// Externally controlled agents, in spawn order
    pub agents: &'a [ThingId],
}

impl<'a> GameView<'a> {
    /// All living fighters (players and agents), in spawn order
    pub fn living_fighters(&self) -> Vec<&'a Thing> {
        self.players
            .iter()
            .chain(self.agents.iter())
            .map(|id| self.world.thing(*id))
            .filter(|thing| thing.is_alive())
            .collect()
    }

    /// Any built-in player still alive?
    pub fn players_alive(&self) -> bool {
        self.players
            .iter()
            .any(|id| self.world.thing(*id).is_alive())
    }

    /// Any externally controlled agent still alive?
    pub fn agents_alive(&self) -> bool {
        self.agents
            .iter()
            .any(|id| self.world.thing(*id).is_alive())
    }

    pub fn fighters_alive(&self) -> bool {
        self.players_alive() || self.agents_alive()
    }
}

/// End-of-game predicates checked after each tick
pub trait Rules {
    fn name(&self) -> &'static str;

    /// True once the game is over, in victory or defeat
    fn game_ended(&self, view: &GameView<'_>) -> bool;

    /// Outcome and a short human-readable description
    ///
    /// Only meaningful once `game_ended` returned true.
    fn game_won(&self, view: &GameView<'_>) -> (bool, String);
}

/// Resolve a rules implementation by name
pub fn create_rules(name: &str) -> Result<Box<dyn Rules>> {
    match name {
        "extermination" => Ok(Box::new(ExterminationRules)),
        "survival" => Ok(Box::new(SurvivalRules)),
        "evacuation" => Ok(Box::new(EvacuationRules)),
        "safehouse" => Ok(Box::new(SafeHouseRules)),
        _ => Err(ZombsoleError::InvalidRules(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::weapons::Weapon;

    #[test]
    fn test_view_distinguishes_players_from_agents() {
        let mut world = World::new((10, 10), 1);
        let mut player = Thing::player("jack".to_string(), Weapon::knife(), vec![]);
        player.position = Position::new(0, 0);
        let player = world.spawn(player).unwrap();
        let mut agent = Thing::agent("agent0".to_string(), Weapon::rifle(), vec![]);
        agent.position = Position::new(5, 5);
        let agent = world.spawn(agent).unwrap();

        if let Some(life) = world.thing_mut(player).life_mut() {
            *life = 0;
        }
        let players = [player];
        let agents = [agent];
        let view = GameView {
            world: &world,
            players: &players,
            agents: &agents,
        };
        assert!(!view.players_alive());
        assert!(view.agents_alive());
        assert!(view.fighters_alive());
        assert_eq!(view.living_fighters().len(), 1);
    }

    #[test]
    fn test_factory_resolves_all_known_rules() {
        for name in ["extermination", "survival", "evacuation", "safehouse"] {
            assert_eq!(create_rules(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_factory_rejects_unknown_rules() {
        assert!(matches!(
            create_rules("deathmatch"),
            Err(ZombsoleError::InvalidRules(_))
        ));
    }
}
