//! Game orchestrator
//!
//! Builds a world from a config and a parsed map, owns the rules object and
//! the agent name registry, and drives the tick/respawn/endgame loop.

use ahash::AHashMap;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::config::GameConfig;
use crate::core::error::{Result, ZombsoleError};
use crate::core::types::{Position, ThingId, Tick, MAX_LIFE};
use crate::map::MapData;
use crate::rules::{create_rules, GameView, Rules};
use crate::things::{ActionIntent, Thing};
use crate::weapons::weapon_by_name;
use crate::world::World;

/// Final result of a finished game
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub won: bool,
    pub description: String,
    pub ticks: Tick,
    pub zombie_deaths: u32,
    pub fighter_deaths: u32,
}

/// A running game episode
pub struct Game {
    config: GameConfig,
    world: World,
    rules: Box<dyn Rules>,
    players: Vec<ThingId>,
    agents: Vec<ThingId>,
    agent_index: AHashMap<String, ThingId>,
    zombie_spawns: Vec<Position>,
}

impl Game {
    /// Build a game: scenery first, then fighters, then the initial horde
    pub fn new(config: GameConfig, map: MapData) -> Result<Self> {
        config.validate()?;
        let rules = create_rules(&config.rules_name)?;
        let mut world = World::new(map.size, config.seed);

        for thing in map.things {
            world.spawn(thing)?;
        }

        let mut fighters = Vec::new();
        for index in 0..config.players {
            let weapon = weapon_by_name("random", world.rng_mut())?;
            fighters.push(Thing::player(
                format!("player_{index}"),
                weapon,
                map.objectives.clone(),
            ));
        }
        for (index, agent_id) in config.agent_ids.iter().enumerate() {
            let weapon = weapon_by_name(config.agent_weapon_name(index), world.rng_mut())?;
            fighters.push(Thing::agent(
                agent_id.clone(),
                weapon,
                map.objectives.clone(),
            ));
        }

        // Fighters must fit; a map without room for them is unplayable.
        let fighter_ids = world.spawn_in_random(fighters, &map.player_spawns, true)?;
        let players = fighter_ids[..config.players as usize].to_vec();
        let agents = fighter_ids[config.players as usize..].to_vec();
        let agent_index = config
            .agent_ids
            .iter()
            .cloned()
            .zip(agents.iter().copied())
            .collect();

        let mut game = Self {
            config,
            world,
            rules,
            players,
            agents,
            agent_index,
            zombie_spawns: map.zombie_spawns,
        };
        game.spawn_zombies(game.config.initial_zombies)?;
        info!(
            rules = game.rules.name(),
            players = game.players.len(),
            agents = game.agents.len(),
            zombies = game.world.living_zombie_count(),
            "game ready"
        );
        Ok(game)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fighter ids in spawn order, players first
    pub fn fighter_ids(&self) -> impl Iterator<Item = ThingId> + '_ {
        self.players.iter().chain(self.agents.iter()).copied()
    }

    fn view(&self) -> GameView<'_> {
        GameView {
            world: &self.world,
            players: &self.players,
            agents: &self.agents,
        }
    }

    /// Queue an intent for a named agent, consumed on the next tick
    pub fn inject_action(&mut self, agent_id: &str, intent: ActionIntent) -> Result<()> {
        let id = self
            .agent_index
            .get(agent_id)
            .copied()
            .ok_or_else(|| ZombsoleError::UnknownAgent(agent_id.to_string()))?;
        self.world.set_agent_action(id, intent)
    }

    /// Advance one tick, then top the horde back up to the minimum
    pub fn tick(&mut self) -> Result<()> {
        self.world.step();

        let living = self.world.living_zombie_count() as u32;
        if living < self.config.minimum_zombies {
            let missing = self.config.minimum_zombies - living;
            debug!(missing, "respawning zombies");
            self.spawn_zombies(missing)?;
        }
        Ok(())
    }

    /// The game outcome, or `None` while still running
    ///
    /// The tick cap resolves the outcome through the same rules predicate,
    /// so modes that cannot end on their own (survival) are decided by who
    /// is still standing when time runs out.
    pub fn outcome(&self) -> Option<Outcome> {
        let view = self.view();
        let time_up = self
            .config
            .max_ticks
            .map(|cap| self.world.t() >= cap)
            .unwrap_or(false);
        if !self.rules.game_ended(&view) && !time_up {
            return None;
        }
        let (won, description) = self.rules.game_won(&view);
        Some(Outcome {
            won,
            description,
            ticks: self.world.t(),
            zombie_deaths: self.world.zombie_deaths(),
            fighter_deaths: self.world.fighter_deaths(),
        })
    }

    /// Run until the rules or the tick cap end the game
    ///
    /// Built-in players act on their own; agents idle unless driven through
    /// `inject_action` between ticks, so this is mostly useful for
    /// player-only games and tests.
    pub fn play(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome() {
                info!(
                    won = outcome.won,
                    ticks = outcome.ticks,
                    description = %outcome.description,
                    "game over"
                );
                return Ok(outcome);
            }
            self.tick()?;
        }
    }

    fn spawn_zombies(&mut self, count: u32) -> Result<()> {
        let mut zombies = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let life = self.world.rng_mut().gen_range(MAX_LIFE / 2..=MAX_LIFE);
            zombies.push(Thing::zombie(Position::new(0, 0), life));
        }
        // Zombies that find no room are dropped; the horde recovers on
        // later respawn checks.
        self.world.spawn_in_random(zombies, &self.zombie_spawns, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: &str = "\
wwwwwwwwww
w p    z w
w p    z w
w  o   z w
wwwwwwwwww";

    fn arena() -> MapData {
        MapData::from_str(ARENA).unwrap()
    }

    fn config(rules: &str) -> GameConfig {
        GameConfig {
            rules_name: rules.to_string(),
            players: 1,
            initial_zombies: 2,
            minimum_zombies: 0,
            seed: 99,
            max_ticks: Some(500),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_build_places_fighters_and_zombies() {
        let game = Game::new(config("extermination"), arena()).unwrap();
        assert_eq!(game.fighter_ids().count(), 1);
        assert_eq!(game.world().living_zombie_count(), 2);
    }

    #[test]
    fn test_no_zombies_is_an_immediate_extermination_win() {
        let mut cfg = config("extermination");
        cfg.initial_zombies = 0;
        let game = Game::new(cfg, arena()).unwrap();
        let outcome = game.outcome().unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.ticks, 0);
    }

    #[test]
    fn test_too_many_fighters_for_the_map_fails() {
        let mut cfg = config("extermination");
        cfg.players = 3;
        assert!(matches!(
            Game::new(cfg, arena()),
            Err(ZombsoleError::NoRoom(_))
        ));
    }

    #[test]
    fn test_minimum_zombies_respawn_after_tick() {
        let mut cfg = config("survival");
        cfg.initial_zombies = 0;
        cfg.minimum_zombies = 2;
        let mut game = Game::new(cfg, arena()).unwrap();
        assert_eq!(game.world().living_zombie_count(), 0);
        game.tick().unwrap();
        assert_eq!(game.world().living_zombie_count(), 2);
    }

    #[test]
    fn test_unknown_agent_injection_fails() {
        let mut game = Game::new(config("extermination"), arena()).unwrap();
        assert!(matches!(
            game.inject_action("ghost", ActionIntent::heal_self()),
            Err(ZombsoleError::UnknownAgent(_))
        ));
    }

    #[test]
    fn test_agent_registry_accepts_configured_ids() {
        let mut cfg = config("extermination");
        cfg.players = 0;
        cfg.agent_ids = vec!["agent_a".to_string()];
        let mut game = Game::new(cfg, arena()).unwrap();
        assert!(game.inject_action("agent_a", ActionIntent::heal_self()).is_ok());
    }

    #[test]
    fn test_play_is_deterministic_per_seed() {
        let a = Game::new(config("extermination"), arena())
            .unwrap()
            .play()
            .unwrap();
        let b = Game::new(config("extermination"), arena())
            .unwrap()
            .play()
            .unwrap();
        assert_eq!(a.won, b.won);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.zombie_deaths, b.zombie_deaths);
    }
}
