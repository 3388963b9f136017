//! World: the discrete-time simulation engine
//!
//! The world owns the tick counter, the thing arena, the exclusive
//! occupancy map, the non-blocking decoration layer, the event log and a
//! deterministic RNG. One call to `step()` is one atomic unit of
//! simulation time.

pub mod events;

pub use events::{EventLog, WorldEvent};

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::core::error::{Result, ZombsoleError};
use crate::core::types::{Position, ThingId, Tick, MAX_LIFE};
use crate::things::behavior::{self, WorldView};
use crate::things::{Action, ActionIntent, FighterControl, Thing, ThingKind};

pub struct World {
    size: (i32, i32),
    /// All things ever created, indexed by `ThingId`; never shrinks
    things: Vec<Thing>,
    /// Exclusive position index: at most one occupant per cell
    occupancy: AHashMap<Position, ThingId>,
    /// Non-blocking overlay (objective markers, dead bodies)
    decoration: AHashMap<Position, ThingId>,
    t: Tick,
    zombie_deaths: u32,
    fighter_deaths: u32,
    zombies_spawned: u32,
    events: EventLog,
    /// Deterministic RNG for combat damage and spawn draws
    rng: ChaCha8Rng,
}

impl World {
    pub fn new(size: (i32, i32), seed: u64) -> Self {
        Self {
            size,
            things: Vec::new(),
            occupancy: AHashMap::new(),
            decoration: AHashMap::new(),
            t: 0,
            zombie_deaths: 0,
            fighter_deaths: 0,
            zombies_spawned: 0,
            events: EventLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    pub fn t(&self) -> Tick {
        self.t
    }

    pub fn zombie_deaths(&self) -> u32 {
        self.zombie_deaths
    }

    pub fn fighter_deaths(&self) -> u32 {
        self.fighter_deaths
    }

    pub fn deaths(&self) -> u32 {
        self.zombie_deaths + self.fighter_deaths
    }

    pub fn zombies_spawned(&self) -> u32 {
        self.zombies_spawned
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn within_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.size.0 && position.y < self.size.1
    }

    pub fn thing(&self, id: ThingId) -> &Thing {
        &self.things[id.index()]
    }

    #[cfg(test)]
    pub(crate) fn thing_mut(&mut self, id: ThingId) -> &mut Thing {
        &mut self.things[id.index()]
    }

    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    pub fn occupant_at(&self, position: Position) -> Option<&Thing> {
        self.occupancy.get(&position).map(|id| self.thing(*id))
    }

    /// What a renderer should show at a cell: occupant over decoration
    pub fn visible_at(&self, position: Position) -> Option<&Thing> {
        self.occupant_at(position).or_else(|| {
            self.decoration.get(&position).map(|id| self.thing(*id))
        })
    }

    /// Positions of all objective location markers
    pub fn objective_positions(&self) -> Vec<Position> {
        self.things
            .iter()
            .filter(|thing| matches!(thing.kind, ThingKind::ObjectiveLocation))
            .map(|thing| thing.position)
            .collect()
    }

    pub fn living_zombie_count(&self) -> usize {
        self.things
            .iter()
            .filter(|thing| thing.is_zombie() && thing.is_alive())
            .count()
    }

    /// Place a thing at its declared position
    ///
    /// Decorations go to the non-exclusive layer; everything else claims
    /// its occupancy cell or fails. Never overwrites.
    pub fn spawn(&mut self, thing: Thing) -> Result<ThingId> {
        if !self.within_bounds(thing.position) {
            return Err(ZombsoleError::OutOfBounds(thing.position));
        }

        let id = ThingId(self.things.len() as u32);
        if thing.is_decoration() {
            self.decoration.insert(thing.position, id);
        } else {
            if self.occupancy.contains_key(&thing.position) {
                return Err(ZombsoleError::PositionOccupied(thing.position));
            }
            self.occupancy.insert(thing.position, id);
        }

        if thing.is_zombie() {
            self.zombies_spawned += 1;
        }
        self.things.push(thing);
        Ok(id)
    }

    /// Spawn things at random free cells drawn from the candidate list
    ///
    /// Candidates are drawn without replacement; when they run out, either
    /// the whole call fails (`fail_if_cant`) or the remaining things are
    /// silently skipped.
    pub fn spawn_in_random(
        &mut self,
        things: Vec<Thing>,
        candidates: &[Position],
        fail_if_cant: bool,
    ) -> Result<Vec<ThingId>> {
        let mut pool: Vec<Position> = candidates.to_vec();
        pool.shuffle(&mut self.rng);

        let mut spawned = Vec::with_capacity(things.len());
        for mut thing in things {
            let mut position = None;
            while let Some(candidate) = pool.pop() {
                if !self.occupancy.contains_key(&candidate) {
                    position = Some(candidate);
                    break;
                }
            }

            match position {
                Some(found) => {
                    thing.position = found;
                    spawned.push(self.spawn(thing)?);
                }
                None if fail_if_cant => {
                    return Err(ZombsoleError::NoRoom(thing.name));
                }
                None => {
                    tracing::debug!(name = %thing.name, "no free spawn cell, skipping");
                }
            }
        }
        Ok(spawned)
    }

    /// Inject the next action for an externally controlled agent
    ///
    /// This is the message-passing boundary: however the intent was
    /// produced (human input, network, RL policy), the world only sees the
    /// resolved value, consumed on the next `step()`.
    pub fn set_agent_action(&mut self, id: ThingId, intent: ActionIntent) -> Result<()> {
        if let Some(Thing {
            kind:
                ThingKind::Fighter(crate::things::FighterState {
                    control: FighterControl::Agent { pending },
                    ..
                }),
            ..
        }) = self.things.get_mut(id.index())
        {
            *pending = Some(intent);
            return Ok(());
        }

        let name = match self.things.get(id.index()) {
            Some(thing) => thing.name.clone(),
            None => format!("#{}", id.0),
        };
        Err(ZombsoleError::UnknownAgent(name))
    }

    /// Advance the simulation by exactly one tick
    ///
    /// Every animate thing decides against a frozen pre-tick snapshot of
    /// the occupancy map, in spawn order, and its action is applied
    /// immediately against the live maps: earlier movers win contested
    /// cells, later conflicting moves degrade to blocked no-ops.
    pub fn step(&mut self) {
        self.t += 1;

        let snapshot = self.occupancy.clone();
        let mut actors: Vec<ThingId> = snapshot
            .values()
            .copied()
            .filter(|id| self.things[id.index()].is_animate())
            .collect();
        actors.sort_unstable();

        for actor in actors {
            if !self.things[actor.index()].is_alive() {
                // killed earlier in this same tick
                continue;
            }

            let (action, status) = self.decide(actor, &snapshot);
            self.things[actor.index()].set_status(status);
            if let Some(action) = action {
                self.apply(actor, action);
            }
        }
    }

    fn decide(
        &mut self,
        actor: ThingId,
        snapshot: &AHashMap<Position, ThingId>,
    ) -> (Option<Action>, String) {
        // Agents consume their injected intent exactly once
        let pending = match &mut self.things[actor.index()].kind {
            ThingKind::Fighter(crate::things::FighterState {
                control: FighterControl::Agent { pending },
                ..
            }) => pending.take(),
            _ => None,
        };

        let view = WorldView {
            things: &self.things,
            occupancy: snapshot,
            size: self.size,
        };

        match &self.things[actor.index()].kind {
            ThingKind::Zombie(_) => behavior::zombie_action(actor, &view),
            ThingKind::Fighter(state) => match state.control {
                FighterControl::Agent { .. } => behavior::agent_action(actor, pending, &view),
                FighterControl::Brawler => behavior::brawler_action(actor, &view),
            },
            _ => (None, String::new()),
        }
    }

    fn apply(&mut self, actor: ThingId, action: Action) {
        match action {
            Action::Move { dx, dy } => self.apply_move(actor, dx, dy),
            Action::Attack(target) => self.apply_attack(actor, target),
            Action::Heal(target) => self.apply_heal(actor, target),
        }
    }

    fn apply_move(&mut self, actor: ThingId, dx: i32, dy: i32) {
        if dx.abs() > 1 || dy.abs() > 1 {
            self.things[actor.index()].set_status("can't move that far");
            self.record(actor, format!("tried to move by ({}, {})", dx, dy));
            return;
        }

        let from = self.things[actor.index()].position;
        let destination = from.offset(dx, dy);

        // checked against the live map: earlier movers already hold cells
        if !self.within_bounds(destination) || self.occupancy.contains_key(&destination) {
            self.things[actor.index()].set_status("blocked, can't move");
            self.record(actor, format!("move to {} blocked", destination));
            tracing::debug!(tick = self.t, thing = ?actor, %destination, "move blocked");
            return;
        }

        self.occupancy.remove(&from);
        self.occupancy.insert(destination, actor);
        self.things[actor.index()].position = destination;
    }

    fn apply_attack(&mut self, actor: ThingId, target: ThingId) {
        if !self.things[target.index()].is_alive() {
            self.things[actor.index()].set_status("no target to attack");
            return;
        }

        let attacker_position = self.things[actor.index()].position;
        let target_position = self.things[target.index()].position;
        let Some(weapon) = self.things[actor.index()].weapon().cloned() else {
            return;
        };

        if attacker_position.distance_to(target_position) > weapon.max_range {
            self.things[actor.index()].set_status("target out of range");
            self.record(actor, "attack out of range".to_string());
            return;
        }

        let damage = weapon.sample_damage(&mut self.rng);
        if let Some(life) = self.things[target.index()].life_mut() {
            *life = (*life - damage).max(0);
        }
        let target_name = self.things[target.index()].name.clone();
        self.record(actor, format!("hit {} for {}", target_name, damage));

        if self.things[target.index()].life() == Some(0) {
            self.kill(target);
        }
    }

    fn apply_heal(&mut self, actor: ThingId, target: ThingId) {
        // non-life-bearing targets are filtered at decision time; a target
        // that died earlier in the tick still ends up here
        if !self.things[target.index()].is_alive() {
            self.things[actor.index()].set_status("too late to heal that");
            return;
        }

        let healer_position = self.things[actor.index()].position;
        let target_position = self.things[target.index()].position;
        let Some(weapon) = self.things[actor.index()].weapon().cloned() else {
            return;
        };

        if healer_position.distance_to(target_position) > weapon.max_range {
            self.things[actor.index()].set_status("target out of reach");
            self.record(actor, "heal out of range".to_string());
            return;
        }

        let amount = weapon.sample_damage(&mut self.rng);
        if let Some(life) = self.things[target.index()].life_mut() {
            *life = (*life + amount).min(MAX_LIFE);
        }
        let target_name = self.things[target.index()].name.clone();
        self.record(actor, format!("healed {} for {}", target_name, amount));
    }

    /// Remove a dead thing from occupancy and leave remains behind
    fn kill(&mut self, target: ThingId) {
        let position = self.things[target.index()].position;
        self.occupancy.remove(&position);

        if self.things[target.index()].is_zombie() {
            self.zombie_deaths += 1;
        } else {
            self.fighter_deaths += 1;
        }

        let name = format!("dead {}", self.things[target.index()].name);
        let body_id = ThingId(self.things.len() as u32);
        self.things.push(Thing::dead_body(name, position));
        self.decoration.insert(position, body_id);

        self.record(target, "died".to_string());
        tracing::debug!(
            tick = self.t,
            thing = ?target,
            name = %self.things[target.index()].name,
            "thing died"
        );
    }

    fn record(&mut self, thing: ThingId, description: String) {
        let name = self.things[thing.index()].name.clone();
        self.events.record(self.t, thing, name, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::Weapon;

    fn fighter_at(name: &str, x: i32, y: i32, weapon: Weapon) -> Thing {
        let mut fighter = Thing::player(name.to_string(), weapon, vec![]);
        fighter.position = Position::new(x, y);
        fighter
    }

    fn agent_at(name: &str, x: i32, y: i32, weapon: Weapon) -> Thing {
        let mut agent = Thing::agent(name.to_string(), weapon, vec![]);
        agent.position = Position::new(x, y);
        agent
    }

    #[test]
    fn test_spawn_rejects_occupied_cell() {
        let mut world = World::new((10, 10), 42);
        world.spawn(Thing::wall(Position::new(3, 3))).unwrap();
        let result = world.spawn(Thing::wall(Position::new(3, 3)));
        assert!(matches!(result, Err(ZombsoleError::PositionOccupied(_))));
    }

    #[test]
    fn test_spawn_rejects_out_of_bounds() {
        let mut world = World::new((10, 10), 42);
        let result = world.spawn(Thing::wall(Position::new(10, 0)));
        assert!(matches!(result, Err(ZombsoleError::OutOfBounds(_))));
    }

    #[test]
    fn test_decorations_share_cells_with_occupants() {
        let mut world = World::new((10, 10), 42);
        world
            .spawn(Thing::objective_location(Position::new(3, 3)))
            .unwrap();
        world.spawn(Thing::wall(Position::new(3, 3))).unwrap();
        // occupant wins the visible slot
        assert!(world.visible_at(Position::new(3, 3)).unwrap().is_blocking());
    }

    #[test]
    fn test_step_increments_tick_exactly_once() {
        let mut world = World::new((10, 10), 42);
        assert_eq!(world.t(), 0);
        world.step();
        assert_eq!(world.t(), 1);
        world.step();
        assert_eq!(world.t(), 2);
    }

    #[test]
    fn test_spawn_in_random_assigns_unique_positions() {
        let mut world = World::new((10, 10), 42);
        let candidates: Vec<Position> = (0..5).map(|x| Position::new(x, 0)).collect();
        let zombies = (0..5).map(|_| Thing::zombie(Position::new(0, 0), 80)).collect();
        let spawned = world.spawn_in_random(zombies, &candidates, true).unwrap();

        let mut positions: Vec<Position> =
            spawned.iter().map(|id| world.thing(*id).position).collect();
        positions.sort_by_key(|p| (p.x, p.y));
        positions.dedup();
        assert_eq!(positions.len(), 5);
    }

    #[test]
    fn test_spawn_in_random_fails_when_no_room() {
        let mut world = World::new((10, 10), 42);
        let candidates = vec![Position::new(0, 0)];
        let zombies = (0..2).map(|_| Thing::zombie(Position::new(0, 0), 80)).collect();
        let result = world.spawn_in_random(zombies, &candidates, true);
        assert!(matches!(result, Err(ZombsoleError::NoRoom(_))));
    }

    #[test]
    fn test_spawn_in_random_skips_quietly_when_allowed() {
        let mut world = World::new((10, 10), 42);
        let candidates = vec![Position::new(0, 0)];
        let zombies = (0..3).map(|_| Thing::zombie(Position::new(0, 0), 80)).collect();
        let spawned = world.spawn_in_random(zombies, &candidates, false).unwrap();
        assert_eq!(spawned.len(), 1);
    }

    #[test]
    fn test_agent_attack_in_range_damages_zombie() {
        let mut world = World::new((20, 20), 42);
        let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::rifle())).unwrap();
        let zombie = world.spawn(Thing::zombie(Position::new(5, 0), 100)).unwrap();

        world.set_agent_action(agent, ActionIntent::attack(5, 0)).unwrap();
        world.step();

        assert!(world.thing(zombie).life().unwrap() < 100);
    }

    #[test]
    fn test_attack_beyond_range_is_noop() {
        let mut world = World::new((30, 30), 42);
        let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::shotgun())).unwrap();
        let zombie = world.spawn(Thing::zombie(Position::new(9, 0), 100)).unwrap();

        // target exists at the offset, but shotgun range is 3
        world.set_agent_action(agent, ActionIntent::attack(9, 0)).unwrap();
        world.step();

        assert_eq!(world.thing(zombie).life(), Some(100));
        assert_eq!(world.thing(agent).status(), "target out of range");
    }

    #[test]
    fn test_self_heal_increases_life_and_caps() {
        let mut world = World::new((10, 10), 42);
        let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::rifle())).unwrap();

        // wound the agent directly through the arena for the test
        if let Some(life) = world.things[agent.index()].life_mut() {
            *life = 25;
        }

        world.set_agent_action(agent, ActionIntent::heal_self()).unwrap();
        world.step();
        let healed = world.thing(agent).life().unwrap();
        assert!(healed > 25);

        for _ in 0..20 {
            world.set_agent_action(agent, ActionIntent::heal_self()).unwrap();
            world.step();
        }
        assert_eq!(world.thing(agent).life(), Some(MAX_LIFE));
    }

    #[test]
    fn test_death_leaves_body_and_counts() {
        let mut world = World::new((10, 10), 42);
        let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::axe())).unwrap();
        let zombie = world.spawn(Thing::zombie(Position::new(1, 0), 10)).unwrap();

        // axe does 75-100, zombie has 10 life: one hit kills
        world.set_agent_action(agent, ActionIntent::attack(1, 0)).unwrap();
        world.step();

        assert_eq!(world.thing(zombie).life(), Some(0));
        assert_eq!(world.zombie_deaths(), 1);
        assert!(world.occupant_at(Position::new(1, 0)).is_none());
        let remains = world.visible_at(Position::new(1, 0)).unwrap();
        assert!(matches!(remains.kind, ThingKind::DeadBody));
        assert!(world
            .events()
            .for_tick(1)
            .any(|event| event.description == "died"));
    }

    #[test]
    fn test_simultaneous_attacks_accumulate() {
        let mut world = World::new((20, 20), 42);
        let a = world.spawn(agent_at("a", 0, 0, Weapon::rifle())).unwrap();
        let b = world.spawn(agent_at("b", 0, 2, Weapon::rifle())).unwrap();
        let zombie = world.spawn(Thing::zombie(Position::new(4, 1), 100)).unwrap();

        world.set_agent_action(a, ActionIntent::attack(4, 1)).unwrap();
        world.set_agent_action(b, ActionIntent::attack(4, -1)).unwrap();
        world.step();

        // rifle does 25-75 per hit; two hits leave at most 50
        assert!(world.thing(zombie).life().unwrap() <= 50);
    }

    #[test]
    fn test_contested_cell_goes_to_first_mover() {
        let mut world = World::new((10, 10), 42);
        let first = world.spawn(agent_at("first", 0, 1, Weapon::knife())).unwrap();
        let second = world.spawn(agent_at("second", 2, 1, Weapon::knife())).unwrap();

        world.set_agent_action(first, ActionIntent::move_by(1, 0)).unwrap();
        world.set_agent_action(second, ActionIntent::move_by(-1, 0)).unwrap();
        world.step();

        assert_eq!(world.thing(first).position, Position::new(1, 1));
        assert_eq!(world.thing(second).position, Position::new(2, 1));
        assert_eq!(world.thing(second).status(), "blocked, can't move");
    }

    #[test]
    fn test_move_farther_than_one_cell_is_rejected() {
        let mut world = World::new((10, 10), 42);
        let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::knife())).unwrap();

        world.set_agent_action(agent, ActionIntent::move_by(3, 0)).unwrap();
        world.step();

        assert_eq!(world.thing(agent).position, Position::new(0, 0));
        assert_eq!(world.thing(agent).status(), "can't move that far");
    }

    #[test]
    fn test_mover_is_not_bitten_until_the_next_tick() {
        let mut world = World::new((10, 10), 42);
        let agent = world.spawn(agent_at("runner", 0, 0, Weapon::knife())).unwrap();
        world.spawn(Thing::zombie(Position::new(2, 0), 80)).unwrap();

        // pre-tick distance is 2.0, outside claw range, even though the
        // move ends adjacent to the zombie
        world.set_agent_action(agent, ActionIntent::move_by(1, 0)).unwrap();
        world.step();
        assert_eq!(world.thing(agent).position, Position::new(1, 0));
        assert_eq!(world.thing(agent).life(), Some(MAX_LIFE));

        world.step();
        assert!(world.thing(agent).life().unwrap() < MAX_LIFE);
    }

    #[test]
    fn test_set_agent_action_rejects_non_agents() {
        let mut world = World::new((10, 10), 42);
        let zombie = world.spawn(Thing::zombie(Position::new(1, 0), 80)).unwrap();
        let result = world.set_agent_action(zombie, ActionIntent::attack_closest());
        assert!(matches!(
            result,
            Err(ZombsoleError::UnknownAgent(name)) if name == "zombie"
        ));

        let result = world.set_agent_action(ThingId(99), ActionIntent::attack_closest());
        assert!(matches!(
            result,
            Err(ZombsoleError::UnknownAgent(name)) if name == "#99"
        ));
    }

    #[test]
    fn test_same_seed_same_story() {
        let run = |seed: u64| {
            let mut world = World::new((20, 20), seed);
            let agent = world.spawn(agent_at("agent0", 0, 0, Weapon::rifle())).unwrap();
            let zombie = world.spawn(Thing::zombie(Position::new(5, 0), 100)).unwrap();
            for _ in 0..3 {
                world.set_agent_action(agent, ActionIntent::attack_closest()).unwrap();
                world.step();
            }
            world.thing(zombie).life()
        };
        assert_eq!(run(99), run(99));
    }
}
