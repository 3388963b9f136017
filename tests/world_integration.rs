//! World engine integration tests

use zombsole::core::{Position, ThingId};
use zombsole::things::{ActionIntent, Thing};
use zombsole::weapons::Weapon;
use zombsole::world::World;

fn agent_at(name: &str, x: i32, y: i32, weapon: Weapon) -> Thing {
    let mut agent = Thing::agent(name.to_string(), weapon, vec![]);
    agent.position = Position::new(x, y);
    agent
}

#[test]
fn test_agent_hunts_a_zombie_down() {
    let mut world = World::new((20, 5), 7);
    let agent = world.spawn(agent_at("hunter", 1, 1, Weapon::rifle())).unwrap();
    world.spawn(Thing::zombie(Position::new(5, 1), 80)).unwrap();

    for _ in 0..100 {
        if world.living_zombie_count() == 0 {
            break;
        }
        world
            .set_agent_action(agent, ActionIntent::attack_closest())
            .unwrap();
        world.step();
    }

    assert_eq!(world.living_zombie_count(), 0);
    assert_eq!(world.zombie_deaths(), 1);
    assert_eq!(world.fighter_deaths(), 0);
    assert!(world.thing(agent).is_alive());
}

#[test]
fn test_dead_zombie_leaves_a_body_behind() {
    let mut world = World::new((10, 10), 3);
    let agent = world.spawn(agent_at("hunter", 0, 0, Weapon::axe())).unwrap();
    let zombie = world.spawn(Thing::zombie(Position::new(1, 0), 50)).unwrap();

    // Axe damage is at least 75, one hit is always lethal here.
    world
        .set_agent_action(agent, ActionIntent::attack(1, 0))
        .unwrap();
    world.step();

    assert!(!world.thing(zombie).is_alive());
    let position = world.thing(zombie).position;
    assert!(world.occupant_at(position).is_none());
    let body = world.visible_at(position).unwrap();
    assert!(!body.is_blocking());
    assert_eq!(body.name, "dead zombie");
}

#[test]
fn test_heal_closest_falls_back_to_self() {
    let mut world = World::new((10, 10), 11);
    let mut wounded = agent_at("medic", 2, 2, Weapon::knife());
    if let Some(life) = wounded.life_mut() {
        *life = 40;
    }
    let agent = world.spawn(wounded).unwrap();

    world
        .set_agent_action(agent, ActionIntent::heal_closest())
        .unwrap();
    world.step();

    let healed = world.thing(agent);
    assert!(healed.life().unwrap() > 40);
    assert_eq!(
        healed.status(),
        "healing self, because no other players are left"
    );
}

#[test]
fn test_same_seed_same_story() {
    let run = |seed: u64| -> (u64, u32, Vec<Position>) {
        let mut world = World::new((15, 15), seed);
        let agent = world.spawn(agent_at("hunter", 1, 1, Weapon::gun())).unwrap();
        world.spawn(Thing::zombie(Position::new(10, 10), 90)).unwrap();
        world.spawn(Thing::zombie(Position::new(12, 3), 90)).unwrap();

        for _ in 0..40 {
            world
                .set_agent_action(agent, ActionIntent::attack_closest())
                .unwrap();
            world.step();
        }
        let positions = world.things().iter().map(|thing| thing.position).collect();
        (world.t(), world.deaths(), positions)
    };

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_ids_are_stable_across_deaths() {
    let mut world = World::new((10, 10), 5);
    let agent = world.spawn(agent_at("hunter", 0, 0, Weapon::axe())).unwrap();
    let zombie = world.spawn(Thing::zombie(Position::new(1, 0), 10)).unwrap();

    world
        .set_agent_action(agent, ActionIntent::attack(1, 0))
        .unwrap();
    world.step();

    // The arena keeps dead things; ids keep resolving to the same thing.
    assert_eq!(zombie, ThingId(1));
    assert_eq!(world.thing(zombie).name, "zombie");
    assert!(!world.thing(zombie).is_alive());
}
