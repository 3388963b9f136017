//! Decision policies: zombie AI, built-in player AI, agent intent translation
//!
//! All policies read the same frozen pre-tick view of the world, so the
//! order in which things are processed never changes what they saw.

use ahash::AHashMap;

use crate::core::types::{Position, ThingId};
use crate::things::action::{Action, ActionIntent, ActionType};
use crate::things::Thing;

/// Frozen view of the world handed to every decision in a tick
///
/// The occupancy map is a snapshot taken before any mutation, and candidate
/// positions are read from it, so every decision in a tick sees things where
/// they stood when the tick began. Only life is read from the live arena,
/// making damage dealt earlier in the tick visible.
pub struct WorldView<'a> {
    pub things: &'a [Thing],
    pub occupancy: &'a AHashMap<Position, ThingId>,
    pub size: (i32, i32),
}

impl<'a> WorldView<'a> {
    pub fn thing(&self, id: ThingId) -> &Thing {
        &self.things[id.index()]
    }

    pub fn occupant_at(&self, position: Position) -> Option<ThingId> {
        self.occupancy.get(&position).copied()
    }

    pub fn within_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.size.0 && position.y < self.size.1
    }

    fn is_free(&self, position: Position) -> bool {
        self.within_bounds(position) && self.occupant_at(position).is_none()
    }

    /// Living fighters at their pre-tick positions, in spawn order
    pub fn living_fighters(&self, exclude: Option<ThingId>) -> Vec<(ThingId, Position)> {
        self.living_matching(exclude, Thing::is_fighter)
    }

    /// Living zombies at their pre-tick positions, in spawn order
    pub fn living_zombies(&self) -> Vec<(ThingId, Position)> {
        self.living_matching(None, Thing::is_zombie)
    }

    fn living_matching(
        &self,
        exclude: Option<ThingId>,
        matches: impl Fn(&Thing) -> bool,
    ) -> Vec<(ThingId, Position)> {
        let mut found: Vec<(ThingId, Position)> = self
            .occupancy
            .iter()
            .map(|(position, id)| (*id, *position))
            .filter(|(id, _)| {
                Some(*id) != exclude && matches(self.thing(*id)) && self.thing(*id).is_alive()
            })
            .collect();
        // hash order is arbitrary; spawn order keeps the closest() tie-break stable
        found.sort_unstable_by_key(|(id, _)| *id);
        found
    }
}

/// The candidate at minimum Euclidean distance from `origin`
///
/// Exact ties go to the first candidate in the given order. Callers build
/// candidate lists in spawn (arena-index) order, which makes the tie-break
/// deterministic.
pub fn closest(origin: Position, candidates: &[(ThingId, Position)]) -> Option<(ThingId, Position)> {
    let mut best: Option<((ThingId, Position), f32)> = None;
    for &(id, position) in candidates {
        let distance = origin.distance_to(position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some(((id, position), distance)),
        }
    }
    best.map(|(found, _)| found)
}

/// One-cell step from `from` toward `to` that strictly reduces distance
///
/// Prefers the axis with the larger absolute delta (x on ties); if that
/// cell is taken in the snapshot and the other axis also closes distance,
/// steps along the other axis instead.
fn step_toward(from: Position, to: Position, view: &WorldView) -> (i32, i32) {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();

    let x_first = (to.x - from.x).abs() >= (to.y - from.y).abs();
    let (first, second) = if x_first {
        ((dx, 0), (0, dy))
    } else {
        ((0, dy), (dx, 0))
    };

    if !view.is_free(from.offset(first.0, first.1)) && second != (0, 0) {
        second
    } else {
        first
    }
}

/// Autonomous zombie policy
///
/// Attack the closest living fighter when in claw range, otherwise lurch
/// one cell toward it. No fighters alive means no action.
pub fn zombie_action(me: ThingId, view: &WorldView) -> (Option<Action>, String) {
    let my = view.thing(me);
    let Some((target, target_position)) = closest(my.position, &view.living_fighters(Some(me)))
    else {
        return (None, "wandering, nobody left to bite".to_string());
    };

    let Some(weapon) = my.weapon() else {
        return (None, String::new());
    };
    if my.position.distance_to(target_position) <= weapon.max_range {
        let target_name = view.thing(target).name.clone();
        (
            Some(Action::Attack(target)),
            format!("biting {}", target_name),
        )
    } else {
        let (dx, dy) = step_toward(my.position, target_position, view);
        let target_name = view.thing(target).name.clone();
        (
            Some(Action::Move { dx, dy }),
            format!("lurching towards {}", target_name),
        )
    }
}

/// Built-in melee player policy, the mirror image of the zombie's
pub fn brawler_action(me: ThingId, view: &WorldView) -> (Option<Action>, String) {
    let my = view.thing(me);
    let Some((target, target_position)) = closest(my.position, &view.living_zombies()) else {
        return (None, "no zombies in sight".to_string());
    };

    let Some(weapon) = my.weapon() else {
        return (None, String::new());
    };
    if my.position.distance_to(target_position) <= weapon.max_range {
        (
            Some(Action::Attack(target)),
            "attacking closest zombie".to_string(),
        )
    } else {
        let (dx, dy) = step_toward(my.position, target_position, view);
        (
            Some(Action::Move { dx, dy }),
            "moving towards closest zombie".to_string(),
        )
    }
}

/// Translate an injected agent intent into a resolved action
///
/// Bad intents never fail the simulation: they degrade to no action plus a
/// status message on the agent.
pub fn agent_action(
    me: ThingId,
    intent: Option<ActionIntent>,
    view: &WorldView,
) -> (Option<Action>, String) {
    let Some(intent) = intent else {
        return (None, "sitting idle".to_string());
    };

    let my = view.thing(me);
    match intent.action_type {
        ActionType::Move => match intent.parameter {
            Some((dx, dy)) => (Some(Action::Move { dx, dy }), "walking".to_string()),
            None => (None, "confused".to_string()),
        },
        ActionType::Attack => {
            let Some((dx, dy)) = intent.parameter else {
                return (None, "confused".to_string());
            };
            let target_position = my.position.offset(dx, dy);
            match view.occupant_at(target_position) {
                Some(target) if view.thing(target).life().is_some() => (
                    Some(Action::Attack(target)),
                    format!("shooting at ({}, {})", dx, dy),
                ),
                _ => (
                    None,
                    format!("no target at position ({}, {}) to attack", dx, dy),
                ),
            }
        }
        ActionType::AttackClosest => match closest(my.position, &view.living_zombies()) {
            Some((target, _)) => (
                Some(Action::Attack(target)),
                "shooting closest zombie".to_string(),
            ),
            None => (None, "killing flies, because no zombies left".to_string()),
        },
        ActionType::Heal => match intent.parameter {
            None | Some((0, 0)) => (Some(Action::Heal(me)), "healing self".to_string()),
            Some((dx, dy)) => {
                let target_position = my.position.offset(dx, dy);
                match view.occupant_at(target_position) {
                    Some(target) if view.thing(target).life().is_some() => (
                        Some(Action::Heal(target)),
                        format!("healing thing at ({}, {})", dx, dy),
                    ),
                    _ => (
                        None,
                        format!("unable to heal thing at ({}, {})", dx, dy),
                    ),
                }
            }
        },
        ActionType::HealClosest => match closest(my.position, &view.living_fighters(Some(me))) {
            Some((target, _)) => (
                Some(Action::Heal(target)),
                "healing closest friend".to_string(),
            ),
            None => (
                Some(Action::Heal(me)),
                "healing self, because no other players are left".to_string(),
            ),
        },
    }
}
