//! Action values: resolved actions and the external intent boundary

use serde::{Deserialize, Serialize};

use crate::core::types::ThingId;

/// A fully resolved action, as consumed by the tick engine
///
/// Targets are resolved against the pre-tick snapshot at decision time;
/// the engine applies the effect to the live target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Attack(ThingId),
    Heal(ThingId),
}

/// Intent kinds accepted at the external control boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Move,
    Attack,
    AttackClosest,
    Heal,
    HealClosest,
}

/// An externally supplied action intent for an agent
///
/// The optional parameter is a relative `(dx, dy)` offset from the acting
/// agent; `move` and `attack` require it, `heal` treats a missing or zero
/// offset as a self-heal, and the `*_closest` variants ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    pub action_type: ActionType,
    #[serde(default)]
    pub parameter: Option<(i32, i32)>,
}

impl ActionIntent {
    pub fn move_by(dx: i32, dy: i32) -> Self {
        Self {
            action_type: ActionType::Move,
            parameter: Some((dx, dy)),
        }
    }

    pub fn attack(dx: i32, dy: i32) -> Self {
        Self {
            action_type: ActionType::Attack,
            parameter: Some((dx, dy)),
        }
    }

    pub fn attack_closest() -> Self {
        Self {
            action_type: ActionType::AttackClosest,
            parameter: None,
        }
    }

    pub fn heal(dx: i32, dy: i32) -> Self {
        Self {
            action_type: ActionType::Heal,
            parameter: Some((dx, dy)),
        }
    }

    pub fn heal_self() -> Self {
        Self {
            action_type: ActionType::Heal,
            parameter: None,
        }
    }

    pub fn heal_closest() -> Self {
        Self {
            action_type: ActionType::HealClosest,
            parameter: None,
        }
    }
}
