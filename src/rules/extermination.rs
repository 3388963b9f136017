//! Extermination: kill every zombie

use super::{GameView, Rules};

/// The game ends when either side is wiped out; the fighters win if any of
/// them is still standing.
pub struct ExterminationRules;

impl Rules for ExterminationRules {
    fn name(&self) -> &'static str {
        "extermination"
    }

    fn game_ended(&self, view: &GameView<'_>) -> bool {
        !view.fighters_alive() || view.world.living_zombie_count() == 0
    }

    fn game_won(&self, view: &GameView<'_>) -> (bool, String) {
        if view.fighters_alive() {
            (true, "the zombies were exterminated! :)".to_string())
        } else {
            (false, "everybody is dead :(".to_string())
        }
    }
}
