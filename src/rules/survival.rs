//! Survival: hold out for as long as possible

use super::{GameView, Rules};

/// An endless mode: the game only ends when every fighter is dead, so the
/// winning branch is only reachable through an external tick cap.
pub struct SurvivalRules;

impl Rules for SurvivalRules {
    fn name(&self) -> &'static str {
        "survival"
    }

    fn game_ended(&self, view: &GameView<'_>) -> bool {
        !view.fighters_alive()
    }

    fn game_won(&self, view: &GameView<'_>) -> (bool, String) {
        if view.fighters_alive() {
            (true, "you won a game that never ends (?!)".to_string())
        } else {
            (false, "everybody is dead :(".to_string())
        }
    }
}
