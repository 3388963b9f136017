//! Safe house: get everyone onto the marked cells

use super::{GameView, Rules};

/// The fighters win by standing exactly on objective cells, all at once.
/// Proximity is not enough here, unlike evacuation.
pub struct SafeHouseRules;

impl SafeHouseRules {
    fn everyone_inside(&self, view: &GameView<'_>) -> bool {
        let objectives = view.world.objective_positions();
        if objectives.is_empty() {
            return false;
        }
        view.living_fighters()
            .iter()
            .all(|fighter| objectives.contains(&fighter.position))
    }
}

impl Rules for SafeHouseRules {
    fn name(&self) -> &'static str {
        "safehouse"
    }

    fn game_ended(&self, view: &GameView<'_>) -> bool {
        !view.fighters_alive() || self.everyone_inside(view)
    }

    fn game_won(&self, view: &GameView<'_>) -> (bool, String) {
        if view.fighters_alive() {
            (true, "everybody made it into the safe house! :)".to_string())
        } else {
            (false, "everybody is dead :(".to_string())
        }
    }
}
