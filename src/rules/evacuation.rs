//! Evacuation: gather everyone near an evacuation point

use super::{GameView, Rules};

/// Distance within which a fighter counts as having reached the pickup zone.
const EVACUATION_RANGE: f32 = 2.0;

/// The fighters win by having every survivor close to an objective marker at
/// the same time. Losing everyone ends the game too.
pub struct EvacuationRules;

impl EvacuationRules {
    fn everyone_in_place(&self, view: &GameView<'_>) -> bool {
        let objectives = view.world.objective_positions();
        if objectives.is_empty() {
            return false;
        }
        view.living_fighters().iter().all(|fighter| {
            objectives
                .iter()
                .any(|objective| fighter.position.distance_to(*objective) <= EVACUATION_RANGE)
        })
    }
}

impl Rules for EvacuationRules {
    fn name(&self) -> &'static str {
        "evacuation"
    }

    fn game_ended(&self, view: &GameView<'_>) -> bool {
        !view.fighters_alive() || self.everyone_in_place(view)
    }

    fn game_won(&self, view: &GameView<'_>) -> (bool, String) {
        if view.fighters_alive() {
            (true, "everybody made it to the evacuation point! :)".to_string())
        } else {
            (false, "everybody is dead :(".to_string())
        }
    }
}
