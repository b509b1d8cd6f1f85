//! A module for defining AI behaviors for automated trainers.

use crate::battle::actions::Action;
use crate::battle::state::{Battle, Side};
use crate::player::Trainer;
use crate::type_chart::TypeEffectiveness;

/// The opposing pokemon an `AggressiveAI` throws pokeballs at by default.
pub const DEFAULT_CAPTURE_TARGET: &str = "Pikachu";

/// A trait for any system that can decide on a battle action.
/// Deciding never changes the battle.
pub trait Behavior {
    /// Inspects the battle and decides on the next action for the given side.
    fn decide_action(&self, side: Side, battle: &Battle) -> Action;
}

/// First roster slot the trainer could switch to, as a switch action.
fn first_switch(trainer: &Trainer) -> Option<Action> {
    (0..trainer.all_pokemon().len())
        .find(|&index| trainer.can_switch_pokemon(index))
        .map(|team_index| Action::SwitchPokemon { team_index })
}

/// Always tries to run. Sends out the next pokemon standing when the active one faints.
#[derive(Debug, Clone, Default)]
pub struct CautiousAI;

impl CautiousAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for CautiousAI {
    fn decide_action(&self, side: Side, battle: &Battle) -> Action {
        let trainer = battle.trainer(side);
        match trainer.active_pokemon() {
            Ok(pokemon) if pokemon.has_fainted() => first_switch(trainer).unwrap_or(Action::Flee),
            _ => Action::Flee,
        }
    }
}

/// Fights trainers and runs from wild pokemon, in this order of preference:
/// 1. Switch to the next pokemon standing if the active one fainted.
/// 2. Flee a wild battle.
/// 3. Throw a pokeball if the opposing pokemon is the capture target.
/// 4. The first known move that is super effective against the opponent.
/// 5. The first known move with uses left.
/// 6. Flee.
#[derive(Debug, Clone)]
pub struct AggressiveAI {
    capture_target: String,
}

impl AggressiveAI {
    pub fn new(capture_target: &str) -> Self {
        Self {
            capture_target: capture_target.to_string(),
        }
    }
}

impl Default for AggressiveAI {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_TARGET)
    }
}

impl Behavior for AggressiveAI {
    fn decide_action(&self, side: Side, battle: &Battle) -> Action {
        let trainer = battle.trainer(side);
        let Ok(active) = trainer.active_pokemon() else {
            return Action::Flee;
        };

        if active.has_fainted() {
            if let Some(switch) = first_switch(trainer) {
                return switch;
            }
        }

        if !battle.is_trainer_battle() {
            return Action::Flee;
        }

        let Ok(opponent) = battle.trainer(side.opponent()).active_pokemon() else {
            return Action::Flee;
        };

        if opponent.name() == self.capture_target {
            let pokeball = trainer
                .inventory()
                .iter()
                .find(|(item, count)| item.is_pokeball() && *count > 0);
            if let Some((item, _)) = pokeball {
                return Action::UseItem(item.clone());
            }
        }

        // Effectiveness alone picks here; a spent move can still be chosen.
        let super_effective = active.moves().find(|move_data| {
            battle
                .type_chart()
                .effectiveness(&move_data.element_type, opponent.element_type())
                > 1.0
        });
        if let Some(move_data) = super_effective {
            return Action::UseMove(move_data.clone());
        }

        active
            .moves()
            .find(|move_data| active.remaining_move_uses(move_data) > 0)
            .map(|move_data| Action::UseMove(move_data.clone()))
            .unwrap_or(Action::Flee)
    }
}
