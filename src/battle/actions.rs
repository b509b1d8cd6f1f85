use crate::battle::state::{Battle, Side, TurnRng};
use crate::battle::summary::ActionSummary;
use crate::battle::{catch, items, moves};
use crate::errors::BattleResult;
use schema::{Item, MoveData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of every action that isn't a move.
pub const DEFAULT_ACTION_PRIORITY: i32 = 0;

pub const FLEE_SUCCESS: &str = "Got away safely!";
pub const FLEE_INVALID: &str = "Unable to escape a trainer battle.";

/// Something a trainer can spend their part of a round on.
pub trait BattleAction {
    /// Lower values act first.
    fn priority(&self) -> i32 {
        DEFAULT_ACTION_PRIORITY
    }

    /// Whether `side` may queue this action right now.
    fn is_valid(&self, battle: &Battle, side: Side) -> bool;

    /// Carry the action out and describe its effects.
    fn apply(&self, battle: &mut Battle, side: Side, rng: &mut TurnRng) -> BattleResult<ActionSummary>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Action {
    Flee,
    // The index refers to the pokemon's position (0-5) in the trainer's roster.
    SwitchPokemon { team_index: usize },
    UseItem(Item),
    UseMove(MoveData),
}

/// Checks shared by every action: the battle is still running, and if the
/// turn already belongs to a side it is this one.
pub fn base_is_valid(battle: &Battle, side: Side) -> bool {
    !battle.is_over() && battle.turn().map_or(true, |turn| turn == side)
}

/// True iff `side` has an active pokemon that is still standing.
pub fn active_can_act(battle: &Battle, side: Side) -> bool {
    battle
        .trainer(side)
        .active_pokemon()
        .map_or(false, |pokemon| !pokemon.has_fainted())
}

impl BattleAction for Action {
    fn priority(&self) -> i32 {
        match self {
            Action::UseMove(move_data) => move_data.priority(),
            _ => DEFAULT_ACTION_PRIORITY,
        }
    }

    fn is_valid(&self, battle: &Battle, side: Side) -> bool {
        if !base_is_valid(battle, side) {
            return false;
        }
        match self {
            Action::Flee => active_can_act(battle, side),
            Action::SwitchPokemon { team_index } => {
                battle.trainer(side).can_switch_pokemon(*team_index)
            }
            Action::UseItem(item) => items::is_valid(item, battle, side),
            Action::UseMove(move_data) => moves::is_valid(move_data, battle, side),
        }
    }

    fn apply(&self, battle: &mut Battle, side: Side, rng: &mut TurnRng) -> BattleResult<ActionSummary> {
        match self {
            Action::Flee => Ok(apply_flee(battle, side)),
            Action::SwitchPokemon { team_index } => apply_switch(*team_index, battle, side),
            Action::UseItem(item @ Item::Food { health_restored, .. }) => {
                items::apply_food(item, *health_restored, battle, side)
            }
            Action::UseItem(item @ Item::Pokeball { catch_chance, .. }) => {
                catch::apply_pokeball(item, catch_chance.into_inner(), battle, side, rng)
            }
            Action::UseMove(move_data) => moves::apply(move_data, battle, side, rng),
        }
    }
}

/// Only the player gets the success message, even when the enemy side is the
/// one that got away.
fn apply_flee(battle: &mut Battle, side: Side) -> ActionSummary {
    battle.attempt_end_early();
    if side == Side::Player && battle.ended_early() {
        ActionSummary::with_message(FLEE_SUCCESS)
    } else {
        ActionSummary::with_message(FLEE_INVALID)
    }
}

fn apply_switch(team_index: usize, battle: &mut Battle, side: Side) -> BattleResult<ActionSummary> {
    let trainer = battle.trainer_mut(side);
    let mut summary = ActionSummary::new();

    let outgoing = trainer.active_pokemon()?;
    if !outgoing.has_fainted() {
        summary.add_message(format!("{}, return!", outgoing.name()));
    }

    trainer.switch_pokemon(team_index)?;
    summary.add_message(format!(
        "{} switched to {}.",
        trainer.name(),
        trainer.active_pokemon()?.name()
    ));
    Ok(summary)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Flee => write!(f, "Flee()"),
            Action::SwitchPokemon { team_index } => write!(f, "SwitchPokemon({})", team_index),
            Action::UseItem(item) => write!(f, "{}", item),
            Action::UseMove(move_data) => write!(f, "{}", move_data),
        }
    }
}
