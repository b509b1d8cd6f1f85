use crate::battle::items::decrement_item_count;
use crate::battle::state::{Battle, Side, TurnRng};
use crate::battle::summary::ActionSummary;
use crate::errors::BattleResult;
use log::debug;
use schema::Item;
use serde::{Deserialize, Serialize};

pub const POKEBALL_INVALID_BATTLE_TYPE: &str = "Pokeballs have no effect in trainer battles.";

/// How a thrown pokeball turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchAttempt {
    /// Trainer battles can't be caught from; the ball is wasted.
    NotAllowed,
    Caught { pokemon: String },
    /// Caught, which ends the battle, but the roster had no room for it.
    CaughtTeamFull { pokemon: String },
    Escaped { pokemon: String },
}

impl CatchAttempt {
    pub fn message(&self) -> String {
        match self {
            CatchAttempt::NotAllowed => POKEBALL_INVALID_BATTLE_TYPE.to_string(),
            CatchAttempt::Caught { pokemon } => format!("{} was caught!", pokemon),
            CatchAttempt::CaughtTeamFull { pokemon } => format!(
                "{} was caught, but there is no room left in the team!",
                pokemon
            ),
            CatchAttempt::Escaped { pokemon } => {
                format!("It was so close, but {} escaped!", pokemon)
            }
        }
    }
}

/// Throw a pokeball at the opposing active pokemon.
///
/// The ball is spent whatever happens. A successful catch ends the battle and
/// moves the wild pokemon onto the thrower's roster when there is room.
pub fn attempt_catch(
    ball: &Item,
    catch_chance: f64,
    battle: &mut Battle,
    side: Side,
    rng: &mut TurnRng,
) -> BattleResult<CatchAttempt> {
    decrement_item_count(ball, battle.trainer_mut(side));

    if battle.is_trainer_battle() {
        return Ok(CatchAttempt::NotAllowed);
    }

    let wild = battle.trainer(side.opponent()).active_pokemon()?.clone();
    let pokemon = wild.name().to_string();

    if !rng.did_succeed(catch_chance, "Catch attempt") {
        return Ok(CatchAttempt::Escaped { pokemon });
    }

    battle.attempt_end_early();
    let trainer = battle.trainer_mut(side);
    if trainer.can_add_pokemon(&wild) {
        trainer.add_pokemon(wild)?;
        debug!("{} joined {}'s roster", pokemon, trainer.name());
        Ok(CatchAttempt::Caught { pokemon })
    } else {
        Ok(CatchAttempt::CaughtTeamFull { pokemon })
    }
}

pub fn apply_pokeball(
    ball: &Item,
    catch_chance: f64,
    battle: &mut Battle,
    side: Side,
    rng: &mut TurnRng,
) -> BattleResult<ActionSummary> {
    let attempt = attempt_catch(ball, catch_chance, battle, side, rng)?;
    Ok(ActionSummary::with_message(attempt.message()))
}
