use crate::battle::actions::{Action, BattleAction};
use crate::battle::summary::ActionSummary;
use crate::errors::BattleResult;
use crate::player::Trainer;
use crate::pokemon::Pokemon;
use crate::type_chart::TypeChart;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const ROUND_NOT_READY: &str = "The round is not ready!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

/// Who has already acted in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundProgress {
    NoneActed,
    PlayerActed,
    EnemyActed,
}

/// Source of every chance-based outcome in a battle.
///
/// Rolls are uniform in `[0, 1)`; a trial at chance `p` succeeds iff the roll
/// is below `p`. Tests script the rolls; games use a seeded or OS-seeded RNG.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RollSource,
}

#[derive(Debug, Clone)]
enum RollSource {
    Scripted { rolls: Vec<f64>, index: usize },
    Seeded(StdRng),
}

impl TurnRng {
    pub fn new_for_test(rolls: Vec<f64>) -> Self {
        Self {
            source: RollSource::Scripted { rolls, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RollSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RollSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_roll(&mut self, reason: &str) -> f64 {
        let roll = match &mut self.source {
            RollSource::Scripted { rolls, index } => {
                if *index >= rolls.len() {
                    // Add the reason to the panic message for better debugging!
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more scripted rolls.",
                        reason
                    );
                }
                let roll = rolls[*index];
                *index += 1;
                roll
            }
            RollSource::Seeded(rng) => rng.random::<f64>(),
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", roll, reason);

        roll
    }

    /// One weighted trial: true with probability `chance`.
    pub fn did_succeed(&mut self, chance: f64, reason: &str) -> bool {
        let roll = self.next_roll(reason);
        let success = roll < chance;
        trace!("{}: rolled {:.3} against {:.3} -> {}", reason, roll, chance, success);
        success
    }
}

/// A battle between two trainers.
///
/// Each round both sides queue one action; the lower priority value goes first
/// (ties go to the player). Whose turn it is is never stored: it is derived from
/// the queue plus `performed`, which remembers whether one action of the round
/// has already been enacted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Battle {
    trainers: [Trainer; 2],
    is_trainer_battle: bool,
    action_queue: [Option<Action>; 2],
    ended_early: bool,
    performed: RoundProgress,
    type_chart: TypeChart,
}

impl Battle {
    pub fn new(player: Trainer, enemy: Trainer, is_trainer_battle: bool) -> Self {
        Self {
            trainers: [player, enemy],
            is_trainer_battle,
            action_queue: [None, None],
            ended_early: false,
            performed: RoundProgress::NoneActed,
            type_chart: TypeChart::default(),
        }
    }

    pub fn with_type_chart(mut self, type_chart: TypeChart) -> Self {
        self.type_chart = type_chart;
        self
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    pub fn trainer(&self, side: Side) -> &Trainer {
        &self.trainers[side.index()]
    }

    pub fn trainer_mut(&mut self, side: Side) -> &mut Trainer {
        &mut self.trainers[side.index()]
    }

    /// Mutable access to both trainers at once: `(acting, opposing)`.
    pub fn sides_mut(&mut self, acting: Side) -> (&mut Trainer, &mut Trainer) {
        let [player, enemy] = &mut self.trainers;
        match acting {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        }
    }

    pub fn is_trainer_battle(&self) -> bool {
        self.is_trainer_battle
    }

    pub fn ended_early(&self) -> bool {
        self.ended_early
    }

    pub fn performed(&self) -> RoundProgress {
        self.performed
    }

    /// Ends the battle early, unless this is a trainer battle.
    pub fn attempt_end_early(&mut self) {
        if !self.is_trainer_battle {
            self.ended_early = true;
        }
    }

    pub fn is_over(&self) -> bool {
        self.ended_early || self.trainers.iter().any(Trainer::all_pokemon_fainted)
    }

    // --- Action queue ---

    pub fn trainer_has_action_queued(&self, side: Side) -> bool {
        self.action_queue[side.index()].is_some()
    }

    pub fn queued_action(&self, side: Side) -> Option<&Action> {
        self.action_queue[side.index()].as_ref()
    }

    pub fn is_action_queue_full(&self) -> bool {
        self.action_queue.iter().all(Option::is_some)
    }

    pub fn is_action_queue_empty(&self) -> bool {
        self.action_queue.iter().all(Option::is_none)
    }

    /// The next action can be enacted: either both sides have queued, or one
    /// side already acted this round and the other is waiting in the queue.
    pub fn is_ready(&self) -> bool {
        self.is_action_queue_full()
            || (!self.is_action_queue_empty() && self.performed != RoundProgress::NoneActed)
    }

    /// The side whose queued action goes next, or `None` when nothing can be enacted.
    pub fn turn(&self) -> Option<Side> {
        if self.is_over() || self.is_action_queue_empty() || !self.is_ready() {
            return None;
        }
        match &self.action_queue {
            [Some(player_action), Some(enemy_action)] => {
                if player_action.priority() <= enemy_action.priority() {
                    Some(Side::Player)
                } else {
                    Some(Side::Enemy)
                }
            }
            [Some(_), None] => Some(Side::Player),
            _ => Some(Side::Enemy),
        }
    }

    /// Queue an action for `side`. Returns false, changing nothing, if the side
    /// already has an action queued, the action is invalid, or the round is
    /// already ready to be enacted.
    pub fn queue_action(&mut self, action: Action, side: Side) -> bool {
        if self.trainer_has_action_queued(side) || !action.is_valid(self, side) || self.is_ready() {
            debug!("Rejected {} for {:?}", action, side);
            return false;
        }
        debug!("Queued {} for {:?}", action, side);
        self.action_queue[side.index()] = Some(action);
        true
    }

    /// Enact the next queued action and report what it did.
    ///
    /// The action is not re-validated; having been valid when queued is enough.
    /// Taking the second action of a round off the queue closes the round:
    /// upkeep runs on both active pokemon before that action is applied, so
    /// anything it sets up lasts into the next round.
    pub fn enact_turn(&mut self, rng: &mut TurnRng) -> BattleResult<ActionSummary> {
        let side = match self.turn() {
            Some(side) if self.is_ready() => side,
            _ => return Ok(ActionSummary::with_message(ROUND_NOT_READY)),
        };
        let Some(action) = self.action_queue[side.index()].take() else {
            return Ok(ActionSummary::with_message(ROUND_NOT_READY));
        };
        self.performed = match side {
            Side::Player => RoundProgress::PlayerActed,
            Side::Enemy => RoundProgress::EnemyActed,
        };

        if self.is_action_queue_empty() {
            self.close_round()?;
        }

        debug!("Enacting {} for {:?}", action, side);
        action.apply(self, side, rng)
    }

    fn close_round(&mut self) -> BattleResult<()> {
        for trainer in self.trainers.iter_mut() {
            trainer.active_pokemon_mut()?.post_round_actions();
        }
        self.performed = RoundProgress::NoneActed;
        debug!("Round closed");
        Ok(())
    }
}

/// Build a wild encounter: the wild pokemon fights alone for a nameless
/// trainer, and the battle is not a trainer battle.
pub fn create_encounter(trainer: Trainer, wild_pokemon: Pokemon) -> BattleResult<Battle> {
    let mut wild = Trainer::new("");
    wild.add_pokemon(wild_pokemon)?;
    Ok(Battle::new(trainer, wild, false))
}
