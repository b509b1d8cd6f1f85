use crate::battle::ai::Behavior;
use crate::battle::state::{Battle, Side, TurnRng};
use crate::battle::summary::ActionSummary;
use crate::errors::BattleResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every enemy pokemon fainted.
    PlayerWon,
    /// Every player pokemon fainted.
    EnemyWon,
    /// Someone fled or a pokemon was caught.
    EndedEarly,
    /// A side decided on an action the battle would not accept.
    Stalled,
    /// The round limit was reached first.
    RoundLimit,
}

/// Everything that happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub rounds: u32,
    pub summaries: Vec<ActionSummary>,
    pub outcome: BattleOutcome,
}

impl BattleReport {
    /// Every message from every enacted action, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.summaries
            .iter()
            .flat_map(|summary| summary.messages().iter().map(String::as_str))
    }
}

/// Drives a battle to completion with one behavior per side.
pub struct BattleRunner {
    battle: Battle,
    behaviors: [Box<dyn Behavior>; 2],
    max_rounds: u32,
}

impl BattleRunner {
    pub fn new(
        battle: Battle,
        player: Box<dyn Behavior>,
        enemy: Box<dyn Behavior>,
        max_rounds: u32,
    ) -> Self {
        Self {
            battle,
            behaviors: [player, enemy],
            max_rounds,
        }
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn into_battle(self) -> Battle {
        self.battle
    }

    /// Play one round: both sides queue, then queued actions are enacted until
    /// the round closes or the battle ends. Returns `None` if the round could
    /// not start because a decided action was rejected.
    pub fn run_round(&mut self, rng: &mut TurnRng) -> BattleResult<Option<Vec<ActionSummary>>> {
        for side in [Side::Player, Side::Enemy] {
            if self.battle.trainer_has_action_queued(side) {
                continue;
            }
            let action = self.behaviors[side.index()].decide_action(side, &self.battle);
            if !self.battle.queue_action(action.clone(), side) {
                warn!("{:?} decided on {}, which the battle rejected", side, action);
            }
        }

        if !self.battle.is_ready() {
            return Ok(None);
        }

        let mut summaries = Vec::new();
        while self.battle.is_ready() && !self.battle.is_over() {
            summaries.push(self.battle.enact_turn(rng)?);
        }
        Ok(Some(summaries))
    }

    /// Run rounds until the battle is over, stalls, or hits the round limit.
    pub fn run(&mut self, rng: &mut TurnRng) -> BattleResult<BattleReport> {
        let mut summaries = Vec::new();
        let mut rounds = 0;

        let outcome = loop {
            if self.battle.is_over() {
                break self.finished_outcome();
            }
            if rounds >= self.max_rounds {
                break BattleOutcome::RoundLimit;
            }
            match self.run_round(rng)? {
                Some(round) => {
                    rounds += 1;
                    debug!("Round {} enacted {} actions", rounds, round.len());
                    summaries.extend(round);
                }
                None => break BattleOutcome::Stalled,
            }
        };

        info!("Battle finished after {} rounds: {:?}", rounds, outcome);
        Ok(BattleReport {
            rounds,
            summaries,
            outcome,
        })
    }

    fn finished_outcome(&self) -> BattleOutcome {
        if self.battle.trainer(Side::Enemy).all_pokemon_fainted() {
            BattleOutcome::PlayerWon
        } else if self.battle.trainer(Side::Player).all_pokemon_fainted() {
            BattleOutcome::EnemyWon
        } else {
            BattleOutcome::EndedEarly
        }
    }
}
