use crate::battle::actions::{active_can_act, base_is_valid};
use crate::battle::calculators::{calculate_attack_outcome, AttackOutcome};
use crate::battle::state::{Battle, Side, TurnRng};
use crate::battle::summary::ActionSummary;
use crate::errors::BattleResult;
use schema::{MoveData, MoveKind, StatModifier};

/// A move can be queued when the active pokemon is standing, knows this exact
/// move, and has a use of it left.
pub fn is_valid(move_data: &MoveData, battle: &Battle, side: Side) -> bool {
    if !base_is_valid(battle, side) || !active_can_act(battle, side) {
        return false;
    }
    battle
        .trainer(side)
        .active_pokemon()
        .map_or(false, |pokemon| {
            pokemon.knows_move(move_data) && pokemon.remaining_move_uses(move_data) > 0
        })
}

pub fn apply(
    move_data: &MoveData,
    battle: &mut Battle,
    side: Side,
    rng: &mut TurnRng,
) -> BattleResult<ActionSummary> {
    match move_data.kind {
        MoveKind::Plain => apply_plain(move_data, battle, side),
        MoveKind::Attack {
            base_damage,
            hit_chance,
        } => apply_attack(move_data, base_damage, hit_chance.into_inner(), battle, side, rng),
        MoveKind::Buff { modifier, rounds } => apply_buff(move_data, modifier, rounds, battle, side),
        MoveKind::Debuff { modifier, rounds } => {
            apply_debuff(move_data, modifier, rounds, battle, side)
        }
    }
}

/// Spend one use of the move and announce it.
fn use_move(move_data: &MoveData, battle: &mut Battle, side: Side) -> BattleResult<ActionSummary> {
    let pokemon = battle.trainer_mut(side).active_pokemon_mut()?;
    pokemon.reduce_move_count(move_data);
    Ok(ActionSummary::with_message(format!(
        "{} used {}.",
        pokemon.name(),
        move_data.name
    )))
}

fn apply_plain(move_data: &MoveData, battle: &mut Battle, side: Side) -> BattleResult<ActionSummary> {
    use_move(move_data, battle, side)
}

fn apply_attack(
    move_data: &MoveData,
    base_damage: u32,
    hit_chance: f64,
    battle: &mut Battle,
    side: Side,
    rng: &mut TurnRng,
) -> BattleResult<ActionSummary> {
    let mut summary = use_move(move_data, battle, side)?;
    let outcome = calculate_attack_outcome(battle, side, move_data, base_damage, hit_chance, rng)?;

    let (attacking, defending) = battle.sides_mut(side);
    let attacker = attacking.active_pokemon_mut()?;
    let defender = defending.active_pokemon_mut()?;

    match outcome {
        AttackOutcome::Hit { damage } => {
            defender.modify_health(-(damage as i64));
            if defender.has_fainted() {
                let experience = defender.experience_on_death();
                attacker.gain_experience(experience);
                summary.add_message(format!("{} has fainted.", defender.name()));
                summary.add_message(format!("{} gained {} exp.", attacker.name(), experience));
            }
        }
        AttackOutcome::Missed => {
            summary.add_message(format!("{} missed!", attacker.name()));
        }
    }
    Ok(summary)
}

fn apply_buff(
    move_data: &MoveData,
    modifier: StatModifier,
    rounds: u32,
    battle: &mut Battle,
    side: Side,
) -> BattleResult<ActionSummary> {
    let mut summary = use_move(move_data, battle, side)?;
    let pokemon = battle.trainer_mut(side).active_pokemon_mut()?;
    summary.add_message(format!("{} was buffed for {} turns.", pokemon.name(), rounds));
    pokemon.add_stat_modifier(modifier, rounds);
    Ok(summary)
}

fn apply_debuff(
    move_data: &MoveData,
    modifier: StatModifier,
    rounds: u32,
    battle: &mut Battle,
    side: Side,
) -> BattleResult<ActionSummary> {
    let mut summary = use_move(move_data, battle, side)?;
    let target = battle.trainer_mut(side.opponent()).active_pokemon_mut()?;
    summary.add_message(format!("{} was debuffed for {} turns.", target.name(), rounds));
    target.add_stat_modifier(modifier, rounds);
    Ok(summary)
}
