use crate::battle::state::{Battle, Side, TurnRng};
use crate::errors::BattleResult;
use crate::pokemon::Pokemon;
use crate::type_chart::TypeEffectiveness;
use schema::MoveData;

/// What an attack will do, worked out before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit { damage: u32 },
    Missed,
}

/// Two trials, both of which must pass: the move's accuracy, then the
/// attacker's current hit chance. The second is only rolled if the first hits.
pub fn did_hit(move_hit_chance: f64, attacker: &Pokemon, rng: &mut TurnRng) -> bool {
    rng.did_succeed(move_hit_chance, "Move accuracy")
        && rng.did_succeed(attacker.stats().hit_chance, "Attacker hit chance")
}

/// `floor(base_damage * effectiveness * attack / (defense + 1))`, using modified stats.
pub fn calculate_damage(
    base_damage: u32,
    effectiveness: f64,
    attacker: &Pokemon,
    defender: &Pokemon,
) -> u32 {
    let attack = attacker.stats().attack as f64;
    let defense = defender.stats().defense as f64;
    (base_damage as f64 * effectiveness * attack / (defense + 1.0)).floor() as u32
}

/// Resolve hit and damage for `side`'s active pokemon attacking the opposing one.
pub fn calculate_attack_outcome(
    battle: &Battle,
    side: Side,
    move_data: &MoveData,
    base_damage: u32,
    hit_chance: f64,
    rng: &mut TurnRng,
) -> BattleResult<AttackOutcome> {
    let attacker = battle.trainer(side).active_pokemon()?;
    let defender = battle.trainer(side.opponent()).active_pokemon()?;

    if !did_hit(hit_chance, attacker, rng) {
        return Ok(AttackOutcome::Missed);
    }

    let effectiveness = battle
        .type_chart()
        .effectiveness(&move_data.element_type, defender.element_type());
    Ok(AttackOutcome::Hit {
        damage: calculate_damage(base_damage, effectiveness, attacker, defender),
    })
}
