use crate::battle::actions::{active_can_act, base_is_valid};
use crate::battle::state::{Battle, Side};
use crate::battle::summary::ActionSummary;
use crate::errors::BattleResult;
use crate::player::Trainer;
use schema::Item;

/// Items need a standing active pokemon and at least one of the item in the bag.
pub fn is_valid(item: &Item, battle: &Battle, side: Side) -> bool {
    base_is_valid(battle, side) && active_can_act(battle, side) && battle.trainer(side).has_item(item)
}

pub fn decrement_item_count(item: &Item, trainer: &mut Trainer) {
    trainer.use_item(item);
}

/// The active pokemon eats the food and recovers health.
pub fn apply_food(
    food: &Item,
    health_restored: u32,
    battle: &mut Battle,
    side: Side,
) -> BattleResult<ActionSummary> {
    let trainer = battle.trainer_mut(side);
    decrement_item_count(food, trainer);

    let pokemon = trainer.active_pokemon_mut()?;
    pokemon.modify_health(health_restored as i64);
    Ok(ActionSummary::with_message(format!(
        "{} ate {}.",
        pokemon.name(),
        food.name()
    )))
}
