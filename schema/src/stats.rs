use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier applied to health, attack and defense each time a pokemon levels up.
pub const LEVEL_UP_STAT_GROWTH: f64 = 1.05;

/// The four battle stats of a pokemon: (hit chance, max health, attack, defense).
///
/// Stats behave as values. Modifiers never change a block in place; they
/// produce a new one whose fields have been clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PokemonStats {
    pub hit_chance: f64,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
}

/// A temporary elementwise delta laid over a `PokemonStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatModifier {
    pub hit_chance: OrderedFloat<f64>,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
}

impl PokemonStats {
    pub fn new(hit_chance: f64, max_health: u32, attack: u32, defense: u32) -> Self {
        Self {
            hit_chance: hit_chance.max(0.0),
            max_health,
            attack,
            defense,
        }
    }

    /// Level-up growth: hit chance resets to 1, the rest grow by 5% rounded down.
    pub fn grow(&mut self) {
        self.hit_chance = 1.0;
        self.max_health = grow_stat(self.max_health);
        self.attack = grow_stat(self.attack);
        self.defense = grow_stat(self.defense);
    }

    /// Returns the elementwise sum of `self` and `modifier`, each field bounded below by 0.
    pub fn apply_modifier(&self, modifier: &StatModifier) -> PokemonStats {
        PokemonStats {
            hit_chance: (self.hit_chance + modifier.hit_chance.into_inner()).max(0.0),
            max_health: offset_stat(self.max_health, modifier.max_health),
            attack: offset_stat(self.attack, modifier.attack),
            defense: offset_stat(self.defense, modifier.defense),
        }
    }
}

fn grow_stat(value: u32) -> u32 {
    (value as f64 * LEVEL_UP_STAT_GROWTH) as u32
}

fn offset_stat(value: u32, delta: i32) -> u32 {
    (value as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32
}

impl fmt::Display for PokemonStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PokemonStats(({}, {}, {}, {}))",
            self.hit_chance, self.max_health, self.attack, self.defense
        )
    }
}

impl StatModifier {
    pub fn new(hit_chance: f64, max_health: i32, attack: i32, defense: i32) -> Self {
        Self {
            hit_chance: OrderedFloat(hit_chance),
            max_health,
            attack,
            defense,
        }
    }
}

impl fmt::Display for StatModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.hit_chance, self.max_health, self.attack, self.defense
        )
    }
}
