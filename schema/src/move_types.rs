use crate::stats::StatModifier;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority bias added to every move's speed, so moves go after non-move
/// actions of equal speed.
pub const SPEED_BASED_ACTION_PRIORITY: i32 = 1;

/// A learnable move. Two moves are the same move iff every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub element_type: String,
    pub max_uses: u32,
    /// Lower is faster.
    pub speed: i32,
    pub kind: MoveKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// No effect beyond spending a use.
    Plain,
    Attack {
        base_damage: u32,
        hit_chance: OrderedFloat<f64>,
    },
    /// Modifier applied to the user's active pokemon.
    Buff { modifier: StatModifier, rounds: u32 },
    /// Modifier applied to the opposing active pokemon.
    Debuff { modifier: StatModifier, rounds: u32 },
}

impl MoveData {
    pub fn new(name: &str, element_type: &str, max_uses: u32, speed: i32, kind: MoveKind) -> Self {
        Self {
            name: name.to_string(),
            element_type: element_type.to_string(),
            max_uses,
            speed,
            kind,
        }
    }

    pub fn attack(
        name: &str,
        element_type: &str,
        max_uses: u32,
        speed: i32,
        base_damage: u32,
        hit_chance: f64,
    ) -> Self {
        Self::new(
            name,
            element_type,
            max_uses,
            speed,
            MoveKind::Attack {
                base_damage,
                hit_chance: OrderedFloat(hit_chance),
            },
        )
    }

    pub fn buff(
        name: &str,
        element_type: &str,
        max_uses: u32,
        speed: i32,
        modifier: StatModifier,
        rounds: u32,
    ) -> Self {
        Self::new(name, element_type, max_uses, speed, MoveKind::Buff { modifier, rounds })
    }

    pub fn debuff(
        name: &str,
        element_type: &str,
        max_uses: u32,
        speed: i32,
        modifier: StatModifier,
        rounds: u32,
    ) -> Self {
        Self::new(name, element_type, max_uses, speed, MoveKind::Debuff { modifier, rounds })
    }

    pub fn priority(&self) -> i32 {
        self.speed + SPEED_BASED_ACTION_PRIORITY
    }
}

impl fmt::Display for MoveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            MoveKind::Plain => "Move",
            MoveKind::Attack { .. } => "Attack",
            MoveKind::Buff { .. } => "Buff",
            MoveKind::Debuff { .. } => "Debuff",
        };
        write!(
            f,
            "{}('{}', '{}', {})",
            label, self.name, self.element_type, self.max_uses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_priority_is_speed_plus_bias() {
        let aqua_jet = MoveData::attack("Aqua Jet", "normal", 10, 10, 40, 1.0);
        assert_eq!(aqua_jet.priority(), 11);

        let quick = MoveData::new("Splash", "water", 5, -3, MoveKind::Plain);
        assert_eq!(quick.priority(), -2);
    }

    #[test]
    fn test_display_names_the_kind() {
        let aqua_jet = MoveData::attack("Aqua Jet", "normal", 10, 10, 40, 1.0);
        assert_eq!(aqua_jet.to_string(), "Attack('Aqua Jet', 'normal', 10)");

        let growl = MoveData::debuff("Growl", "normal", 40, 2, StatModifier::new(0.0, 0, -10, 0), 3);
        assert_eq!(growl.to_string(), "Debuff('Growl', 'normal', 40)");
    }

    #[test]
    fn test_moves_compare_by_value() {
        let a = MoveData::attack("Tackle", "normal", 35, 5, 40, 0.9);
        let b = MoveData::attack("Tackle", "normal", 35, 5, 40, 0.9);
        let c = MoveData::attack("Tackle", "normal", 35, 5, 41, 0.9);

        assert_eq!(a, b);
        assert!(a != c);
    }
}
