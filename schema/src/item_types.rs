use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inventory items. Equal name and payload means the same inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Food {
        name: String,
        health_restored: u32,
    },
    Pokeball {
        name: String,
        catch_chance: OrderedFloat<f64>,
    },
}

impl Item {
    pub fn food(name: &str, health_restored: u32) -> Self {
        Item::Food {
            name: name.to_string(),
            health_restored,
        }
    }

    pub fn pokeball(name: &str, catch_chance: f64) -> Self {
        Item::Pokeball {
            name: name.to_string(),
            catch_chance: OrderedFloat(catch_chance),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Food { name, .. } | Item::Pokeball { name, .. } => name,
        }
    }

    pub fn is_pokeball(&self) -> bool {
        matches!(self, Item::Pokeball { .. })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Food { name, .. } => write!(f, "Food('{}')", name),
            Item::Pokeball { name, .. } => write!(f, "Pokeball('{}')", name),
        }
    }
}
