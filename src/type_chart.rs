//! Elemental type effectiveness lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Looks up the damage multiplier of an attacking element against a defending one.
pub trait TypeEffectiveness {
    fn effectiveness(&self, attacking: &str, defending: &str) -> f64;
}

/// A table of multipliers keyed by attacking type, then defending type.
/// Pairs that were never registered are neutral (1.0), and lookups never
/// return a negative multiplier, however the table was loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeChart {
    chart: HashMap<String, HashMap<String, f64>>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a multiplier. Negative values are stored as 0.
    pub fn add_type_effectiveness(&mut self, attacking: &str, defending: &str, multiplier: f64) {
        self.chart
            .entry(attacking.to_string())
            .or_default()
            .insert(defending.to_string(), multiplier.max(0.0));
    }

    pub fn with(mut self, attacking: &str, defending: &str, multiplier: f64) -> Self {
        self.add_type_effectiveness(attacking, defending, multiplier);
        self
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

impl TypeEffectiveness for TypeChart {
    fn effectiveness(&self, attacking: &str, defending: &str) -> f64 {
        self.chart
            .get(attacking)
            .and_then(|row| row.get(defending))
            .copied()
            .unwrap_or(1.0)
            .max(0.0)
    }
}
