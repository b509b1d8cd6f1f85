//! Battle setups described in RON.
//!
//! ```ron
//! (
//!     trainer_battle: true,
//!     seed: Some(7),
//!     moves: [ (name: "Tackle", element_type: "normal", max_uses: 35, speed: 5,
//!               kind: Attack(base_damage: 40, hit_chance: 0.95)) ],
//!     player: (name: "Ash", behavior: Aggressive(capture_target: "Pikachu"),
//!              pokemon: [ (name: "Pikachu", element_type: "electric",
//!                          stats: (hit_chance: 1.0, max_health: 100, attack: 55, defense: 40),
//!                          moves: ["Tackle"]) ]),
//!     enemy: ( ... ),
//! )
//! ```

use crate::battle::ai::{AggressiveAI, Behavior, CautiousAI, DEFAULT_CAPTURE_TARGET};
use crate::battle::runner::BattleRunner;
use crate::battle::state::{Battle, TurnRng};
use crate::errors::{ConfigError, ConfigResult};
use crate::player::Trainer;
use crate::pokemon::Pokemon;
use crate::type_chart::TypeChart;
use schema::{Item, MoveData, PokemonStats};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_ROUNDS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    #[serde(default)]
    pub trainer_battle: bool,
    /// Fixed RNG seed; a random one is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub type_chart: TypeChart,
    /// Move library that pokemon refer to by name.
    #[serde(default)]
    pub moves: Vec<MoveData>,
    pub player: TrainerConfig,
    pub enemy: TrainerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub name: String,
    #[serde(default)]
    pub behavior: BehaviorKind,
    pub pokemon: Vec<PokemonConfig>,
    #[serde(default)]
    pub items: Vec<(Item, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonConfig {
    pub name: String,
    pub element_type: String,
    pub stats: PokemonStats,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorKind {
    Cautious,
    Aggressive {
        #[serde(default = "default_capture_target")]
        capture_target: String,
    },
}

impl Default for BehaviorKind {
    fn default() -> Self {
        BehaviorKind::Aggressive {
            capture_target: default_capture_target(),
        }
    }
}

impl BehaviorKind {
    pub fn into_behavior(self) -> Box<dyn Behavior> {
        match self {
            BehaviorKind::Cautious => Box::new(CautiousAI::new()),
            BehaviorKind::Aggressive { capture_target } => Box::new(AggressiveAI::new(&capture_target)),
        }
    }
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

fn default_level() -> u32 {
    1
}

fn default_capture_target() -> String {
    DEFAULT_CAPTURE_TARGET.to_string()
}

impl BattleConfig {
    /// Load a battle setup from a RON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(source: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(source)?)
    }

    fn find_move(&self, name: &str) -> Option<&MoveData> {
        self.moves.iter().find(|move_data| move_data.name == name)
    }

    fn build_pokemon(&self, config: &PokemonConfig) -> ConfigResult<Pokemon> {
        let moves = config
            .moves
            .iter()
            .map(|name| {
                self.find_move(name).cloned().ok_or_else(|| ConfigError::UnknownMove {
                    pokemon: config.name.clone(),
                    name: name.clone(),
                })
            })
            .collect::<ConfigResult<Vec<MoveData>>>()?;

        Ok(Pokemon::new(
            &config.name,
            config.stats,
            &config.element_type,
            moves,
            config.level,
        ))
    }

    pub fn build_trainer(&self, config: &TrainerConfig) -> ConfigResult<Trainer> {
        let mut trainer = Trainer::new(&config.name);
        for pokemon in &config.pokemon {
            trainer.add_pokemon(self.build_pokemon(pokemon)?)?;
        }
        for (item, uses) in &config.items {
            trainer.add_item(item.clone(), *uses);
        }
        Ok(trainer)
    }

    pub fn build_battle(&self) -> ConfigResult<Battle> {
        let player = self.build_trainer(&self.player)?;
        let enemy = self.build_trainer(&self.enemy)?;
        Ok(Battle::new(player, enemy, self.trainer_battle).with_type_chart(self.type_chart.clone()))
    }

    pub fn build_runner(&self) -> ConfigResult<BattleRunner> {
        Ok(BattleRunner::new(
            self.build_battle()?,
            self.player.behavior.clone().into_behavior(),
            self.enemy.behavior.clone().into_behavior(),
            self.max_rounds,
        ))
    }

    pub fn rng(&self) -> TurnRng {
        match self.seed {
            Some(seed) => TurnRng::from_seed(seed),
            None => TurnRng::new_random(),
        }
    }
}
