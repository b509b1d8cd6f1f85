//! pokemon-duel battle engine
//!
//! Two trainers queue one action each per round; actions resolve in priority
//! order against a shared battle state until one side's roster has fainted or
//! the battle ends early by fleeing or a catch.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod player;
pub mod pokemon;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{Item, MoveData, MoveKind, PokemonStats, StatModifier};

// --- From this crate's modules (`src/`) ---

// Battle state, actions and turn resolution.
pub use battle::actions::{Action, BattleAction};
pub use battle::ai::{AggressiveAI, Behavior, CautiousAI};
pub use battle::runner::{BattleOutcome, BattleReport, BattleRunner};
pub use battle::state::{create_encounter, Battle, Side, TurnRng};
pub use battle::summary::ActionSummary;

// Core runtime types for a battle.
pub use player::Trainer;
pub use pokemon::Pokemon;
pub use type_chart::{TypeChart, TypeEffectiveness};

// Crate-specific error and result types.
pub use errors::{BattleError, BattleResult, ConfigError, ConfigResult};
