use thiserror::Error;

/// Failures that game logic reports to its caller.
///
/// Routine rejections (an invalid queued action, enacting a round that isn't
/// ready) are not errors; they show up as `false` or as a summary message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// An active pokemon was requested from a trainer with an empty roster.
    #[error("Trainer '{trainer}' has no pokemon")]
    NoPokemon { trainer: String },

    #[error("Trainer '{trainer}' already has a full roster")]
    RosterFull { trainer: String },

    #[error("{name} is already in the roster")]
    DuplicatePokemon { name: String },

    #[error("No pokemon at roster index {0}")]
    InvalidPokemonIndex(usize),
}

/// Errors raised while loading a battle setup from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read battle config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse battle config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{pokemon} refers to unknown move '{name}'")]
    UnknownMove { pokemon: String, name: String },

    #[error("Invalid battle setup: {0}")]
    Battle(#[from] BattleError),
}

/// Result type for battle operations
pub type BattleResult<T> = Result<T, BattleError>;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
