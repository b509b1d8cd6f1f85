use crate::battle::state::{Battle, TurnRng};
use crate::errors::BattleResult;
use crate::player::Trainer;
use crate::pokemon::Pokemon;
use schema::{Item, MoveData, PokemonStats, StatModifier};

/// A builder for creating test Pokemon with common defaults:
/// stats (1.0, 100, 200, 200), type "normal", level 1, no moves.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_type("electric")
///     .with_moves(vec![tackle()])
///     .with_hp(30)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    element_type: String,
    stats: PokemonStats,
    level: u32,
    moves: Vec<MoveData>,
    modifiers: Vec<StatModifier>,
    current_hp: Option<u32>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            element_type: "normal".to_string(),
            stats: PokemonStats::new(1.0, 100, 200, 200),
            level: 1,
            moves: Vec::new(),
            modifiers: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_type(mut self, element_type: &str) -> Self {
        self.element_type = element_type.to_string();
        self
    }

    pub fn with_stats(mut self, hit_chance: f64, max_health: u32, attack: u32, defense: u32) -> Self {
        self.stats = PokemonStats::new(hit_chance, max_health, attack, defense);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = moves;
        self
    }

    /// Adds a long-lived stat modifier.
    pub fn with_modifier(mut self, hit_chance: f64, max_health: i32, attack: i32, defense: i32) -> Self {
        self.modifiers
            .push(StatModifier::new(hit_chance, max_health, attack, defense));
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn fainted(self) -> Self {
        self.with_hp(0)
    }

    pub fn build(self) -> Pokemon {
        let mut pokemon = Pokemon::new(&self.name, self.stats, &self.element_type, self.moves, self.level);
        for modifier in self.modifiers {
            pokemon.add_stat_modifier(modifier, 99);
        }
        let hp = self.current_hp.unwrap_or_else(|| pokemon.max_health());
        let change = hp as i64 - pokemon.health() as i64;
        pokemon.modify_health(change);
        pokemon
    }
}

/// Creates a trainer owning the given pokemon, the first one active.
pub fn create_test_trainer(name: &str, team: Vec<Pokemon>) -> Trainer {
    let mut trainer = Trainer::new(name);
    for pokemon in team {
        assert_ok(trainer.add_pokemon(pokemon));
    }
    trainer
}

/// Creates a battle between "Ash" (player) and "Gary" (enemy).
pub fn create_test_battle(player_team: Vec<Pokemon>, enemy_team: Vec<Pokemon>, is_trainer_battle: bool) -> Battle {
    Battle::new(
        create_test_trainer("Ash", player_team),
        create_test_trainer("Gary", enemy_team),
        is_trainer_battle,
    )
}

pub fn tackle() -> MoveData {
    MoveData::attack("Tackle", "normal", 35, 5, 40, 1.0)
}

pub fn great_ball() -> Item {
    Item::pokeball("Great Ball", 0.5)
}

pub fn bad_soup() -> Item {
    Item::food("Bad Soup", 22)
}

/// Every trial succeeds. Provides a generous buffer to avoid exhaustion.
pub fn hitting_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.0; 100])
}

/// Every trial fails, even at chance 1.
pub fn missing_rng() -> TurnRng {
    TurnRng::new_for_test(vec![1.0; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Queues both actions and checks each was accepted.
pub fn queue_both(battle: &mut Battle, player: crate::battle::actions::Action, enemy: crate::battle::actions::Action) {
    assert!(battle.queue_action(player, crate::battle::state::Side::Player), "player action rejected");
    assert!(battle.queue_action(enemy, crate::battle::state::Side::Enemy), "enemy action rejected");
}
