use schema::{MoveData, PokemonStats, StatModifier};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Maximum number of moves a pokemon can know at once.
pub const MAXIMUM_MOVE_SLOTS: usize = 4;

static NEXT_POKEMON_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a pokemon instance. Clones share it, so a roster can tell
/// "the same pokemon" apart from "an identical-looking pokemon".
///
/// Ids only mean something within one process and are never serialized; a
/// deserialized pokemon is a new instance with a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PokemonId(u64);

impl PokemonId {
    fn next() -> Self {
        PokemonId(NEXT_POKEMON_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A known move and its remaining uses. `None` until the move is first spent,
/// which reads as "all uses left".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedMove {
    pub move_data: MoveData,
    uses: Option<u32>,
}

impl LearnedMove {
    fn remaining(&self) -> u32 {
        self.uses.unwrap_or(self.move_data.max_uses)
    }
}

/// A stat modifier and the number of rounds it stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveModifier {
    pub modifier: StatModifier,
    pub rounds_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(skip, default = "PokemonId::next")]
    id: PokemonId,
    pub name: String,
    pub element_type: String,
    level: u32,
    experience: u64,
    /// Stats before any modifier is applied.
    base_stats: PokemonStats,
    moves: Vec<LearnedMove>,
    modifiers: Vec<ActiveModifier>,
    /// Unset until first observed; clamped to the modified max health on every read.
    current_health: Cell<Option<u32>>,
}

impl Pokemon {
    /// Create a new pokemon at the given level (minimum 1) with full health.
    /// Moves beyond the fourth, and repeats, are ignored.
    pub fn new(
        name: &str,
        stats: PokemonStats,
        element_type: &str,
        moves: Vec<MoveData>,
        level: u32,
    ) -> Self {
        let level = level.max(1);
        let mut pokemon = Self {
            id: PokemonId::next(),
            name: name.to_string(),
            element_type: element_type.to_string(),
            level,
            experience: (level as u64).pow(3),
            base_stats: stats,
            moves: Vec::new(),
            modifiers: Vec::new(),
            current_health: Cell::new(None),
        };
        for move_data in moves {
            if pokemon.can_learn_move(&move_data) {
                pokemon.moves.push(LearnedMove {
                    move_data,
                    uses: None,
                });
            }
        }
        pokemon
    }

    pub fn id(&self) -> PokemonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    // --- Health ---

    /// Current health. Reading it settles the stored value: an unset health
    /// becomes the max, and a health above the modified max is cut down to it.
    pub fn health(&self) -> u32 {
        let max_health = self.max_health();
        let health = match self.current_health.get() {
            Some(health) if health <= max_health => health,
            _ => max_health,
        };
        self.current_health.set(Some(health));
        health
    }

    /// Max health after modifiers.
    pub fn max_health(&self) -> u32 {
        self.stats().max_health
    }

    pub fn has_fainted(&self) -> bool {
        self.health() == 0
    }

    /// Apply a health change, clamped to `0..=max_health()`.
    pub fn modify_health(&mut self, change: i64) {
        let max_health = self.max_health() as i64;
        let health = (self.health() as i64 + change).clamp(0, max_health);
        self.current_health.set(Some(health as u32));
    }

    // --- Experience and levels ---

    /// Total experience needed to reach the next level.
    pub fn next_level_experience_requirement(&self) -> u64 {
        (self.level as u64 + 1).pow(3)
    }

    /// Add experience, levelling up as many times as it pays for.
    pub fn gain_experience(&mut self, amount: u64) {
        self.experience += amount;
        while self.experience >= self.next_level_experience_requirement() {
            self.level_up();
        }
    }

    /// Grow the base stats by one level. Health rises by as much as the base
    /// max health did, except that a fainted pokemon stays fainted.
    pub fn level_up(&mut self) {
        let old_max_health = self.base_stats.max_health;
        let health = self.health().min(old_max_health);
        let health_deficit = old_max_health - health;

        self.level += 1;
        self.base_stats.grow();

        let restored = if health == 0 {
            0
        } else {
            self.base_stats.max_health.saturating_sub(health_deficit)
        };
        self.current_health.set(Some(restored));
    }

    /// Experience awarded to whoever knocks this pokemon out.
    pub fn experience_on_death(&self) -> u64 {
        200 * self.level as u64 / 7
    }

    // --- Moves ---

    pub fn can_learn_move(&self, move_data: &MoveData) -> bool {
        self.moves.len() < MAXIMUM_MOVE_SLOTS && !self.knows_move(move_data)
    }

    /// Learn a move with all of its uses available. Returns false, leaving the
    /// pokemon unchanged, when the move can't be learnt.
    pub fn learn_move(&mut self, move_data: MoveData) -> bool {
        if !self.can_learn_move(&move_data) {
            return false;
        }
        let uses = Some(move_data.max_uses);
        self.moves.push(LearnedMove { move_data, uses });
        true
    }

    pub fn forget_move(&mut self, move_data: &MoveData) {
        self.moves.retain(|learned| &learned.move_data != move_data);
    }

    pub fn knows_move(&self, move_data: &MoveData) -> bool {
        self.moves.iter().any(|learned| &learned.move_data == move_data)
    }

    /// Known moves in the order they were learnt.
    pub fn moves(&self) -> impl Iterator<Item = &MoveData> {
        self.moves.iter().map(|learned| &learned.move_data)
    }

    /// Remaining uses of a move, or 0 if the move isn't known.
    pub fn remaining_move_uses(&self, move_data: &MoveData) -> u32 {
        self.learned(move_data).map_or(0, LearnedMove::remaining)
    }

    /// Known moves with their remaining uses, sorted by move name.
    pub fn move_info(&self) -> Vec<(&MoveData, u32)> {
        let mut info: Vec<(&MoveData, u32)> = self
            .moves
            .iter()
            .map(|learned| (&learned.move_data, learned.remaining()))
            .collect();
        info.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        info
    }

    pub fn has_moves_left(&self) -> bool {
        self.moves.iter().any(|learned| learned.remaining() > 0)
    }

    /// Spend one use of a known move. Unknown moves are ignored and the count
    /// never drops below zero.
    pub fn reduce_move_count(&mut self, move_data: &MoveData) {
        if let Some(learned) = self
            .moves
            .iter_mut()
            .find(|learned| &learned.move_data == move_data)
        {
            learned.uses = Some(learned.remaining().saturating_sub(1));
        }
    }

    fn learned(&self, move_data: &MoveData) -> Option<&LearnedMove> {
        self.moves.iter().find(|learned| &learned.move_data == move_data)
    }

    // --- Stat modifiers ---

    pub fn add_stat_modifier(&mut self, modifier: StatModifier, rounds: u32) {
        self.modifiers.push(ActiveModifier {
            modifier,
            rounds_remaining: rounds,
        });
    }

    pub fn modifiers(&self) -> &[ActiveModifier] {
        &self.modifiers
    }

    pub fn base_stats(&self) -> PokemonStats {
        self.base_stats
    }

    /// Base stats with every active modifier folded on, in the order they were added.
    pub fn stats(&self) -> PokemonStats {
        self.modifiers
            .iter()
            .fold(self.base_stats, |stats, active| stats.apply_modifier(&active.modifier))
    }

    /// End-of-round upkeep: tick every modifier down, drop the expired ones,
    /// then bring health back under the (possibly lower) max.
    pub fn post_round_actions(&mut self) {
        for active in self.modifiers.iter_mut() {
            active.rounds_remaining = active.rounds_remaining.saturating_sub(1);
        }
        self.modifiers.retain(|active| active.rounds_remaining > 0);
        self.health();
    }

    /// Full health, no modifiers, every move back to its max uses.
    pub fn rest(&mut self) {
        self.modifiers.clear();
        self.current_health.set(Some(self.base_stats.max_health));
        for learned in self.moves.iter_mut() {
            learned.uses = Some(learned.move_data.max_uses);
        }
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (lv{})", self.name, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::MoveKind;

    fn pikachu() -> Pokemon {
        Pokemon::new("Pikachu", PokemonStats::new(1.0, 100, 200, 200), "electric", vec![], 1)
    }

    fn tackle() -> MoveData {
        MoveData::attack("Tackle", "normal", 3, 5, 40, 1.0)
    }

    #[test]
    fn test_new_pokemon_starts_at_full_health_with_cubed_experience() {
        let pokemon = Pokemon::new("Eevee", PokemonStats::new(1.0, 90, 50, 40), "normal", vec![], 3);

        assert_eq!(pokemon.health(), 90);
        assert_eq!(pokemon.level(), 3);
        assert_eq!(pokemon.experience(), 27);
        assert_eq!(pokemon.to_string(), "Eevee (lv3)");
    }

    #[test]
    fn test_clones_share_identity_but_new_pokemon_do_not() {
        let pokemon = pikachu();
        let clone = pokemon.clone();
        let twin = pikachu();

        assert_eq!(pokemon.id(), clone.id());
        assert!(pokemon.id() != twin.id());
    }

    #[test]
    fn test_next_level_requirements() {
        let mut pokemon = pikachu();
        let mut requirements = Vec::new();
        for _ in 1..=9 {
            requirements.push(pokemon.next_level_experience_requirement());
            pokemon.level_up();
        }

        assert_eq!(requirements, vec![8, 27, 64, 125, 216, 343, 512, 729, 1000]);
    }

    #[test]
    fn test_gain_experience_levels_up_when_requirement_met() {
        let mut pokemon = pikachu();
        pokemon.gain_experience(6);
        assert_eq!((pokemon.experience(), pokemon.level()), (7, 1));

        let mut pokemon = pikachu();
        pokemon.gain_experience(8);
        assert_eq!((pokemon.experience(), pokemon.level()), (9, 2));
        assert_eq!(pokemon.stats(), PokemonStats::new(1.0, 105, 210, 210));

        pokemon.gain_experience(18);
        assert_eq!(pokemon.level(), 3);
        assert_eq!(pokemon.stats(), PokemonStats::new(1.0, 110, 220, 220));
    }

    #[test]
    fn test_gain_experience_cascades_and_zero_is_noop() {
        let mut pokemon = pikachu();
        pokemon.gain_experience(999);
        assert_eq!(pokemon.level(), 10);

        let before = pokemon.clone();
        pokemon.gain_experience(0);
        pokemon.gain_experience(0);
        assert_eq!(pokemon, before);
    }

    #[test]
    fn test_level_up_keeps_health_deficit() {
        let mut pokemon = pikachu();
        pokemon.modify_health(-30);
        pokemon.level_up();

        assert_eq!(pokemon.health(), 75);
    }

    #[test]
    fn test_level_up_never_revives_a_fainted_pokemon() {
        let mut pokemon = pikachu();
        pokemon.modify_health(-1000);
        pokemon.gain_experience(100);

        assert!(pokemon.level() > 1);
        assert!(pokemon.has_fainted());
    }

    #[rstest]
    #[case(1, 28)]
    #[case(2, 57)]
    #[case(3, 85)]
    #[case(7, 200)]
    #[case(10, 285)]
    fn test_experience_on_death(#[case] level: u32, #[case] expected: u64) {
        let pokemon = Pokemon::new("Eevee", PokemonStats::new(1.0, 10, 10, 10), "normal", vec![], level);
        assert_eq!(pokemon.experience_on_death(), expected);
    }

    #[rstest]
    #[case(-30, 70)]
    #[case(-1000, 0)]
    #[case(50, 100)]
    #[case(0, 100)]
    fn test_modify_health_clamps(#[case] change: i64, #[case] expected: u32) {
        let mut pokemon = pikachu();
        pokemon.modify_health(change);
        assert_eq!(pokemon.health(), expected);
    }

    #[test]
    fn test_modifiers_raise_the_health_ceiling() {
        let mut pokemon = pikachu();
        for max_health in [200, 200, 100, 150] {
            pokemon.add_stat_modifier(StatModifier::new(1.0, max_health, 3, 4), 5);
        }
        pokemon.modify_health(1000);
        assert_eq!(pokemon.health(), 750);

        pokemon.add_stat_modifier(StatModifier::new(1.0, -740, 100, 100), 5);
        pokemon.modify_health(1);
        assert_eq!(pokemon.health(), 10);
    }

    #[test]
    fn test_health_is_clamped_lazily_on_read() {
        let mut pokemon = pikachu();
        pokemon.add_stat_modifier(StatModifier::new(0.5, -5, 5, 5), 2);
        assert_eq!(pokemon.health(), 95);

        pokemon.add_stat_modifier(StatModifier::new(0.5, 5, 5, 5), 2);
        assert_eq!(pokemon.health(), 95);
        assert_eq!(pokemon.max_health(), 100);
    }

    #[test]
    fn test_post_round_actions_expire_modifiers() {
        let mut pokemon = pikachu();
        pokemon.add_stat_modifier(StatModifier::new(0.5, 5, 5, 5), 2);
        assert_eq!(pokemon.stats(), PokemonStats::new(1.5, 105, 205, 205));

        pokemon.post_round_actions();
        assert_eq!(pokemon.stats(), PokemonStats::new(1.5, 105, 205, 205));

        pokemon.post_round_actions();
        assert_eq!(pokemon.stats(), PokemonStats::new(1.0, 100, 200, 200));
        assert!(pokemon.modifiers().is_empty());
    }

    #[test]
    fn test_expiring_buff_cuts_health_back_to_max() {
        let mut pokemon = pikachu();
        pokemon.add_stat_modifier(StatModifier::new(0.0, 50, 0, 0), 1);
        pokemon.modify_health(50);
        assert_eq!(pokemon.health(), 150);

        pokemon.post_round_actions();
        assert_eq!(pokemon.health(), 100);
    }

    #[test]
    fn test_move_slots_and_duplicates() {
        let mut pokemon = pikachu();
        assert!(pokemon.learn_move(tackle()));
        assert!(!pokemon.can_learn_move(&tackle()));
        assert!(!pokemon.learn_move(tackle()));

        for name in ["Growl", "Splash", "Harden"] {
            assert!(pokemon.learn_move(MoveData::new(name, "normal", 5, 0, MoveKind::Plain)));
        }
        let fifth = MoveData::new("Rest", "psychic", 5, 0, MoveKind::Plain);
        assert!(!pokemon.can_learn_move(&fifth));

        pokemon.forget_move(&tackle());
        assert!(!pokemon.knows_move(&tackle()));
        assert!(pokemon.can_learn_move(&fifth));
    }

    #[test]
    fn test_move_uses_are_tracked_per_move() {
        let mut pokemon = Pokemon::new(
            "Pikachu",
            PokemonStats::new(1.0, 100, 200, 200),
            "electric",
            vec![tackle()],
            1,
        );
        let unknown = MoveData::new("Splash", "water", 5, 0, MoveKind::Plain);

        assert_eq!(pokemon.remaining_move_uses(&tackle()), 3);
        assert_eq!(pokemon.remaining_move_uses(&unknown), 0);

        for _ in 0..5 {
            pokemon.reduce_move_count(&tackle());
        }
        pokemon.reduce_move_count(&unknown);

        assert_eq!(pokemon.remaining_move_uses(&tackle()), 0);
        assert!(!pokemon.has_moves_left());
    }

    #[test]
    fn test_move_info_is_sorted_by_name() {
        let splash = MoveData::new("Splash", "water", 5, 0, MoveKind::Plain);
        let growl = MoveData::new("Growl", "normal", 10, 0, MoveKind::Plain);
        let mut pokemon = Pokemon::new(
            "Magikarp",
            PokemonStats::new(1.0, 30, 10, 10),
            "water",
            vec![splash.clone(), tackle(), growl.clone()],
            1,
        );
        pokemon.reduce_move_count(&splash);

        let info: Vec<(String, u32)> = pokemon
            .move_info()
            .into_iter()
            .map(|(move_data, uses)| (move_data.name.clone(), uses))
            .collect();

        assert_eq!(
            info,
            vec![
                ("Growl".to_string(), 10),
                ("Splash".to_string(), 4),
                ("Tackle".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_rest_restores_everything() {
        let mut pokemon = Pokemon::new(
            "Pikachu",
            PokemonStats::new(1.0, 100, 200, 200),
            "electric",
            vec![tackle()],
            1,
        );
        pokemon.add_stat_modifier(StatModifier::new(0.0, -50, 0, 0), 3);
        pokemon.modify_health(-20);
        pokemon.reduce_move_count(&tackle());

        pokemon.rest();

        assert_eq!(pokemon.health(), 100);
        assert_eq!(pokemon.remaining_move_uses(&tackle()), 3);
        assert!(pokemon.modifiers().is_empty());
    }
}
