use crate::errors::{BattleError, BattleResult};
use crate::pokemon::Pokemon;
use schema::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of pokemon a trainer can carry.
pub const MAXIMUM_POKEMON_ROSTER: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub name: String,
    roster: Vec<Pokemon>,
    /// Index into `roster`; set by the first `add_pokemon`.
    active_index: Option<usize>,
    /// Item counts in the order items were first added. Counts never sit at 0.
    inventory: Vec<(Item, u32)>,
}

impl Trainer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            roster: Vec::new(),
            active_index: None,
            inventory: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Roster ---

    /// The pokemon currently out on the field.
    pub fn active_pokemon(&self) -> BattleResult<&Pokemon> {
        self.active_index
            .and_then(|index| self.roster.get(index))
            .ok_or_else(|| self.no_pokemon())
    }

    pub fn active_pokemon_mut(&mut self) -> BattleResult<&mut Pokemon> {
        match self.active_index {
            Some(index) if index < self.roster.len() => Ok(&mut self.roster[index]),
            _ => Err(self.no_pokemon()),
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Every pokemon in the order it joined the roster.
    pub fn all_pokemon(&self) -> &[Pokemon] {
        &self.roster
    }

    /// True iff every roster member has fainted. An empty roster counts as fainted.
    pub fn all_pokemon_fainted(&self) -> bool {
        self.roster.iter().all(Pokemon::has_fainted)
    }

    pub fn can_add_pokemon(&self, pokemon: &Pokemon) -> bool {
        self.roster.len() < MAXIMUM_POKEMON_ROSTER
            && !self.roster.iter().any(|member| member.id() == pokemon.id())
    }

    /// Append a pokemon to the roster. The first pokemon added becomes active.
    pub fn add_pokemon(&mut self, pokemon: Pokemon) -> BattleResult<()> {
        if self.roster.len() >= MAXIMUM_POKEMON_ROSTER {
            return Err(BattleError::RosterFull {
                trainer: self.name.clone(),
            });
        }
        if !self.can_add_pokemon(&pokemon) {
            return Err(BattleError::DuplicatePokemon {
                name: pokemon.name.clone(),
            });
        }
        self.roster.push(pokemon);
        if self.active_index.is_none() {
            self.active_index = Some(0);
        }
        Ok(())
    }

    /// A switch is possible to any other roster slot whose pokemon is still standing.
    pub fn can_switch_pokemon(&self, index: usize) -> bool {
        match self.roster.get(index) {
            Some(pokemon) => Some(index) != self.active_index && !pokemon.has_fainted(),
            None => false,
        }
    }

    pub fn switch_pokemon(&mut self, index: usize) -> BattleResult<()> {
        if index >= self.roster.len() {
            return Err(BattleError::InvalidPokemonIndex(index));
        }
        self.active_index = Some(index);
        Ok(())
    }

    pub fn rest_all_pokemon(&mut self) {
        for pokemon in self.roster.iter_mut() {
            pokemon.rest();
        }
    }

    // --- Inventory ---

    pub fn inventory(&self) -> &[(Item, u32)] {
        &self.inventory
    }

    /// Add `uses` of an item, stacking onto an existing entry.
    pub fn add_item(&mut self, item: Item, uses: u32) {
        if uses == 0 {
            return;
        }
        match self.inventory.iter_mut().find(|(held, _)| *held == item) {
            Some((_, count)) => *count += uses,
            None => self.inventory.push((item, uses)),
        }
    }

    pub fn item_count(&self, item: &Item) -> u32 {
        self.inventory
            .iter()
            .find(|(held, _)| held == item)
            .map_or(0, |(_, count)| *count)
    }

    pub fn has_item(&self, item: &Item) -> bool {
        self.item_count(item) > 0
    }

    /// Spend one of an item, dropping the entry when none are left.
    pub fn use_item(&mut self, item: &Item) {
        if let Some(position) = self.inventory.iter().position(|(held, _)| held == item) {
            let count = &mut self.inventory[position].1;
            *count -= 1;
            if *count == 0 {
                self.inventory.remove(position);
            }
        }
    }

    fn no_pokemon(&self) -> BattleError {
        BattleError::NoPokemon {
            trainer: self.name.clone(),
        }
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trainer('{}')", self.name)
    }
}
