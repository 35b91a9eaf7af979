// Pokémon sighting entity
// Ephemeral: rows past disappear_time are never served

use serde::{Deserialize, Serialize};

use crate::entities::species::SpeciesTypeEntry;

/// One active sighting inside the client viewport. All timestamps are
/// epoch milliseconds. The `pokemon_name`/`pokemon_rarity`/
/// `pokemon_types` fields are filled at read time from the species
/// catalog and never come from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub encounter_id: String,
    pub pokemon_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub disappear_time: i64,
    pub individual_attack: Option<i32>,
    pub individual_defense: Option<i32>,
    pub individual_stamina: Option<i32>,
    pub move_1: Option<i32>,
    pub move_2: Option<i32>,
    pub cp: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<i32>,
    pub form: Option<i32>,
    pub last_modified: i64,
    #[serde(default)]
    pub pokemon_name: String,
    #[serde(default)]
    pub pokemon_rarity: String,
    #[serde(default)]
    pub pokemon_types: Vec<SpeciesTypeEntry>,
}
