// Read-time species enrichment
// Replaces the computed name/rarity/types columns the store never holds

use std::collections::HashMap;

use crate::entities::{Pokemon, SpeciesEntry};

/// Static species lookup table, injected read-only at startup. An
/// empty catalog is valid and leaves sightings unenriched.
#[derive(Debug, Default, Clone)]
pub struct SpeciesCatalog {
    entries: HashMap<i32, SpeciesEntry>,
}

impl SpeciesCatalog {
    pub fn new(entries: HashMap<i32, SpeciesEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, species_id: i32) -> Option<&SpeciesEntry> {
        self.entries.get(&species_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill the derived fields on fetched sightings. Unknown species
    /// ids enrich to empty values rather than failing the fetch.
    pub fn enrich(&self, sightings: &mut [Pokemon]) {
        for sighting in sightings.iter_mut() {
            if let Some(entry) = self.entries.get(&sighting.pokemon_id) {
                sighting.pokemon_name = entry.name.clone();
                sighting.pokemon_rarity = entry.rarity.clone();
                sighting.pokemon_types = entry.types.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpeciesTypeEntry;

    fn sighting(species_id: i32) -> Pokemon {
        Pokemon {
            encounter_id: "enc-1".to_string(),
            pokemon_id: species_id,
            latitude: 0.5,
            longitude: 0.5,
            disappear_time: 1_700_000_000_000,
            individual_attack: None,
            individual_defense: None,
            individual_stamina: None,
            move_1: None,
            move_2: None,
            cp: None,
            height: None,
            weight: None,
            gender: None,
            form: None,
            last_modified: 1_700_000_000_000,
            pokemon_name: String::new(),
            pokemon_rarity: String::new(),
            pokemon_types: Vec::new(),
        }
    }

    #[test]
    fn enrich_fills_known_species() {
        let mut entries = HashMap::new();
        entries.insert(
            25,
            SpeciesEntry {
                name: "Pikachu".to_string(),
                rarity: "Common".to_string(),
                types: vec![SpeciesTypeEntry {
                    type_name: "Electric".to_string(),
                    color: "#FAC000".to_string(),
                }],
            },
        );
        let catalog = SpeciesCatalog::new(entries);

        let mut rows = vec![sighting(25)];
        catalog.enrich(&mut rows);
        assert_eq!(rows[0].pokemon_name, "Pikachu");
        assert_eq!(rows[0].pokemon_rarity, "Common");
        assert_eq!(rows[0].pokemon_types.len(), 1);
    }

    #[test]
    fn enrich_leaves_unknown_species_empty() {
        let catalog = SpeciesCatalog::default();
        let mut rows = vec![sighting(999)];
        catalog.enrich(&mut rows);
        assert!(rows[0].pokemon_name.is_empty());
        assert!(rows[0].pokemon_types.is_empty());
    }
}
