// Species catalog loader
// Reads the static JSON lookup table shipped next to the config file

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use backend_domain::{SpeciesCatalog, SpeciesEntry};

/// Load the species catalog from a JSON file keyed by numeric species
/// id. A missing file is not an error; the server runs with an empty
/// catalog and serves unenriched sightings.
pub async fn load_species_catalog(path: &Path) -> Result<SpeciesCatalog> {
    if !path.exists() {
        warn!(path = %path.display(), "species file not found, serving unenriched sightings");
        return Ok(SpeciesCatalog::default());
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading species file {}", path.display()))?;
    let parsed: HashMap<String, SpeciesEntry> =
        serde_json::from_str(&raw).with_context(|| format!("parsing species file {}", path.display()))?;

    let mut entries = HashMap::with_capacity(parsed.len());
    for (key, entry) in parsed {
        match key.parse::<i32>() {
            Ok(species_id) => {
                entries.insert(species_id, entry);
            }
            Err(_) => {
                warn!(key = %key, "skipping species entry with non-numeric id");
            }
        }
    }
    Ok(SpeciesCatalog::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let catalog = load_species_catalog(Path::new("/nonexistent/species.json"))
            .await
            .unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn parses_numeric_keys_and_skips_bad_ones() {
        let dir = std::env::temp_dir().join("rovemap-species-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("species.json");
        std::fs::write(
            &path,
            r##"{
                "25": {"name": "Pikachu", "rarity": "Common", "types": [{"type": "Electric", "color": "#FAC000"}]},
                "not-a-number": {"name": "Broken"}
            }"##,
        )
        .unwrap();

        let catalog = load_species_catalog(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(25).unwrap().name, "Pikachu");
    }
}
