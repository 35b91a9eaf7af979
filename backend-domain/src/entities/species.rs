// Static species catalog entries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesTypeEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub types: Vec<SpeciesTypeEntry>,
}
