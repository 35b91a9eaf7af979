// Pokéstop entity

use serde::{Deserialize, Serialize};

/// Long-lived point of interest. `last_updated` is the column the
/// incremental refresh diffs against; `last_modified` is bookkeeping.
/// Lure metadata is transient and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokestop {
    pub pokestop_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub enabled: bool,
    pub last_modified: i64,
    pub last_updated: i64,
    pub active_fort_modifier: Option<String>,
    pub lure_expiration: Option<i64>,
}

impl Pokestop {
    pub fn is_lured(&self) -> bool {
        self.active_fort_modifier.is_some()
    }
}
