// Request/response shapes for the raw-data endpoint

use std::collections::HashMap;

use serde::Serialize;

use backend_domain::{BoundingBox, Gym, Pokemon, Pokestop};

/// Fully normalized client request. Built by the HTTP layer's
/// parameter normalizer; everything past that point is typed.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub bounds: BoundingBox,
    pub prev_bounds: Option<BoundingBox>,
    pub show_pokemon: bool,
    pub show_pokestops: bool,
    pub show_gyms: bool,
    pub last_pokemon: bool,
    pub last_pokestops: bool,
    pub last_gyms: bool,
    pub last_slocs: bool,
    pub last_spawns: bool,
    /// Species whitelist, with `reids` already merged in.
    pub ids: Vec<i32>,
    pub eids: Vec<i32>,
    /// Echoed back verbatim when the client supplied `reids`.
    pub reids: Option<Vec<i32>>,
    /// Modified-since cutoff, epoch milliseconds.
    pub timestamp: Option<i64>,
    pub lured_only: bool,
    pub scanned: bool,
    pub spawnpoints: bool,
}

/// The single JSON response object. Emitted exactly once per request,
/// after every requested part has completed. The current viewport is
/// echoed as the old viewport for the client's next request, and the
/// `last*` booleans tell the client what to send back.
#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub timestamp: i64,
    pub lastgyms: bool,
    pub lastpokestops: bool,
    pub lastpokemon: bool,
    pub lastslocs: bool,
    pub lastspawns: bool,
    #[serde(rename = "oSwLat")]
    pub o_sw_lat: f64,
    #[serde(rename = "oSwLng")]
    pub o_sw_lng: f64,
    #[serde(rename = "oNeLat")]
    pub o_ne_lat: f64,
    #[serde(rename = "oNeLng")]
    pub o_ne_lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reids: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemons: Option<Vec<Pokemon>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokestops: Option<Vec<Pokestop>>,
    /// Keyed by gym id, not an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyms: Option<HashMap<String, Gym>>,
}
