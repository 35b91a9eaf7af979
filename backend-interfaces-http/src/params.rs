// Query-string normalization for the raw-data endpoint
// Everything past build_map_request is typed; the handler never touches
// raw strings.

use std::collections::HashMap;

use backend_application::dtos::MapRequest;
use backend_application::AppError;
use backend_domain::BoundingBox;

/// Loose boolean parsing: literal `true`/`false` toggle, anything else
/// keeps the default. Matches how lenient map clients send flags.
fn bool_param(query: &HashMap<String, String>, key: &str, default: bool) -> bool {
    match query.get(key).map(|value| value.as_str()) {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}

fn required_float(query: &HashMap<String, String>, key: &'static str) -> Result<f64, AppError> {
    query
        .get(key)
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or(AppError::MissingParameter(key))
}

fn opt_float(query: &HashMap<String, String>, key: &str) -> Option<f64> {
    query.get(key).and_then(|value| value.parse::<f64>().ok())
}

fn opt_millis(query: &HashMap<String, String>, key: &str) -> Option<i64> {
    query.get(key).and_then(|value| value.parse::<i64>().ok())
}

/// Comma-separated species id list. Empty segments and unparsable
/// entries are dropped rather than failing the request.
fn id_list(query: &HashMap<String, String>, key: &str) -> Option<Vec<i32>> {
    let raw = query.get(key)?;
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .filter_map(|part| part.trim().parse::<i32>().ok())
            .collect(),
    )
}

/// Normalize the raw query string into a typed [`MapRequest`].
///
/// The four viewport corners are required; the previous viewport is
/// carried only when all four old corners arrive together. `reids`
/// merges into the whitelist and is echoed back verbatim.
pub fn build_map_request(query: &HashMap<String, String>) -> Result<MapRequest, AppError> {
    let bounds = BoundingBox::new(
        required_float(query, "swLat")?,
        required_float(query, "swLng")?,
        required_float(query, "neLat")?,
        required_float(query, "neLng")?,
    );

    let prev_bounds = match (
        opt_float(query, "oSwLat"),
        opt_float(query, "oSwLng"),
        opt_float(query, "oNeLat"),
        opt_float(query, "oNeLng"),
    ) {
        (Some(sw_lat), Some(sw_lng), Some(ne_lat), Some(ne_lng)) => {
            Some(BoundingBox::new(sw_lat, sw_lng, ne_lat, ne_lng))
        }
        _ => None,
    };

    let show_pokemon = bool_param(query, "pokemon", true) && !bool_param(query, "no_pokemon", false);
    let show_pokestops =
        bool_param(query, "pokestops", true) && !bool_param(query, "no_pokestops", false);
    let show_gyms = bool_param(query, "gyms", true) && !bool_param(query, "no_gyms", false);

    let mut ids = id_list(query, "ids").unwrap_or_default();
    let eids = id_list(query, "eids").unwrap_or_default();
    let reids = id_list(query, "reids");
    if let Some(extra) = &reids {
        ids.extend(extra.iter().copied());
    }

    Ok(MapRequest {
        bounds,
        prev_bounds,
        show_pokemon,
        show_pokestops,
        show_gyms,
        last_pokemon: bool_param(query, "lastpokemon", false),
        last_pokestops: bool_param(query, "lastpokestops", false),
        last_gyms: bool_param(query, "lastgyms", false),
        last_slocs: bool_param(query, "lastslocs", false),
        last_spawns: bool_param(query, "lastspawns", false),
        ids,
        eids,
        reids,
        timestamp: opt_millis(query, "timestamp"),
        lured_only: bool_param(query, "luredonly", true),
        scanned: bool_param(query, "scanned", false),
        spawnpoints: bool_param(query, "spawnpoints", false),
    })
}
