// The one query planner behind every per-entity fetch
// Turns a MapFilter into a bounded WHERE clause for one table

use backend_domain::MapFilter;

/// Per-table column wiring for the shared planner. Entity tables differ
/// only in which optional columns exist: the incremental-diff column,
/// a species id column (creatures), a lure column (stops), and an
/// expiry column (creatures).
pub struct PlanColumns {
    pub updated: &'static str,
    pub species: Option<&'static str>,
    pub lure: Option<&'static str>,
    pub active_until: Option<&'static str>,
}

pub const POKEMON_COLUMNS: PlanColumns = PlanColumns {
    updated: "last_modified",
    species: Some("pokemon_id"),
    lure: None,
    active_until: Some("disappear_time"),
};

pub const POKESTOP_COLUMNS: PlanColumns = PlanColumns {
    updated: "last_updated",
    species: None,
    lure: Some("active_fort_modifier"),
    active_until: None,
};

pub const GYM_COLUMNS: PlanColumns = PlanColumns {
    updated: "last_scanned",
    species: None,
    lure: None,
    active_until: None,
};

/// Build ` WHERE ... LIMIT n` for a filter. Bounds are inclusive; the
/// timestamp cutoff is a strict greater-than against the store clock;
/// a non-empty whitelist silences the blacklist; rows strictly inside
/// the exclusion box are dropped; the row cap lands after everything
/// else.
pub fn where_clause(filter: &MapFilter, columns: &PlanColumns) -> String {
    let mut clauses: Vec<String> = Vec::new();

    clauses.push(format!(
        "latitude >= {} AND latitude <= {}",
        filter.bounds.sw_lat, filter.bounds.ne_lat
    ));
    clauses.push(format!(
        "longitude >= {} AND longitude <= {}",
        filter.bounds.sw_lng, filter.bounds.ne_lng
    ));

    if let Some(column) = columns.active_until {
        clauses.push(format!("{} > now64(3)", column));
    }

    if let Some(column) = columns.species {
        if !filter.whitelist.is_empty() {
            clauses.push(format!("{} IN ({})", column, join_ids(&filter.whitelist)));
        } else if !filter.blacklist.is_empty() {
            clauses.push(format!("{} NOT IN ({})", column, join_ids(&filter.blacklist)));
        }
    }

    if let Some(cutoff) = filter.updated_after {
        clauses.push(format!(
            "{} > fromUnixTimestamp64Milli({})",
            columns.updated, cutoff
        ));
    }

    if filter.lured_only {
        if let Some(column) = columns.lure {
            clauses.push(format!("{} IS NOT NULL", column));
        }
    }

    if let Some(exclusion) = &filter.exclusion {
        clauses.push(format!(
            "NOT (latitude > {} AND latitude < {} AND longitude > {} AND longitude < {})",
            exclusion.sw_lat, exclusion.ne_lat, exclusion.sw_lng, exclusion.ne_lng
        ));
    }

    format!(" WHERE {} LIMIT {}", clauses.join(" AND "), filter.limit)
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
