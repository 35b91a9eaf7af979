// The incremental viewport query & merge protocol

use anyhow::anyhow;
use tracing::error;

use backend_domain::{MapFilter, Pokemon, Pokestop};

use crate::dtos::{MapRequest, MapResponse};
use crate::queries::aggregator::ResponseAggregator;
use crate::queries::gym_queries;
use crate::AppError;
use crate::AppState;

/// Runs the three entity pipelines concurrently and assembles the
/// single response. Fails fast with `EmptyRequest` before any fetch
/// when every type is suppressed; any store failure aborts the whole
/// request.
pub async fn fetch_map_data(state: &AppState, request: &MapRequest) -> Result<MapResponse, AppError> {
    if !request.show_pokemon && !request.show_pokestops && !request.show_gyms {
        return Err(AppError::EmptyRequest);
    }

    let new_area = request.bounds.uncovers_new_area(request.prev_bounds.as_ref());

    let mut aggregator = ResponseAggregator::new(request);
    let (pokemons, pokestops, gyms) = tokio::try_join!(
        fetch_pokemon_part(state, request, new_area),
        fetch_pokestop_part(state, request, new_area),
        gym_queries::fetch_gym_part(state, request, new_area),
    )?;

    if let Some(rows) = pokemons {
        state.metrics.record_rows(rows.len());
        aggregator.complete_pokemon(rows);
    }
    if let Some(rows) = pokestops {
        state.metrics.record_rows(rows.len());
        aggregator.complete_pokestops(rows);
    }
    if let Some(map) = gyms {
        state.metrics.record_rows(map.len());
        aggregator.complete_gyms(map);
    }

    aggregator
        .try_finish(request)
        .ok_or_else(|| AppError::Internal(anyhow!("response parts incomplete")))
}

/// Creature pipeline. A non-empty whitelist short-circuits to a single
/// bounds+whitelist fetch; otherwise first load fetches by bounds and
/// a refresh diffs by timestamp, appending the newly uncovered area
/// when the viewport moved.
async fn fetch_pokemon_part(
    state: &AppState,
    request: &MapRequest,
    new_area: bool,
) -> Result<Option<Vec<Pokemon>>, AppError> {
    if !request.show_pokemon {
        return Ok(None);
    }
    let limit = state.config.pokemon_limit;

    let mut rows = if !request.ids.is_empty() {
        let filter = MapFilter::within(request.bounds, limit).whitelist(request.ids.clone());
        fetch_pokemon(state, &filter).await?
    } else if !request.last_pokemon {
        let filter = MapFilter::within(request.bounds, limit).blacklist(request.eids.clone());
        fetch_pokemon(state, &filter).await?
    } else {
        let filter = MapFilter::within(request.bounds, limit)
            .blacklist(request.eids.clone())
            .updated_after(request.timestamp);
        let mut rows = fetch_pokemon(state, &filter).await?;
        if new_area {
            if let Some(prev) = request.prev_bounds {
                let supplemental = filter.clone().exclude_area(prev);
                rows.extend(fetch_pokemon(state, &supplemental).await?);
            }
        }
        rows
    };

    state.species.enrich(&mut rows);
    Ok(Some(rows))
}

async fn fetch_pokemon(state: &AppState, filter: &MapFilter) -> Result<Vec<Pokemon>, AppError> {
    state.pokemon_repo.fetch_active(filter).await.map_err(|err| {
        error!("failed to fetch pokemon: {}", err);
        state.metrics.record_store_error();
        AppError::Internal(err)
    })
}

/// Stop pipeline: same two-path merge as creatures, with the lured
/// filter instead of id lists.
async fn fetch_pokestop_part(
    state: &AppState,
    request: &MapRequest,
    new_area: bool,
) -> Result<Option<Vec<Pokestop>>, AppError> {
    if !request.show_pokestops {
        return Ok(None);
    }
    let limit = state.config.pokestop_limit;

    let rows = if !request.last_pokestops {
        let filter = MapFilter::within(request.bounds, limit).lured_only(request.lured_only);
        fetch_pokestops(state, &filter).await?
    } else {
        let filter = MapFilter::within(request.bounds, limit)
            .lured_only(request.lured_only)
            .updated_after(request.timestamp);
        let mut rows = fetch_pokestops(state, &filter).await?;
        if new_area {
            if let Some(prev) = request.prev_bounds {
                let supplemental = filter.clone().exclude_area(prev);
                rows.extend(fetch_pokestops(state, &supplemental).await?);
            }
        }
        rows
    };

    Ok(Some(rows))
}

async fn fetch_pokestops(state: &AppState, filter: &MapFilter) -> Result<Vec<Pokestop>, AppError> {
    state.pokestop_repo.fetch_stops(filter).await.map_err(|err| {
        error!("failed to fetch pokestops: {}", err);
        state.metrics.record_store_error();
        AppError::Internal(err)
    })
}
