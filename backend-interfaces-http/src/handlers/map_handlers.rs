use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;

use backend_application::dtos::MapResponse;
use backend_application::queries::map_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::params::build_map_request;

/// The single map endpoint. Normalizes the query string, runs the
/// three entity pipelines, and returns the merged response.
pub async fn raw_data(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<MapResponse>, HttpError> {
    state.metrics.record_map_request();
    let request = build_map_request(&query)?;
    let response = map_queries::fetch_map_data(&state, &request).await?;
    Ok(Json(response))
}
