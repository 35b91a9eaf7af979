use axum::Router;

use backend_application::AppState;

use crate::handlers::{map_handlers, ops_handlers};

/// Route table. The map route path comes from configuration so
/// deployments can hide the endpoint behind a non-default path.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            state.config.raw_data_route.as_str(),
            axum::routing::get(map_handlers::raw_data),
        )
        .route(
            "/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use backend_application::{AppState, Metrics};
    use backend_domain::ports::{GymRepository, PokemonRepository, PokestopRepository};
    use backend_domain::{
        Gym, GymMember, GymPokemon, MapFilter, Pokemon, Pokestop, RaidEvent, RuntimeConfig,
        SpeciesCatalog,
    };

    use super::build_router;

    struct EmptyPokemonRepo;

    #[async_trait]
    impl PokemonRepository for EmptyPokemonRepo {
        async fn fetch_active(&self, _filter: &MapFilter) -> anyhow::Result<Vec<Pokemon>> {
            Ok(Vec::new())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct EmptyPokestopRepo;

    #[async_trait]
    impl PokestopRepository for EmptyPokestopRepo {
        async fn fetch_stops(&self, _filter: &MapFilter) -> anyhow::Result<Vec<Pokestop>> {
            Ok(Vec::new())
        }
    }

    struct EmptyGymRepo;

    #[async_trait]
    impl GymRepository for EmptyGymRepo {
        async fn fetch_gyms(&self, _filter: &MapFilter) -> anyhow::Result<Vec<Gym>> {
            Ok(Vec::new())
        }

        async fn fetch_raids(&self, _gym_ids: &[String]) -> anyhow::Result<Vec<RaidEvent>> {
            Ok(Vec::new())
        }

        async fn fetch_members(&self, _gym_ids: &[String]) -> anyhow::Result<Vec<GymMember>> {
            Ok(Vec::new())
        }

        async fn fetch_member_details(&self, _uids: &[String]) -> anyhow::Result<Vec<GymPokemon>> {
            Ok(Vec::new())
        }
    }

    fn test_state() -> AppState {
        AppState {
            config: RuntimeConfig {
                bind_addr: "127.0.0.1:0".to_string(),
                raw_data_route: "/raw_data".to_string(),
                species_path: "./species.json".to_string(),
                pokemon_limit: 50_000,
                pokestop_limit: 50_000,
                gym_limit: 50_000,
                max_body_bytes: 65_536,
                request_timeout_seconds: 5,
                max_concurrent_requests: 16,
                cors_origins: Vec::new(),
            },
            pokemon_repo: Arc::new(EmptyPokemonRepo),
            pokestop_repo: Arc::new(EmptyPokestopRepo),
            gym_repo: Arc::new(EmptyGymRepo),
            species: Arc::new(SpeciesCatalog::default()),
            metrics: Arc::new(Metrics::default()),
        }
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let router = build_router(test_state());
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn default_request_returns_all_three_parts() {
        let (status, body) =
            get("/raw_data?swLat=0.0&swLng=0.0&neLat=10.0&neLng=10.0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pokemons"], serde_json::json!([]));
        assert_eq!(body["pokestops"], serde_json::json!([]));
        assert_eq!(body["gyms"], serde_json::json!({}));
        assert_eq!(body["oSwLat"], serde_json::json!(0.0));
        assert_eq!(body["oNeLng"], serde_json::json!(10.0));
        assert_eq!(body["lastpokemon"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn missing_viewport_corner_is_bad_request() {
        let (status, body) = get("/raw_data?swLat=0.0&swLng=0.0&neLat=10.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("missing parameter: neLng"));
    }

    #[tokio::test]
    async fn suppressing_every_type_is_bad_request() {
        let (status, _) = get(
            "/raw_data?swLat=0.0&swLng=0.0&neLat=10.0&neLng=10.0\
             &pokemon=false&pokestops=false&gyms=false",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_live_is_ok() {
        let (status, _) = get("/ops/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_plain_text() {
        let router = build_router(test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/ops/metrics/prometheus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("rovemap_map_requests_total"));
    }
}
