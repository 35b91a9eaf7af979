use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clickhouse::Client;
use tracing::{info, warn};

use backend_application::{AppState, Metrics};
use backend_infrastructure::{load_species_catalog, AppConfig, ClickhouseMapRepo};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let mut clickhouse = Client::default()
            .with_url(&db_config.clickhouse_url)
            .with_database(&db_config.clickhouse_database);
        if let Some(user) = &db_config.clickhouse_user {
            clickhouse = clickhouse.with_user(user);
        }
        if let Some(password) = &db_config.clickhouse_password {
            clickhouse = clickhouse.with_password(password);
        }

        let repo = Arc::new(ClickhouseMapRepo::new(
            clickhouse,
            db_config.clickhouse_database.clone(),
        ));
        repo.ensure_schema().await?;

        let species = match load_species_catalog(Path::new(&runtime_config.species_path)).await {
            Ok(catalog) => {
                info!(entries = catalog.len(), "species catalog loaded");
                catalog
            }
            Err(err) => {
                warn!("species catalog unavailable: {}", err);
                Default::default()
            }
        };

        let state = AppState {
            config: runtime_config,
            pokemon_repo: repo.clone(),
            pokestop_repo: repo.clone(),
            gym_repo: repo,
            species: Arc::new(species),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
