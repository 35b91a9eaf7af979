use std::env;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub raw_data_route: String,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub species_path: String,
    pub pokemon_limit: u64,
    pub pokestop_limit: u64,
    pub gym_limit: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub max_concurrent_requests: usize,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            raw_data_route: "/raw_data".to_string(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "rovemap".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            species_path: "./species.json".to_string(),
            pokemon_limit: 50_000,
            pokestop_limit: 50_000,
            gym_limit: 50_000,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
            max_concurrent_requests: 512,
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("ROVEMAP_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(user) = &self.clickhouse_user {
            if user.trim().is_empty() {
                self.clickhouse_user = None;
            }
        }
        if let Some(password) = &self.clickhouse_password {
            if password.trim().is_empty() {
                self.clickhouse_password = None;
            }
        }
        self.cors_origins
            .retain(|origin| !origin.trim().is_empty());
        if !self.raw_data_route.starts_with('/') {
            self.raw_data_route = format!("/{}", self.raw_data_route);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ROVEMAP_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("ROVEMAP_RAW_DATA_ROUTE") {
            self.raw_data_route = value;
        }
        if let Ok(value) = env::var("ROVEMAP_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("ROVEMAP_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("ROVEMAP_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("ROVEMAP_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("ROVEMAP_SPECIES_PATH") {
            self.species_path = value;
        }
        if let Ok(value) = env::var("ROVEMAP_CORS_ORIGINS") {
            self.cors_origins = value
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }
        for (key, target) in [
            ("ROVEMAP_POKEMON_LIMIT", &mut self.pokemon_limit),
            ("ROVEMAP_POKESTOP_LIMIT", &mut self.pokestop_limit),
            ("ROVEMAP_GYM_LIMIT", &mut self.gym_limit),
        ] {
            if let Ok(value) = env::var(key) {
                if let Ok(parsed) = value.parse() {
                    *target = parsed;
                }
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        let species = Path::new(&self.species_path);
        if species.is_relative() {
            self.species_path = base.join(species).to_string_lossy().to_string();
        }
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            raw_data_route: self.raw_data_route.clone(),
            species_path: self.species_path.clone(),
            pokemon_limit: self.pokemon_limit,
            pokestop_limit: self.pokestop_limit,
            gym_limit: self.gym_limit,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            max_concurrent_requests: self.max_concurrent_requests,
            cors_origins: self.cors_origins.clone(),
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }
}
