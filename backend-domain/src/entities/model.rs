// Runtime configuration handed to the layers above infrastructure

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub raw_data_route: String,
    pub species_path: String,
    pub pokemon_limit: u64,
    pub pokestop_limit: u64,
    pub gym_limit: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub max_concurrent_requests: usize,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}
