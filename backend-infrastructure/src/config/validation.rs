use std::net::SocketAddr;

use anyhow::{anyhow, Result};

use super::app_config::AppConfig;

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr '{}': {}", self.bind_addr, err))?;
        if self.raw_data_route.trim() == "/" {
            return Err(anyhow!("raw_data_route must name a path"));
        }
        for (name, value) in [
            ("pokemon_limit", self.pokemon_limit),
            ("pokestop_limit", self.pokestop_limit),
            ("gym_limit", self.gym_limit),
            ("request_timeout_seconds", self.request_timeout_seconds),
        ] {
            if value == 0 {
                return Err(anyhow!("{} must be > 0", name));
            }
        }
        if self.max_concurrent_requests == 0 {
            return Err(anyhow!("max_concurrent_requests must be > 0"));
        }
        Ok(())
    }
}
