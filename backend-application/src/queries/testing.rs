// In-memory repository stubs shared by the query tests
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use backend_domain::ports::{GymRepository, PokemonRepository, PokestopRepository};
use backend_domain::{
    Gym, GymMember, GymPokemon, MapFilter, Pokemon, Pokestop, RaidEvent, RuntimeConfig,
    SpeciesCatalog,
};

use crate::{AppState, Metrics};

fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        raw_data_route: "/raw_data".to_string(),
        species_path: String::new(),
        pokemon_limit: 50_000,
        pokestop_limit: 50_000,
        gym_limit: 50_000,
        max_body_bytes: 1024,
        request_timeout_seconds: 5,
        max_concurrent_requests: 16,
        cors_origins: Vec::new(),
    }
}

pub fn state_with(
    pokemon: PokemonRepoStub,
    pokestops: PokestopRepoStub,
    gyms: GymRepoStub,
) -> AppState {
    AppState {
        config: runtime_config(),
        pokemon_repo: Arc::new(pokemon),
        pokestop_repo: Arc::new(pokestops),
        gym_repo: Arc::new(gyms),
        species: Arc::new(SpeciesCatalog::default()),
        metrics: Arc::new(Metrics::default()),
    }
}

#[derive(Default, Clone)]
pub struct PokemonRepoStub {
    pub rows: Vec<Pokemon>,
    pub fail: bool,
    calls: Arc<Mutex<Vec<MapFilter>>>,
}

impl PokemonRepoStub {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MapFilter> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl PokemonRepository for PokemonRepoStub {
    async fn fetch_active(&self, filter: &MapFilter) -> anyhow::Result<Vec<Pokemon>> {
        self.calls.lock().expect("calls lock").push(filter.clone());
        if self.fail {
            return Err(anyhow!("store unavailable"));
        }
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct PokestopRepoStub {
    pub rows: Vec<Pokestop>,
    calls: Arc<Mutex<Vec<MapFilter>>>,
}

impl PokestopRepoStub {
    pub fn calls(&self) -> Vec<MapFilter> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl PokestopRepository for PokestopRepoStub {
    async fn fetch_stops(&self, filter: &MapFilter) -> anyhow::Result<Vec<Pokestop>> {
        self.calls.lock().expect("calls lock").push(filter.clone());
        Ok(self.rows.clone())
    }
}

#[derive(Default, Clone)]
pub struct GymRepoStub {
    pub gyms: Vec<Gym>,
    pub raids: Vec<RaidEvent>,
    pub members: Vec<GymMember>,
    pub details: Vec<GymPokemon>,
    base_calls: Arc<Mutex<Vec<MapFilter>>>,
    detail_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl GymRepoStub {
    pub fn with_data(
        gyms: Vec<Gym>,
        raids: Vec<RaidEvent>,
        members: Vec<GymMember>,
        details: Vec<GymPokemon>,
    ) -> Self {
        Self {
            gyms,
            raids,
            members,
            details,
            ..Self::default()
        }
    }

    pub fn base_calls(&self) -> Vec<MapFilter> {
        self.base_calls.lock().expect("calls lock").clone()
    }

    /// Uids requested from the detail table, one entry per call.
    pub fn detail_calls(&self) -> Vec<Vec<String>> {
        self.detail_calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl GymRepository for GymRepoStub {
    async fn fetch_gyms(&self, filter: &MapFilter) -> anyhow::Result<Vec<Gym>> {
        self.base_calls.lock().expect("calls lock").push(filter.clone());
        Ok(self.gyms.clone())
    }

    async fn fetch_raids(&self, gym_ids: &[String]) -> anyhow::Result<Vec<RaidEvent>> {
        Ok(self
            .raids
            .iter()
            .filter(|raid| gym_ids.contains(&raid.gym_id))
            .cloned()
            .collect())
    }

    async fn fetch_members(&self, gym_ids: &[String]) -> anyhow::Result<Vec<GymMember>> {
        Ok(self
            .members
            .iter()
            .filter(|member| gym_ids.contains(&member.gym_id))
            .cloned()
            .collect())
    }

    async fn fetch_member_details(&self, uids: &[String]) -> anyhow::Result<Vec<GymPokemon>> {
        self.detail_calls
            .lock()
            .expect("calls lock")
            .push(uids.to_vec());
        Ok(self
            .details
            .iter()
            .filter(|detail| uids.contains(&detail.pokemon_uid))
            .cloned()
            .collect())
    }
}

pub fn gym(gym_id: &str) -> Gym {
    Gym {
        gym_id: gym_id.to_string(),
        latitude: 0.5,
        longitude: 0.5,
        team_id: 1,
        gym_points: 1000,
        enabled: true,
        name: format!("Gym {}", gym_id),
        url: None,
        last_modified: 1_700_000_000_000,
        last_scanned: 1_700_000_000_000,
        event: None,
        occupants: Vec::new(),
    }
}

pub fn gyms_by_id(gyms: &HashMap<String, Gym>, id: &str) -> Gym {
    gyms.get(id).cloned().expect("gym present")
}
