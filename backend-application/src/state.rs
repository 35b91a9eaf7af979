use std::sync::Arc;

use backend_domain::ports::{GymRepository, PokemonRepository, PokestopRepository};
use backend_domain::{RuntimeConfig, SpeciesCatalog};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub pokemon_repo: Arc<dyn PokemonRepository>,
    pub pokestop_repo: Arc<dyn PokestopRepository>,
    pub gym_repo: Arc<dyn GymRepository>,
    pub species: Arc<SpeciesCatalog>,
    pub metrics: Arc<Metrics>,
}
