use async_trait::async_trait;

use crate::entities::{Gym, GymMember, GymPokemon, Pokemon, Pokestop, RaidEvent};
use crate::value_objects::MapFilter;

/// Active sightings. Implementations always exclude rows whose
/// disappearance instant is not strictly in the future.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn fetch_active(&self, filter: &MapFilter) -> anyhow::Result<Vec<Pokemon>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait PokestopRepository: Send + Sync {
    async fn fetch_stops(&self, filter: &MapFilter) -> anyhow::Result<Vec<Pokestop>>;
}

/// Base gym rows plus the dependent raid/member/detail fetches used by
/// the detail joiner. Each call acquires its own pooled connection; no
/// connection is held across join steps.
#[async_trait]
pub trait GymRepository: Send + Sync {
    async fn fetch_gyms(&self, filter: &MapFilter) -> anyhow::Result<Vec<Gym>>;
    async fn fetch_raids(&self, gym_ids: &[String]) -> anyhow::Result<Vec<RaidEvent>>;
    async fn fetch_members(&self, gym_ids: &[String]) -> anyhow::Result<Vec<GymMember>>;
    async fn fetch_member_details(&self, uids: &[String]) -> anyhow::Result<Vec<GymPokemon>>;
}
