// Join barrier for the three entity-type pipelines

use std::collections::HashMap;

use backend_domain::{current_millis, Gym, Pokemon, Pokestop};

use crate::dtos::{MapRequest, MapResponse};

#[derive(Debug)]
struct PartSlot<T> {
    complete: bool,
    rows: Option<T>,
}

impl<T> PartSlot<T> {
    fn pending(requested: bool) -> Self {
        // An unrequested type is complete from the start and never
        // contributes rows.
        Self {
            complete: !requested,
            rows: None,
        }
    }

    fn complete_with(&mut self, rows: T) {
        self.rows = Some(rows);
        self.complete = true;
    }
}

/// Collects the per-type results and emits the response exactly once,
/// the instant all three parts are complete. Partial results are never
/// observable: `try_finish` yields nothing until the barrier is down,
/// and nothing again after the single emission.
#[derive(Debug)]
pub struct ResponseAggregator {
    pokemon: PartSlot<Vec<Pokemon>>,
    pokestops: PartSlot<Vec<Pokestop>>,
    gyms: PartSlot<HashMap<String, Gym>>,
    emitted: bool,
}

impl ResponseAggregator {
    pub fn new(request: &MapRequest) -> Self {
        Self {
            pokemon: PartSlot::pending(request.show_pokemon),
            pokestops: PartSlot::pending(request.show_pokestops),
            gyms: PartSlot::pending(request.show_gyms),
            emitted: false,
        }
    }

    pub fn complete_pokemon(&mut self, rows: Vec<Pokemon>) {
        self.pokemon.complete_with(rows);
    }

    pub fn complete_pokestops(&mut self, rows: Vec<Pokestop>) {
        self.pokestops.complete_with(rows);
    }

    pub fn complete_gyms(&mut self, gyms: HashMap<String, Gym>) {
        self.gyms.complete_with(gyms);
    }

    pub fn try_finish(&mut self, request: &MapRequest) -> Option<MapResponse> {
        if self.emitted {
            return None;
        }
        if !(self.pokemon.complete && self.pokestops.complete && self.gyms.complete) {
            return None;
        }
        self.emitted = true;
        Some(MapResponse {
            timestamp: current_millis(),
            lastgyms: request.show_gyms,
            lastpokestops: request.show_pokestops,
            lastpokemon: request.show_pokemon,
            lastslocs: request.scanned,
            lastspawns: request.spawnpoints,
            o_sw_lat: request.bounds.sw_lat,
            o_sw_lng: request.bounds.sw_lng,
            o_ne_lat: request.bounds.ne_lat,
            o_ne_lng: request.bounds.ne_lng,
            reids: request.reids.clone(),
            pokemons: self.pokemon.rows.take(),
            pokestops: self.pokestops.rows.take(),
            gyms: self.gyms.rows.take(),
        })
    }
}
