// Gym entity and its dependent records
// The base row carries the joined gymdetails columns (name, url)

use serde::{Deserialize, Serialize};

/// Team-controlled structure. `event` and `occupants` are attached by
/// the detail joiner after the base fetch; a gym fresh out of the store
/// has `event: None` and an empty occupant list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gym {
    pub gym_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub team_id: i32,
    pub gym_points: i32,
    pub enabled: bool,
    pub name: String,
    pub url: Option<String>,
    pub last_modified: i64,
    pub last_scanned: i64,
    #[serde(default)]
    pub event: Option<RaidEvent>,
    #[serde(default)]
    pub occupants: Vec<GymOccupant>,
}

/// Zero-or-one timed raid per gym, keyed by gym id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaidEvent {
    pub gym_id: String,
    pub level: i32,
    pub spawn: i64,
    pub start: i64,
    pub end: i64,
    pub pokemon_id: Option<i32>,
    pub cp: Option<i32>,
    pub move_1: Option<i32>,
    pub move_2: Option<i32>,
    pub last_scanned: i64,
}

/// Occupant link row. References the detail record by `pokemon_uid`,
/// not by gym id; the joiner resolves details through this column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymMember {
    pub gym_id: String,
    pub pokemon_uid: String,
    pub deployed_at: i64,
    pub last_seen: i64,
    pub cp_decayed: i32,
}

/// Occupant detail row, keyed by the opaque `pokemon_uid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymPokemon {
    pub pokemon_uid: String,
    pub pokemon_id: i32,
    pub cp: i32,
    pub move_1: Option<i32>,
    pub move_2: Option<i32>,
    pub iv_attack: Option<i32>,
    pub iv_defense: Option<i32>,
    pub iv_stamina: Option<i32>,
}

/// A member row merged with its resolved detail row. Detail fields are
/// absent when no detail record exists for the uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymOccupant {
    pub pokemon_uid: String,
    pub deployed_at: i64,
    pub last_seen: i64,
    pub cp_decayed: i32,
    pub pokemon_id: Option<i32>,
    pub cp: Option<i32>,
    pub move_1: Option<i32>,
    pub move_2: Option<i32>,
    pub iv_attack: Option<i32>,
    pub iv_defense: Option<i32>,
    pub iv_stamina: Option<i32>,
}

impl GymOccupant {
    pub fn from_parts(member: GymMember, detail: Option<&GymPokemon>) -> Self {
        Self {
            pokemon_uid: member.pokemon_uid,
            deployed_at: member.deployed_at,
            last_seen: member.last_seen,
            cp_decayed: member.cp_decayed,
            pokemon_id: detail.map(|d| d.pokemon_id),
            cp: detail.map(|d| d.cp),
            move_1: detail.and_then(|d| d.move_1),
            move_2: detail.and_then(|d| d.move_2),
            iv_attack: detail.and_then(|d| d.iv_attack),
            iv_defense: detail.and_then(|d| d.iv_defense),
            iv_stamina: detail.and_then(|d| d.iv_stamina),
        }
    }
}
