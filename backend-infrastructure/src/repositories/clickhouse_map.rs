use anyhow::Result;
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::Deserialize;

use backend_domain::ports::{GymRepository, PokemonRepository, PokestopRepository};
use backend_domain::{Gym, GymMember, GymPokemon, MapFilter, Pokemon, Pokestop, RaidEvent};

use crate::repositories::plan::{
    where_clause, GYM_COLUMNS, POKEMON_COLUMNS, POKESTOP_COLUMNS,
};

/// Map store over a pooled ClickHouse HTTP client. Every query is one
/// independent round trip, so the dependent gym joins never hold a
/// connection between steps. Timestamps live as DateTime64(3) in the
/// store and cross the boundary as epoch milliseconds.
#[derive(Clone)]
pub struct ClickhouseMapRepo {
    client: Client,
    database: String,
}

const POKEMON_SELECT: &str = "SELECT encounter_id, pokemon_id, latitude, longitude, \
     toUnixTimestamp64Milli(disappear_time) AS disappear_time, \
     individual_attack, individual_defense, individual_stamina, \
     move_1, move_2, cp, height, weight, gender, form, \
     toUnixTimestamp64Milli(last_modified) AS last_modified \
     FROM pokemon";

const POKESTOP_SELECT: &str = "SELECT pokestop_id, latitude, longitude, enabled, \
     toUnixTimestamp64Milli(last_modified) AS last_modified, \
     toUnixTimestamp64Milli(last_updated) AS last_updated, \
     active_fort_modifier, \
     toUnixTimestamp64Milli(lure_expiration) AS lure_expiration \
     FROM pokestop";

const GYM_SELECT: &str = "SELECT gym_id, latitude, longitude, team_id, gym_points, enabled, \
     name, url, \
     toUnixTimestamp64Milli(last_modified) AS last_modified, \
     toUnixTimestamp64Milli(last_scanned) AS last_scanned \
     FROM gym";

const RAID_SELECT: &str = "SELECT gym_id, level, \
     toUnixTimestamp64Milli(spawn) AS spawn, \
     toUnixTimestamp64Milli(start) AS start, \
     toUnixTimestamp64Milli(end) AS end, \
     pokemon_id, cp, move_1, move_2, \
     toUnixTimestamp64Milli(last_scanned) AS last_scanned \
     FROM raid";

const MEMBER_SELECT: &str = "SELECT gym_id, pokemon_uid, \
     toUnixTimestamp64Milli(deployed_at) AS deployed_at, \
     toUnixTimestamp64Milli(last_seen) AS last_seen, \
     cp_decayed \
     FROM gymmember";

const DETAIL_SELECT: &str = "SELECT pokemon_uid, pokemon_id, cp, move_1, move_2, \
     iv_attack, iv_defense, iv_stamina \
     FROM gympokemon";

impl ClickhouseMapRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;

        let create_pokemon = r#"
CREATE TABLE IF NOT EXISTS pokemon (
    encounter_id String,
    pokemon_id Int32,
    latitude Float64,
    longitude Float64,
    disappear_time DateTime64(3),
    individual_attack Nullable(Int32),
    individual_defense Nullable(Int32),
    individual_stamina Nullable(Int32),
    move_1 Nullable(Int32),
    move_2 Nullable(Int32),
    cp Nullable(Int32),
    height Nullable(Float64),
    weight Nullable(Float64),
    gender Nullable(Int32),
    form Nullable(Int32),
    last_modified DateTime64(3)
) ENGINE = MergeTree
PARTITION BY toDate(disappear_time)
ORDER BY (latitude, longitude, encounter_id)
TTL toDateTime(disappear_time) + INTERVAL 1 DAY
"#;
        self.client.query(create_pokemon).execute().await?;

        let create_pokestop = r#"
CREATE TABLE IF NOT EXISTS pokestop (
    pokestop_id String,
    latitude Float64,
    longitude Float64,
    enabled Bool,
    last_modified DateTime64(3),
    last_updated DateTime64(3),
    active_fort_modifier Nullable(String),
    lure_expiration Nullable(DateTime64(3))
) ENGINE = MergeTree
ORDER BY (latitude, longitude, pokestop_id)
"#;
        self.client.query(create_pokestop).execute().await?;

        let create_gym = r#"
CREATE TABLE IF NOT EXISTS gym (
    gym_id String,
    latitude Float64,
    longitude Float64,
    team_id Int32,
    gym_points Int32,
    enabled Bool,
    name String,
    url Nullable(String),
    last_modified DateTime64(3),
    last_scanned DateTime64(3)
) ENGINE = MergeTree
ORDER BY (latitude, longitude, gym_id)
"#;
        self.client.query(create_gym).execute().await?;

        let create_raid = r#"
CREATE TABLE IF NOT EXISTS raid (
    gym_id String,
    level Int32,
    spawn DateTime64(3),
    start DateTime64(3),
    end DateTime64(3),
    pokemon_id Nullable(Int32),
    cp Nullable(Int32),
    move_1 Nullable(Int32),
    move_2 Nullable(Int32),
    last_scanned DateTime64(3)
) ENGINE = MergeTree
ORDER BY gym_id
"#;
        self.client.query(create_raid).execute().await?;

        let create_member = r#"
CREATE TABLE IF NOT EXISTS gymmember (
    gym_id String,
    pokemon_uid String,
    deployed_at DateTime64(3),
    last_seen DateTime64(3),
    cp_decayed Int32
) ENGINE = MergeTree
ORDER BY (gym_id, pokemon_uid)
"#;
        self.client.query(create_member).execute().await?;

        let create_detail = r#"
CREATE TABLE IF NOT EXISTS gympokemon (
    pokemon_uid String,
    pokemon_id Int32,
    cp Int32,
    move_1 Nullable(Int32),
    move_2 Nullable(Int32),
    iv_attack Nullable(Int32),
    iv_defense Nullable(Int32),
    iv_stamina Nullable(Int32)
) ENGINE = MergeTree
ORDER BY pokemon_uid
"#;
        self.client.query(create_detail).execute().await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn join_quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|value| quote(value))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Row, Deserialize)]
struct PokemonRow {
    encounter_id: String,
    pokemon_id: i32,
    latitude: f64,
    longitude: f64,
    disappear_time: i64,
    individual_attack: Option<i32>,
    individual_defense: Option<i32>,
    individual_stamina: Option<i32>,
    move_1: Option<i32>,
    move_2: Option<i32>,
    cp: Option<i32>,
    height: Option<f64>,
    weight: Option<f64>,
    gender: Option<i32>,
    form: Option<i32>,
    last_modified: i64,
}

impl From<PokemonRow> for Pokemon {
    fn from(row: PokemonRow) -> Self {
        Pokemon {
            encounter_id: row.encounter_id,
            pokemon_id: row.pokemon_id,
            latitude: row.latitude,
            longitude: row.longitude,
            disappear_time: row.disappear_time,
            individual_attack: row.individual_attack,
            individual_defense: row.individual_defense,
            individual_stamina: row.individual_stamina,
            move_1: row.move_1,
            move_2: row.move_2,
            cp: row.cp,
            height: row.height,
            weight: row.weight,
            gender: row.gender,
            form: row.form,
            last_modified: row.last_modified,
            pokemon_name: String::new(),
            pokemon_rarity: String::new(),
            pokemon_types: Vec::new(),
        }
    }
}

#[derive(Debug, Row, Deserialize)]
struct PokestopRow {
    pokestop_id: String,
    latitude: f64,
    longitude: f64,
    enabled: bool,
    last_modified: i64,
    last_updated: i64,
    active_fort_modifier: Option<String>,
    lure_expiration: Option<i64>,
}

impl From<PokestopRow> for Pokestop {
    fn from(row: PokestopRow) -> Self {
        Pokestop {
            pokestop_id: row.pokestop_id,
            latitude: row.latitude,
            longitude: row.longitude,
            enabled: row.enabled,
            last_modified: row.last_modified,
            last_updated: row.last_updated,
            active_fort_modifier: row.active_fort_modifier,
            lure_expiration: row.lure_expiration,
        }
    }
}

#[derive(Debug, Row, Deserialize)]
struct GymRow {
    gym_id: String,
    latitude: f64,
    longitude: f64,
    team_id: i32,
    gym_points: i32,
    enabled: bool,
    name: String,
    url: Option<String>,
    last_modified: i64,
    last_scanned: i64,
}

impl From<GymRow> for Gym {
    fn from(row: GymRow) -> Self {
        Gym {
            gym_id: row.gym_id,
            latitude: row.latitude,
            longitude: row.longitude,
            team_id: row.team_id,
            gym_points: row.gym_points,
            enabled: row.enabled,
            name: row.name,
            url: row.url,
            last_modified: row.last_modified,
            last_scanned: row.last_scanned,
            event: None,
            occupants: Vec::new(),
        }
    }
}

#[derive(Debug, Row, Deserialize)]
struct RaidRow {
    gym_id: String,
    level: i32,
    spawn: i64,
    start: i64,
    end: i64,
    pokemon_id: Option<i32>,
    cp: Option<i32>,
    move_1: Option<i32>,
    move_2: Option<i32>,
    last_scanned: i64,
}

impl From<RaidRow> for RaidEvent {
    fn from(row: RaidRow) -> Self {
        RaidEvent {
            gym_id: row.gym_id,
            level: row.level,
            spawn: row.spawn,
            start: row.start,
            end: row.end,
            pokemon_id: row.pokemon_id,
            cp: row.cp,
            move_1: row.move_1,
            move_2: row.move_2,
            last_scanned: row.last_scanned,
        }
    }
}

#[derive(Debug, Row, Deserialize)]
struct GymMemberRow {
    gym_id: String,
    pokemon_uid: String,
    deployed_at: i64,
    last_seen: i64,
    cp_decayed: i32,
}

impl From<GymMemberRow> for GymMember {
    fn from(row: GymMemberRow) -> Self {
        GymMember {
            gym_id: row.gym_id,
            pokemon_uid: row.pokemon_uid,
            deployed_at: row.deployed_at,
            last_seen: row.last_seen,
            cp_decayed: row.cp_decayed,
        }
    }
}

#[derive(Debug, Row, Deserialize)]
struct GymPokemonRow {
    pokemon_uid: String,
    pokemon_id: i32,
    cp: i32,
    move_1: Option<i32>,
    move_2: Option<i32>,
    iv_attack: Option<i32>,
    iv_defense: Option<i32>,
    iv_stamina: Option<i32>,
}

impl From<GymPokemonRow> for GymPokemon {
    fn from(row: GymPokemonRow) -> Self {
        GymPokemon {
            pokemon_uid: row.pokemon_uid,
            pokemon_id: row.pokemon_id,
            cp: row.cp,
            move_1: row.move_1,
            move_2: row.move_2,
            iv_attack: row.iv_attack,
            iv_defense: row.iv_defense,
            iv_stamina: row.iv_stamina,
        }
    }
}

#[async_trait]
impl PokemonRepository for ClickhouseMapRepo {
    async fn fetch_active(&self, filter: &MapFilter) -> Result<Vec<Pokemon>> {
        let query = format!("{}{}", POKEMON_SELECT, where_clause(filter, &POKEMON_COLUMNS));
        let rows = self.client.query(&query).fetch_all::<PokemonRow>().await?;
        Ok(rows.into_iter().map(Pokemon::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        ClickhouseMapRepo::ping(self).await
    }
}

#[async_trait]
impl PokestopRepository for ClickhouseMapRepo {
    async fn fetch_stops(&self, filter: &MapFilter) -> Result<Vec<Pokestop>> {
        let query = format!("{}{}", POKESTOP_SELECT, where_clause(filter, &POKESTOP_COLUMNS));
        let rows = self.client.query(&query).fetch_all::<PokestopRow>().await?;
        Ok(rows.into_iter().map(Pokestop::from).collect())
    }
}

#[async_trait]
impl GymRepository for ClickhouseMapRepo {
    async fn fetch_gyms(&self, filter: &MapFilter) -> Result<Vec<Gym>> {
        let query = format!("{}{}", GYM_SELECT, where_clause(filter, &GYM_COLUMNS));
        let rows = self.client.query(&query).fetch_all::<GymRow>().await?;
        Ok(rows.into_iter().map(Gym::from).collect())
    }

    async fn fetch_raids(&self, gym_ids: &[String]) -> Result<Vec<RaidEvent>> {
        if gym_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{} WHERE gym_id IN ({})", RAID_SELECT, join_quoted(gym_ids));
        let rows = self.client.query(&query).fetch_all::<RaidRow>().await?;
        Ok(rows.into_iter().map(RaidEvent::from).collect())
    }

    async fn fetch_members(&self, gym_ids: &[String]) -> Result<Vec<GymMember>> {
        if gym_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{} WHERE gym_id IN ({})", MEMBER_SELECT, join_quoted(gym_ids));
        let rows = self.client.query(&query).fetch_all::<GymMemberRow>().await?;
        Ok(rows.into_iter().map(GymMember::from).collect())
    }

    async fn fetch_member_details(&self, uids: &[String]) -> Result<Vec<GymPokemon>> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{} WHERE pokemon_uid IN ({})", DETAIL_SELECT, join_quoted(uids));
        let rows = self.client.query(&query).fetch_all::<GymPokemonRow>().await?;
        Ok(rows.into_iter().map(GymPokemon::from).collect())
    }
}
