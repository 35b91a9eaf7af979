pub mod clickhouse_map;
pub mod plan;
pub mod species_file;

pub use clickhouse_map::*;
pub use species_file::*;
