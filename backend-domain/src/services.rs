// Pure domain services
pub mod species;

pub use species::*;
