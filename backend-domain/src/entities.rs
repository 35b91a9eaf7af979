// Map entities served by the raw-data endpoint
pub mod gym;
pub mod model;
pub mod pokemon;
pub mod pokestop;
pub mod species;

pub use gym::*;
pub use model::*;
pub use pokemon::*;
pub use pokestop::*;
pub use species::*;
