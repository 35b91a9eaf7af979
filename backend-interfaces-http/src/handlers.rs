pub mod map_handlers;
pub mod ops_handlers;

pub use map_handlers::*;
pub use ops_handlers::*;
