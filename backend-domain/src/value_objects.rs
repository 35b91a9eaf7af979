// Domain value objects
pub mod bounds;
pub mod map_filter;

pub use bounds::*;
pub use map_filter::*;
