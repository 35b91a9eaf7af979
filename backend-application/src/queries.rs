pub mod aggregator;
pub mod gym_queries;
pub mod map_queries;

#[cfg(test)]
pub(crate) mod testing;
