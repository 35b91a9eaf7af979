// The shared filter description consumed by the query planner

use crate::value_objects::bounds::BoundingBox;

/// One strongly-typed fetch plan for any map entity table. The planner
/// turns this into a bounded WHERE clause; every per-entity fetch in
/// the merge protocol is expressed as one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFilter {
    /// Required viewport, inclusive on all edges.
    pub bounds: BoundingBox,
    /// Previously-sent viewport; rows strictly inside it are dropped.
    pub exclusion: Option<BoundingBox>,
    /// Strict modified-since cutoff, epoch milliseconds.
    pub updated_after: Option<i64>,
    /// Species whitelist. When non-empty it takes precedence and the
    /// blacklist is ignored.
    pub whitelist: Vec<i32>,
    /// Species blacklist, applied only when the whitelist is empty.
    pub blacklist: Vec<i32>,
    /// Restrict stops to rows with active lure metadata.
    pub lured_only: bool,
    /// Hard row cap applied after all filters.
    pub limit: u64,
}

impl MapFilter {
    pub fn within(bounds: BoundingBox, limit: u64) -> Self {
        Self {
            bounds,
            exclusion: None,
            updated_after: None,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            lured_only: false,
            limit,
        }
    }

    pub fn updated_after(mut self, cutoff: Option<i64>) -> Self {
        self.updated_after = cutoff;
        self
    }

    pub fn exclude_area(mut self, old_bounds: BoundingBox) -> Self {
        self.exclusion = Some(old_bounds);
        self
    }

    pub fn whitelist(mut self, ids: Vec<i32>) -> Self {
        self.whitelist = ids;
        self
    }

    pub fn blacklist(mut self, ids: Vec<i32>) -> Self {
        self.blacklist = ids;
        self
    }

    pub fn lured_only(mut self, lured: bool) -> Self {
        self.lured_only = lured;
        self
    }
}
