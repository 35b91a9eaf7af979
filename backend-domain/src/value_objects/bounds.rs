// Viewport bounding box and the zoom/move classification

use serde::{Deserialize, Serialize};

/// Client-visible rectangle, southwest/northeast corners in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
}

impl BoundingBox {
    pub fn new(sw_lat: f64, sw_lng: f64, ne_lat: f64, ne_lng: f64) -> Self {
        Self {
            sw_lat,
            sw_lng,
            ne_lat,
            ne_lng,
        }
    }

    /// True when `other` sits strictly inside `self` on all four edges.
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        self.sw_lng < other.sw_lng
            && self.sw_lat < other.sw_lat
            && self.ne_lat > other.ne_lat
            && self.ne_lng > other.ne_lng
    }

    /// Whether moving from `previous` to this box uncovered map area
    /// the client has not seen.
    ///
    /// This is the compatibility heuristic, not a geometric set
    /// difference: zoomed in (previous strictly contains current) and
    /// identical boxes count as no new area, everything else as new
    /// area. Expanding along one axis while shrinking along another is
    /// knowingly misclassified.
    pub fn uncovers_new_area(&self, previous: Option<&BoundingBox>) -> bool {
        let Some(prev) = previous else {
            return false;
        };
        if prev.strictly_contains(self) {
            return false;
        }
        prev != self
    }
}
