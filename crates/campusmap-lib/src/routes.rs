//! Route derivation over the current location set.
//!
//! "Routes" here are not a navigable path network: the product draws a
//! straight line between every pair of known locations, so derivation
//! produces the complete graph over the set. Quadratic fan-out is the
//! intended behavior for the tens of locations a campus holds; a sparser
//! graph would change what the map renders.

use serde::Serialize;

use crate::model::{LocationId, LocationRecord, Position};

/// Straight-line segment between two positions, used purely for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

impl Segment {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// One derived connection between two distinct locations.
///
/// Edges have no independent lifecycle: the whole set is recomputed from
/// the location set on every change, and `id` is only stable within one
/// derivation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEdge {
    pub id: u32,
    pub from: LocationId,
    pub to: LocationId,
    pub path: Segment,
}

impl RouteEdge {
    /// Whether this edge connects the two given locations, in either order.
    pub fn connects(&self, a: &LocationId, b: &LocationId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// Derive the complete route graph for the given locations.
///
/// For every unordered pair `(i, j)` with `i < j` in iteration order one
/// edge is emitted, `from` taken from the earlier record. Identifiers are
/// assigned sequentially from 1 in visit order (outer index ascending,
/// inner ascending); callers must not rely on them across derivation calls
/// with reordered input.
pub fn derive_routes(locations: &[LocationRecord]) -> Vec<RouteEdge> {
    let mut edges = Vec::with_capacity(locations.len() * locations.len().saturating_sub(1) / 2);
    for (i, from) in locations.iter().enumerate() {
        for to in &locations[i + 1..] {
            edges.push(RouteEdge {
                id: edges.len() as u32 + 1,
                from: from.id.clone(),
                to: to.id.clone(),
                path: Segment::new(from.position, to.position),
            });
        }
    }
    edges
}
