use std::fmt;

use crate::math::Point2;
use crate::topology::{EdgeId, VertexId};

/// Two adjacent vertices of one ring meet, collapsing the edge between them.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeEvent {
    /// Height at which the vertices meet.
    pub distance: f64,
    /// Where they meet.
    pub intersection_point: Point2,
    /// The earlier vertex in ring order.
    pub vertex_a: VertexId,
    /// The later vertex in ring order, `vertex_a.next`.
    pub vertex_b: VertexId,
}

/// A reflex vertex runs into an edge on the far side of the front,
/// splitting its ring in two (or merging two rings into one).
#[derive(Debug, Clone, PartialEq)]
pub struct SplitEvent {
    /// Height at which the vertex reaches the edge.
    pub distance: f64,
    /// Where it reaches the edge.
    pub intersection_point: Point2,
    /// The reflex vertex.
    pub vertex: VertexId,
    /// The original edge being hit.
    pub opposite_edge: EdgeId,
}

/// A candidate event of the shrinking front.
#[derive(Debug, Clone, PartialEq)]
pub enum SkeletonEvent {
    /// Edge collapse.
    Edge(EdgeEvent),
    /// Split by a reflex vertex.
    Split(SplitEvent),
}

impl SkeletonEvent {
    /// Height of the front when the event happens.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self {
            Self::Edge(e) => e.distance,
            Self::Split(s) => s.distance,
        }
    }

    /// Location of the event.
    #[must_use]
    pub fn intersection_point(&self) -> &Point2 {
        match self {
            Self::Edge(e) => &e.intersection_point,
            Self::Split(s) => &s.intersection_point,
        }
    }
}

impl fmt::Display for SkeletonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.intersection_point();
        match self {
            Self::Edge(e) => write!(
                f,
                "edge event at ({:.4}, {:.4}) h={:.4} between {:?} and {:?}",
                p.x, p.y, e.distance, e.vertex_a, e.vertex_b
            ),
            Self::Split(s) => write!(
                f,
                "split event at ({:.4}, {:.4}) h={:.4} from {:?} against {:?}",
                p.x, p.y, s.distance, s.vertex, s.opposite_edge
            ),
        }
    }
}
