use crate::geometry::{Contour, Segment2};
use crate::math::{points_coincide, Point2};

/// One node of the skeleton together with the lower points feeding into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    /// The skeleton node.
    pub source: Point2,
    /// Height of the node above the base plane.
    pub height: f64,
    /// Lower points connected to the source.
    pub sinks: Vec<Point2>,
    /// Original polygon edges whose faces meet at the source.
    pub edges: Vec<Segment2>,
}

impl Subtree {
    /// Creates a new subtree.
    #[must_use]
    pub fn new(source: Point2, height: f64, sinks: Vec<Point2>, edges: Vec<Segment2>) -> Self {
        Self {
            source,
            height,
            sinks,
            edges,
        }
    }

    /// The skeleton arcs of this node, from the source down to each sink.
    pub fn ridges(&self) -> impl Iterator<Item = Segment2> + '_ {
        self.sinks
            .iter()
            .map(move |sink| Segment2::new(self.source, *sink))
    }
}

/// The straight skeleton of a polygon with holes.
#[derive(Debug, Clone)]
pub struct StraightSkeleton {
    contour: Contour,
    holes: Vec<Contour>,
    subtrees: Vec<Subtree>,
}

impl StraightSkeleton {
    /// Bundles the input rings with the computed subtrees.
    #[must_use]
    pub fn new(contour: Contour, holes: Vec<Contour>, subtrees: Vec<Subtree>) -> Self {
        Self {
            contour,
            holes,
            subtrees,
        }
    }

    /// The outer contour the skeleton was computed for.
    #[must_use]
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    /// The holes the skeleton was computed for.
    #[must_use]
    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    /// Subtrees in the order they were emitted (ascending height).
    #[must_use]
    pub fn subtrees(&self) -> &[Subtree] {
        &self.subtrees
    }

    /// Consumes the skeleton, returning its subtrees.
    #[must_use]
    pub fn into_subtrees(self) -> Vec<Subtree> {
        self.subtrees
    }

    /// Number of subtrees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subtrees.len()
    }

    /// Whether no subtree was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subtrees.is_empty()
    }

    /// Height of the highest node, `None` for an empty skeleton.
    #[must_use]
    pub fn max_height(&self) -> Option<f64> {
        self.subtrees.iter().map(|s| s.height).reduce(f64::max)
    }

    /// Every skeleton arc, source to sink.
    #[must_use]
    pub fn ridges(&self) -> Vec<Segment2> {
        self.subtrees.iter().flat_map(Subtree::ridges).collect()
    }
}

/// Merges subtrees whose sources coincide into the earliest of them.
///
/// Symmetric shapes collapse several ring parts onto one point at the same
/// height; each collapse is handled as its own event, so the node shows up
/// once per event. Sinks lying on the merged source are dropped.
pub(crate) fn merge_sources(subtrees: &mut Vec<Subtree>, tolerance: f64) {
    let mut merged: Vec<Subtree> = Vec::with_capacity(subtrees.len());
    for subtree in subtrees.drain(..) {
        let target = merged
            .iter()
            .position(|m| points_coincide(&m.source, &subtree.source, tolerance));
        match target {
            Some(i) => absorb(&mut merged[i], subtree, tolerance),
            None => {
                let mut fresh = Subtree::new(subtree.source, subtree.height, Vec::new(), Vec::new());
                absorb(&mut fresh, subtree, tolerance);
                merged.push(fresh);
            }
        }
    }
    *subtrees = merged;
}

fn absorb(target: &mut Subtree, other: Subtree, tolerance: f64) {
    for sink in other.sinks {
        let redundant = points_coincide(&sink, &target.source, tolerance)
            || target
                .sinks
                .iter()
                .any(|s| points_coincide(s, &sink, tolerance));
        if !redundant {
            target.sinks.push(sink);
        }
    }
    for edge in other.edges {
        if !target.edges.contains(&edge) {
            target.edges.push(edge);
        }
    }
}
