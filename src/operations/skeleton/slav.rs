use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Contour, Line2, Segment2};
use crate::math::{cross_2d, normalize_or_zero, points_coincide, Point2, Vector2, ANGULAR_TOLERANCE};
use crate::topology::{EdgeId, RingStore, VertexData, VertexId};

use super::event::{EdgeEvent, SkeletonEvent, SplitEvent};
use super::result::Subtree;

/// What handling one event produced: the emitted node, if any, and the
/// events that became possible because of it.
pub(crate) type EventOutcome = (Option<Subtree>, Vec<SkeletonEvent>);

/// The set of active rings of one sweep.
///
/// Owns the ring arena and performs every mutation the sweep makes to it.
#[derive(Debug)]
pub(crate) struct Slav {
    store: RingStore,
    tolerance: f64,
}

impl Slav {
    /// Builds one ring for the contour and one for each hole.
    ///
    /// # Errors
    ///
    /// Returns an error if a ring has fewer than 3 vertices.
    pub(crate) fn new(contour: &Contour, holes: &[Contour], tolerance: f64) -> Result<Self> {
        let mut store = RingStore::new();
        store.add_contour(contour)?;
        for hole in holes {
            store.add_contour(hole)?;
        }
        Ok(Self { store, tolerance })
    }

    /// Whether every ring has collapsed.
    pub(crate) fn is_empty(&self) -> bool {
        self.store.lav_count() == 0
    }

    /// Number of active vertices.
    pub(crate) fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// Active vertices, ring by ring in traversal order.
    pub(crate) fn vertex_ids(&self) -> Result<Vec<VertexId>> {
        let mut ids = Vec::with_capacity(self.store.vertex_count());
        for lav in self.store.lav_ids() {
            ids.extend(self.store.ring(lav)?);
        }
        Ok(ids)
    }

    /// The nearest event the vertex takes part in, judged by distance from
    /// the vertex position. `None` when its bisector meets nothing.
    pub(crate) fn next_event(&self, id: VertexId) -> Result<Option<SkeletonEvent>> {
        let vertex = self.store.vertex(id)?;
        let mut events = if vertex.is_reflex() {
            self.split_candidates(id, vertex)?
        } else {
            Vec::new()
        };

        let prev = self.store.vertex(vertex.prev)?;
        if let Some(point) = prev.bisector.ray.intersect_ray(&vertex.bisector.ray) {
            events.push(SkeletonEvent::Edge(EdgeEvent {
                distance: self.segment(vertex.edge_left)?.line_distance(&point),
                intersection_point: point,
                vertex_a: vertex.prev,
                vertex_b: id,
            }));
        }

        let next = self.store.vertex(vertex.next)?;
        if let Some(point) = vertex.bisector.ray.intersect_ray(&next.bisector.ray) {
            events.push(SkeletonEvent::Edge(EdgeEvent {
                distance: self.segment(vertex.edge_right)?.line_distance(&point),
                intersection_point: point,
                vertex_a: id,
                vertex_b: vertex.next,
            }));
        }

        Ok(events.into_iter().min_by(|a, b| {
            let da = (a.intersection_point() - vertex.point).norm();
            let db = (b.intersection_point() - vertex.point).norm();
            da.total_cmp(&db)
        }))
    }

    /// Split events of a reflex vertex against every original edge it is not
    /// incident to.
    ///
    /// The candidate point is equidistant from the opposite edge's line and
    /// the line of whichever own edge is less parallel to it, on the interior
    /// side of both, and on the vertex bisector.
    fn split_candidates(&self, id: VertexId, vertex: &VertexData) -> Result<Vec<SkeletonEvent>> {
        let left = self.segment(vertex.edge_left)?;
        let right = self.segment(vertex.edge_right)?;
        let mut events = Vec::new();

        for (edge_id, edge) in self.store.edges() {
            if edge_id == vertex.edge_left || edge_id == vertex.edge_right {
                continue;
            }
            let edge_dir = edge.segment.direction();
            let own = if left.direction().dot(&edge_dir).abs() < right.direction().dot(&edge_dir).abs()
            {
                left
            } else {
                right
            };

            let Some(corner) = own.to_line()?.intersect_line(&edge.segment.to_line()?) else {
                continue;
            };
            if points_coincide(&corner, &vertex.point, self.tolerance) {
                continue;
            }
            let Ok(bisector) = Line2::new(corner, left_normal(&(edge_dir + own.direction()))) else {
                continue;
            };
            let Some(point) = bisector.intersect_ray(&vertex.bisector.ray) else {
                continue;
            };
            // A vertex standing on another front is resolved by the collapse
            // that created it, not by a split of its own.
            if points_coincide(&point, &vertex.point, self.tolerance) || !edge.sweeps_point(&point) {
                continue;
            }

            events.push(SkeletonEvent::Split(SplitEvent {
                distance: edge.segment.line_distance(&point),
                intersection_point: point,
                vertex: id,
                opposite_edge: edge_id,
            }));
        }
        Ok(events)
    }

    /// Whether the vertices an event was computed from are still in place.
    ///
    /// An edge event needs both vertices alive and still adjacent; a split
    /// event needs its reflex vertex alive. Removed vertices never resolve
    /// again, so this is a couple of arena lookups.
    pub(crate) fn is_current(&self, event: &SkeletonEvent) -> bool {
        match event {
            SkeletonEvent::Edge(e) => {
                self.store.contains_vertex(e.vertex_b)
                    && matches!(self.store.vertex(e.vertex_a), Ok(a) if a.next == e.vertex_b)
            }
            SkeletonEvent::Split(s) => self.store.contains_vertex(s.vertex),
        }
    }

    /// Applies one event to the rings.
    ///
    /// An outdated event yields neither a subtree nor new events.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring links are found inconsistent.
    pub(crate) fn handle_event(&mut self, event: &SkeletonEvent) -> Result<EventOutcome> {
        if !self.is_current(event) {
            return Ok((None, Vec::new()));
        }
        match event {
            SkeletonEvent::Edge(e) => self.handle_edge_event(e),
            SkeletonEvent::Split(s) => self.handle_split_event(s),
        }
    }

    fn handle_edge_event(&mut self, event: &EdgeEvent) -> Result<EventOutcome> {
        let chain = self.collapsing_chain(
            event.vertex_a,
            event.vertex_b,
            &event.intersection_point,
            event.distance,
        )?;
        self.collapse(&chain, event.intersection_point, event.distance)
    }

    /// Whether `v` reaches `point` exactly when the front is at `height`.
    ///
    /// Every point of a vertex's bisector lies at the current height from
    /// the line of its left edge, so arrival is "on the ray" plus "at the
    /// right distance from that line".
    fn arrives_at(&self, v: &VertexData, point: &Point2, height: f64) -> Result<bool> {
        let offset = point - v.point;
        let on_ray = offset.norm() <= self.tolerance || {
            let dir = v.bisector.ray.direction();
            dir.norm() > 0.0
                && cross_2d(dir, &offset).abs() <= self.tolerance
                && dir.dot(&offset) > 0.0
        };
        if !on_ray {
            return Ok(false);
        }
        let level = self.segment(v.edge_left)?.line_distance(point);
        Ok((level - height).abs() <= self.tolerance)
    }

    /// Grows the run `first..=last` of one ring in both directions by every
    /// neighbor that reaches `point` at `height`, returning it in ring order.
    fn collapsing_chain(
        &self,
        first: VertexId,
        last: VertexId,
        point: &Point2,
        height: f64,
    ) -> Result<Vec<VertexId>> {
        let mut start = first;
        loop {
            let prev = self.store.vertex(start)?.prev;
            if prev == last || !self.arrives_at(self.store.vertex(prev)?, point, height)? {
                break;
            }
            start = prev;
        }
        let mut end = last;
        loop {
            let next = self.store.vertex(end)?.next;
            if next == start || !self.arrives_at(self.store.vertex(next)?, point, height)? {
                break;
            }
            end = next;
        }

        let mut chain = vec![start];
        let mut current = start;
        while current != end {
            current = self.store.vertex(current)?.next;
            chain.push(current);
        }
        Ok(chain)
    }

    /// Resolves every vertex of `chain` meeting at `point` as one node.
    ///
    /// When at most one other vertex of the ring remains, the whole ring
    /// collapses (a peak). Otherwise the chain is spliced out and replaced by
    /// a single vertex carrying on from `point`.
    fn collapse(&mut self, chain: &[VertexId], point: Point2, height: f64) -> Result<EventOutcome> {
        let Some(&first) = chain.first() else {
            return Ok((None, Vec::new()));
        };
        let lav = self.store.vertex(first)?.lav;
        let ring_len = self.store.lav(lav)?.len;
        let tolerance = self.tolerance;

        if ring_len <= chain.len() + 1 {
            debug!(height, x = point.x, y = point.y, vertices = ring_len, "peak event, ring collapses");
            let collapsed = self.store.dissolve(lav)?;
            let sinks = collapsed
                .iter()
                .map(|v| v.point)
                .filter(|p| !points_coincide(p, &point, tolerance))
                .collect();
            let edges = collapsed
                .iter()
                .map(|v| self.segment(v.edge_left))
                .collect::<Result<Vec<_>>>()?;
            return Ok((Some(Subtree::new(point, height, sinks, edges)), Vec::new()));
        }

        debug!(height, x = point.x, y = point.y, vertices = chain.len(), "edge event");
        let merged = chain
            .iter()
            .map(|&id| self.store.vertex(id).cloned())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let replacement = self.store.unify(chain, point)?;

        let sinks = merged
            .iter()
            .map(|v| v.point)
            .filter(|p| !points_coincide(p, &point, tolerance))
            .collect();
        let mut edges = merged
            .iter()
            .map(|v| self.segment(v.edge_left))
            .collect::<Result<Vec<_>>>()?;
        if let Some(v) = merged.last() {
            edges.push(self.segment(v.edge_right)?);
        }
        let events = self.next_event(replacement)?.into_iter().collect();
        Ok((Some(Subtree::new(point, height, sinks, edges)), events))
    }

    fn handle_split_event(&mut self, event: &SplitEvent) -> Result<EventOutcome> {
        let point = event.intersection_point;
        let chain = self.collapsing_chain(event.vertex, event.vertex, &point, event.distance)?;
        if chain.len() > 1 {
            // A neighbor arrives at the same moment: the edge between them
            // vanishes there, so this is a collapse rather than a split.
            return self.collapse(&chain, point, event.distance);
        }
        let vertex = self.store.vertex(event.vertex)?.clone();

        let Some((x, y)) = self.find_opposite(event.opposite_edge, &point)? else {
            debug!(
                height = event.distance,
                x = point.x,
                y = point.y,
                "split event lost its opposite edge"
            );
            return Ok((None, Vec::new()));
        };
        debug!(height = event.distance, x = point.x, y = point.y, "split event");

        let x_lav = self.store.vertex(x)?.lav;
        let v1 = self.store.insert_vertex(
            point,
            vertex.edge_left,
            event.opposite_edge,
            None,
            vertex.lav,
        )?;
        let v2 = self.store.insert_vertex(
            point,
            event.opposite_edge,
            vertex.edge_right,
            None,
            vertex.lav,
        )?;
        self.store.link(vertex.prev, v1)?;
        self.store.link(v1, x)?;
        self.store.link(y, v2)?;
        self.store.link(v2, vertex.next)?;

        self.store.remove_lav(vertex.lav)?;
        if x_lav != vertex.lav {
            self.store.remove_lav(x_lav)?;
        }
        self.store.remove_vertex(event.vertex)?;

        // Same ring: it splits in two. Different rings: they merge into one.
        let heads = if x_lav == vertex.lav {
            vec![v1, v2]
        } else {
            vec![v1]
        };
        let mut sinks = vec![vertex.point];
        for head in heads {
            let lav = self.store.from_chain(head)?;
            if self.store.lav(lav)?.len <= 2 {
                let collapsed = self.store.dissolve(lav)?;
                sinks.extend(collapsed.iter().skip(1).map(|v| v.point));
            }
        }

        let mut events = Vec::new();
        for id in [v1, v2, x, y] {
            if self.store.contains_vertex(id) {
                events.extend(self.next_event(id)?);
            }
        }

        let edges = vec![
            self.segment(vertex.edge_left)?,
            self.segment(vertex.edge_right)?,
            self.segment(event.opposite_edge)?,
        ];
        Ok((Some(Subtree::new(point, event.distance, sinks, edges)), events))
    }

    /// Finds the adjacent pair `(x, y)`, `y.next == x`, that currently bounds
    /// the part of `edge` in front of `point`.
    fn find_opposite(&self, edge: EdgeId, point: &Point2) -> Result<Option<(VertexId, VertexId)>> {
        for lav in self.store.lav_ids() {
            for id in self.store.ring(lav)? {
                let v = self.store.vertex(id)?;
                let (x, y) = if v.edge_left == edge {
                    (id, v.prev)
                } else if v.edge_right == edge {
                    (v.next, id)
                } else {
                    continue;
                };

                let xd = self.store.vertex(x)?;
                let yd = self.store.vertex(y)?;
                let after_y = cross_2d(
                    yd.bisector.ray.direction(),
                    &normalize_or_zero(&(point - yd.point)),
                ) <= ANGULAR_TOLERANCE;
                let before_x = cross_2d(
                    xd.bisector.ray.direction(),
                    &normalize_or_zero(&(point - xd.point)),
                ) >= -ANGULAR_TOLERANCE;
                if after_y && before_x {
                    return Ok(Some((x, y)));
                }
            }
        }
        Ok(None)
    }

    fn segment(&self, id: EdgeId) -> Result<Segment2> {
        Ok(self.store.edge(id)?.segment)
    }
}

/// `v` rotated a quarter turn counter-clockwise.
fn left_normal(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

impl fmt::Display for Slav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lav in self.store.lav_ids() {
            let ring = match self.store.ring(lav) {
                Ok(ring) => ring,
                Err(err) => {
                    writeln!(f, "<{err}>")?;
                    continue;
                }
            };
            write!(f, "[")?;
            for (i, id) in ring.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                if let Ok(v) = self.store.vertex(*id) {
                    write!(f, "({:.4}, {:.4})", v.point.x, v.point.y)?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
