pub mod edge;
pub mod lav;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use lav::{LavData, LavId};
pub use vertex::{Bisector, VertexData, VertexId};

use crate::error::TopologyError;
use crate::geometry::{Contour, Segment2};
use crate::math::{Point2, Vector2};
use slotmap::SlotMap;

/// Central arena that owns the rings of a sweep.
///
/// Vertices, rings and original edges reference each other via typed IDs
/// (generational indices), so the circular prev/next links never form
/// ownership cycles and splicing stays O(1).
#[derive(Debug, Default)]
pub struct RingStore {
    vertices: SlotMap<VertexId, VertexData>,
    lavs: SlotMap<LavId, LavData>,
    edges: SlotMap<EdgeId, EdgeData>,
}

impl RingStore {
    /// Creates a new, empty ring store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex has been removed.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex has been removed.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Whether the vertex is still active.
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(id)
    }

    /// Number of active vertices over all rings.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Creates an unlinked vertex whose bisector is derived from its two edges.
    ///
    /// # Errors
    ///
    /// Returns an error if either edge is unknown.
    pub fn insert_vertex(
        &mut self,
        point: Point2,
        edge_left: EdgeId,
        edge_right: EdgeId,
        orientation: Option<(Vector2, Vector2)>,
        lav: LavId,
    ) -> Result<VertexId, TopologyError> {
        let bisector = Bisector::new(
            point,
            &self.edge(edge_left)?.segment,
            &self.edge(edge_right)?.segment,
            orientation,
        );
        Ok(self
            .vertices
            .insert(VertexData::new(point, edge_left, edge_right, bisector, lav)))
    }

    /// Makes `next` follow `prev` in their ring.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is unknown.
    pub fn link(&mut self, prev: VertexId, next: VertexId) -> Result<(), TopologyError> {
        self.vertex_mut(prev)?.next = next;
        self.vertex_mut(next)?.prev = prev;
        Ok(())
    }

    /// Removes a vertex from the arena without touching its neighbors' links.
    ///
    /// If it was the entry point of a still registered ring, the entry point
    /// moves to its successor.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex was already removed.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<VertexData, TopologyError> {
        let data = self
            .vertices
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))?;
        if let Some(lav) = self.lavs.get_mut(data.lav) {
            if lav.head == id {
                lav.head = data.next;
            }
        }
        Ok(data)
    }

    // --- Edge operations ---

    /// Returns a reference to the original edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is unknown.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates all original edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- LAV operations ---

    /// Returns a reference to the ring data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring has been removed.
    pub fn lav(&self, id: LavId) -> Result<&LavData, TopologyError> {
        self.lavs
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("lav".into()))
    }

    /// Returns a mutable reference to the ring data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring has been removed.
    pub fn lav_mut(&mut self, id: LavId) -> Result<&mut LavData, TopologyError> {
        self.lavs
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("lav".into()))
    }

    /// IDs of all registered rings.
    #[must_use]
    pub fn lav_ids(&self) -> Vec<LavId> {
        self.lavs.keys().collect()
    }

    /// Number of registered rings.
    #[must_use]
    pub fn lav_count(&self) -> usize {
        self.lavs.len()
    }

    /// Unregisters a ring record, leaving its vertices in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring was already removed.
    pub fn remove_lav(&mut self, id: LavId) -> Result<LavData, TopologyError> {
        self.lavs
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("lav".into()))
    }

    /// Vertices of a ring in traversal order, starting at its head.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring is unknown or its links are broken.
    pub fn ring(&self, id: LavId) -> Result<Vec<VertexId>, TopologyError> {
        self.walk(self.lav(id)?.head)
    }

    /// Follows `next` links from `head` until the ring closes.
    fn walk(&self, head: VertexId) -> Result<Vec<VertexId>, TopologyError> {
        let mut ids = vec![head];
        let mut current = self.vertex(head)?.next;
        while current != head {
            if ids.len() > self.vertices.len() {
                return Err(TopologyError::InvalidTopology(
                    "ring links do not close".into(),
                ));
            }
            ids.push(current);
            current = self.vertex(current)?.next;
        }
        Ok(ids)
    }

    /// Builds a new ring, its vertices and its original edges from a contour.
    ///
    /// Edge `i` runs from point `i` to point `i + 1`; vertex `i` has edge
    /// `i - 1` on its left and edge `i` on its right.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour has fewer than 3 vertices.
    pub fn add_contour(&mut self, contour: &Contour) -> Result<LavId, TopologyError> {
        let points = contour.points();
        let n = points.len();
        if n < 3 {
            return Err(TopologyError::InvalidTopology(format!(
                "a ring needs at least 3 vertices, got {n}"
            )));
        }

        let segments: Vec<Segment2> = contour.segments().collect();
        let bisectors: Vec<Bisector> = (0..n)
            .map(|i| Bisector::new(points[i], &segments[(i + n - 1) % n], &segments[i], None))
            .collect();

        let edge_ids: Vec<EdgeId> = (0..n)
            .map(|i| {
                self.edges.insert(EdgeData {
                    segment: segments[i],
                    bisector_left: bisectors[i].ray,
                    bisector_right: bisectors[(i + 1) % n].ray,
                })
            })
            .collect();

        let lav = self.lavs.insert(LavData {
            head: VertexId::default(),
            len: n,
        });
        let vertex_ids: Vec<VertexId> = (0..n)
            .map(|i| {
                self.vertices.insert(VertexData::new(
                    points[i],
                    edge_ids[(i + n - 1) % n],
                    edge_ids[i],
                    bisectors[i],
                    lav,
                ))
            })
            .collect();
        for i in 0..n {
            self.link(vertex_ids[i], vertex_ids[(i + 1) % n])?;
        }
        self.lav_mut(lav)?.head = vertex_ids[0];
        Ok(lav)
    }

    /// Registers the ring reachable from `head` as a new LAV and claims all
    /// of its vertices for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the links starting at `head` do not form a ring.
    pub fn from_chain(&mut self, head: VertexId) -> Result<LavId, TopologyError> {
        let ids = self.walk(head)?;
        let lav = self.lavs.insert(LavData {
            head,
            len: ids.len(),
        });
        for id in ids {
            self.vertex_mut(id)?.lav = lav;
        }
        Ok(lav)
    }

    /// Replaces a run of consecutive vertices (`chain[i].next == chain[i + 1]`)
    /// with a single vertex at `point`, keeping the left edge of the first and
    /// the right edge of the last.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain is empty or a vertex or their ring is
    /// unknown.
    pub fn unify(&mut self, chain: &[VertexId], point: Point2) -> Result<VertexId, TopologyError> {
        let (Some(&first), Some(&last)) = (chain.first(), chain.last()) else {
            return Err(TopologyError::InvalidTopology("empty chain".into()));
        };
        let va = self.vertex(first)?.clone();
        let vb = self.vertex(last)?.clone();

        let orientation = (*vb.bisector.ray.direction(), *va.bisector.ray.direction());
        let replacement =
            self.insert_vertex(point, va.edge_left, vb.edge_right, Some(orientation), va.lav)?;

        self.link(va.prev, replacement)?;
        self.link(replacement, vb.next)?;

        let lav = self.lav_mut(va.lav)?;
        if chain.contains(&lav.head) {
            lav.head = replacement;
        }
        lav.len = lav.len.saturating_sub(chain.len() - 1);

        for &id in chain {
            self.remove_vertex(id)?;
        }
        Ok(replacement)
    }

    /// Removes a ring together with all of its vertices, returning their data
    /// in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring is unknown or its links are broken.
    pub fn dissolve(&mut self, id: LavId) -> Result<Vec<VertexData>, TopologyError> {
        let ids = self.ring(id)?;
        self.remove_lav(id)?;
        ids.into_iter().map(|v| self.remove_vertex(v)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn square() -> Contour {
        Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn contour_becomes_closed_ring() {
        let mut store = RingStore::new();
        let lav = store.add_contour(&square()).unwrap();
        let ring = store.ring(lav).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(store.lav(lav).unwrap().len, 4);
        assert_eq!(store.edges().count(), 4);
        for (i, &id) in ring.iter().enumerate() {
            let v = store.vertex(id).unwrap();
            assert_eq!(v.next, ring[(i + 1) % 4]);
            assert_eq!(v.prev, ring[(i + 3) % 4]);
            assert_eq!(v.lav, lav);
            assert!(!v.is_reflex());
            // Neighbors share the edge between them.
            assert_eq!(v.edge_right, store.vertex(v.next).unwrap().edge_left);
        }
    }

    #[test]
    fn edges_carry_endpoint_bisectors() {
        let mut store = RingStore::new();
        let lav = store.add_contour(&square()).unwrap();
        let first = store.vertex(store.lav(lav).unwrap().head).unwrap().clone();
        let edge = store.edge(first.edge_right).unwrap();
        assert_eq!(edge.bisector_left, first.bisector.ray);
        assert_eq!(
            edge.bisector_right,
            store.vertex(first.next).unwrap().bisector.ray
        );
    }

    #[test]
    fn too_small_contour_is_rejected() {
        let mut store = RingStore::new();
        let line = Contour::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(store.add_contour(&line).is_err());
    }

    #[test]
    fn unify_splices_replacement() {
        let mut store = RingStore::new();
        let lav = store.add_contour(&square()).unwrap();
        let ring = store.ring(lav).unwrap();
        let (a, b) = (ring[0], ring[1]);
        let replacement = store.unify(&[a, b], Point2::new(1.0, 1.0)).unwrap();

        assert!(!store.contains_vertex(a));
        assert!(!store.contains_vertex(b));
        assert_eq!(store.lav(lav).unwrap().len, 3);
        assert_eq!(store.lav(lav).unwrap().head, replacement);

        let after = store.ring(lav).unwrap();
        assert_eq!(after, vec![replacement, ring[2], ring[3]]);
        let r = store.vertex(replacement).unwrap();
        assert!(!r.is_reflex());
        // Left and right edges are the square's two vertical sides.
        let dir = r.bisector.ray.direction();
        assert!(dir.x.abs() < TOLERANCE);
        assert!((dir.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn unify_longer_chain() {
        let mut store = RingStore::new();
        let hexagon = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(-1.0, 1.0),
        ]);
        let lav = store.add_contour(&hexagon).unwrap();
        let ring = store.ring(lav).unwrap();
        let replacement = store
            .unify(&ring[1..4], Point2::new(1.5, 1.0))
            .unwrap();

        assert_eq!(store.vertex_count(), 4);
        assert_eq!(store.lav(lav).unwrap().len, 4);
        assert_eq!(store.ring(lav).unwrap(), vec![ring[0], replacement, ring[4], ring[5]]);
        let r = store.vertex(replacement).unwrap();
        assert_eq!(r.edge_left, store.vertex(ring[0]).unwrap().edge_right);
        assert_eq!(r.edge_right, store.vertex(ring[4]).unwrap().edge_left);
        assert!(store.unify(&[], Point2::origin()).is_err());
    }

    #[test]
    fn from_chain_claims_vertices() {
        let mut store = RingStore::new();
        let lav = store.add_contour(&square()).unwrap();
        let ring = store.ring(lav).unwrap();
        store.remove_lav(lav).unwrap();
        let relabelled = store.from_chain(ring[2]).unwrap();
        assert_eq!(store.lav(relabelled).unwrap().len, 4);
        assert_eq!(store.ring(relabelled).unwrap()[0], ring[2]);
        for id in ring {
            assert_eq!(store.vertex(id).unwrap().lav, relabelled);
        }
    }

    #[test]
    fn dissolve_removes_everything() {
        let mut store = RingStore::new();
        let lav = store.add_contour(&square()).unwrap();
        let removed = store.dissolve(lav).unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(removed[0].point, Point2::new(0.0, 0.0));
        assert_eq!(store.vertex_count(), 0);
        assert_eq!(store.lav_count(), 0);
        // Original edges outlive the rings.
        assert_eq!(store.edges().count(), 4);
    }
}
