use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::event::SkeletonEvent;

/// Min-priority queue of pending events keyed by height.
///
/// Events at exactly the same height come out in insertion order, which
/// keeps the sweep reproducible.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<QueuedEvent>>,
    next_seq: u64,
}

#[derive(Debug)]
struct QueuedEvent {
    distance: OrderedFloat<f64>,
    seq: u64,
    event: SkeletonEvent,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one event.
    pub fn enqueue(&mut self, event: SkeletonEvent) {
        let queued = QueuedEvent {
            distance: OrderedFloat(event.distance()),
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(queued));
    }

    /// Adds every event of `events`, in order.
    pub fn enqueue_all(&mut self, events: impl IntoIterator<Item = SkeletonEvent>) {
        for event in events {
            self.enqueue(event);
        }
    }

    /// Removes and returns the lowest event.
    pub fn dequeue(&mut self) -> Option<SkeletonEvent> {
        self.heap.pop().map(|Reverse(queued)| queued.event)
    }

    /// Height of the lowest pending event.
    #[must_use]
    pub fn peek_distance(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(queued)| queued.distance.0)
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::skeleton::event::EdgeEvent;
    use crate::topology::VertexId;

    fn edge_event(distance: f64, x: f64) -> SkeletonEvent {
        SkeletonEvent::Edge(EdgeEvent {
            distance,
            intersection_point: Point2::new(x, 0.0),
            vertex_a: VertexId::default(),
            vertex_b: VertexId::default(),
        })
    }

    #[test]
    fn dequeues_by_ascending_distance() {
        let mut queue = EventQueue::new();
        queue.enqueue_all([edge_event(3.0, 0.0), edge_event(1.0, 0.0), edge_event(2.0, 0.0)]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek_distance(), Some(1.0));
        let order: Vec<f64> = std::iter::from_fn(|| queue.dequeue())
            .map(|e| e.distance())
            .collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut queue = EventQueue::new();
        for x in [5.0, 1.0, 3.0] {
            queue.enqueue(edge_event(2.0, x));
        }
        let xs: Vec<f64> = std::iter::from_fn(|| queue.dequeue())
            .map(|e| e.intersection_point().x)
            .collect();
        assert_eq!(xs, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let mut queue = EventQueue::new();
        assert!(queue.dequeue().is_none());
        assert!(queue.peek_distance().is_none());
    }
}
