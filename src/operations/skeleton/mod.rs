mod event;
mod queue;
mod result;
mod slav;
mod validate;

pub use event::{EdgeEvent, SkeletonEvent, SplitEvent};
pub use queue::EventQueue;
pub use result::{StraightSkeleton, Subtree};

use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::geometry::Contour;
use crate::math::Point2;

use result::merge_sources;
use slav::Slav;
use validate::{check_ring_sizes, validate_rings};

/// Parameters for straight skeleton computation.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonOptions {
    /// Reject malformed rings before the sweep starts.
    pub validate_input: bool,
    /// Merge subtrees whose sources coincide into one node.
    pub merge_coincident_sources: bool,
    /// Distance below which two points are the same point.
    pub tolerance: f64,
    /// Bound on sweep iterations, per input vertex.
    pub max_events_per_vertex: usize,
    /// Log the active rings and every discarded event while sweeping.
    pub trace_sweep: bool,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            validate_input: true,
            merge_coincident_sources: true,
            tolerance: 1e-8,
            max_events_per_vertex: 32,
            trace_sweep: false,
        }
    }
}

/// Computes the straight skeleton of a polygon with holes.
///
/// The outer contour must be counter-clockwise and every hole clockwise.
#[derive(Debug, Clone)]
pub struct Skeletonize {
    contour: Contour,
    holes: Vec<Contour>,
    options: SkeletonOptions,
}

impl Skeletonize {
    /// Creates a new `Skeletonize` operation for a polygon without holes.
    #[must_use]
    pub fn new(contour: Contour) -> Self {
        Self {
            contour,
            holes: Vec::new(),
            options: SkeletonOptions::default(),
        }
    }

    /// Sets the holes of the polygon.
    #[must_use]
    pub fn with_holes(mut self, holes: Vec<Contour>) -> Self {
        self.holes = holes;
        self
    }

    /// Sets the computation options.
    #[must_use]
    pub fn with_options(mut self, options: SkeletonOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for malformed rings, `OperationError::InvalidInput`
    /// for a non-positive tolerance and `OperationError::IterationLimit` if
    /// the sweep does not settle.
    pub fn execute(&self) -> Result<StraightSkeleton> {
        let options = &self.options;
        if !options.tolerance.is_finite() || options.tolerance <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "tolerance must be positive and finite, got {}",
                options.tolerance
            ))
            .into());
        }
        if options.validate_input {
            validate_rings(&self.contour, &self.holes)?;
        } else {
            check_ring_sizes(&self.contour, &self.holes)?;
        }

        let mut slav = Slav::new(&self.contour, &self.holes, options.tolerance)?;
        let mut queue = EventQueue::new();
        for id in slav.vertex_ids()? {
            queue.enqueue_all(slav.next_event(id)?);
        }
        let limit = options
            .max_events_per_vertex
            .saturating_mul(slav.vertex_count())
            .saturating_add(64);
        debug!(
            vertices = slav.vertex_count(),
            events = queue.len(),
            "skeleton sweep started"
        );

        let mut output = Vec::new();
        let mut iterations = 0usize;
        while !slav.is_empty() {
            iterations += 1;
            if iterations > limit {
                return Err(OperationError::IterationLimit { iterations: limit }.into());
            }
            if options.trace_sweep {
                debug!(
                    pending = queue.len(),
                    next = ?queue.peek_distance(),
                    "active rings:\n{slav}"
                );
            }

            let Some(event) = queue.dequeue() else {
                break;
            };
            if !slav.is_current(&event) {
                if options.trace_sweep {
                    debug!("discarded {event}");
                }
                continue;
            }

            let (subtree, events) = slav.handle_event(&event)?;
            queue.enqueue_all(events);
            output.extend(subtree);
        }

        if !slav.is_empty() {
            warn!(
                remaining = slav.vertex_count(),
                "event queue ran dry before every ring collapsed"
            );
        }
        if options.merge_coincident_sources {
            merge_sources(&mut output, options.tolerance);
        }
        debug!(subtrees = output.len(), iterations, "skeleton sweep finished");

        Ok(StraightSkeleton::new(
            self.contour.clone(),
            self.holes.clone(),
            output,
        ))
    }
}

/// Computes the straight skeleton of a counter-clockwise polygon with
/// clockwise holes, using default options.
///
/// # Errors
///
/// See [`Skeletonize::execute`].
pub fn skeletonize(polygon: &[Point2], holes: &[Vec<Point2>]) -> Result<StraightSkeleton> {
    skeletonize_contour(
        Contour::new(polygon.iter().copied()),
        holes
            .iter()
            .map(|hole| Contour::new(hole.iter().copied()))
            .collect(),
    )
}

/// Same as [`skeletonize`], for rings already converted to contours.
///
/// # Errors
///
/// See [`Skeletonize::execute`].
pub fn skeletonize_contour(contour: Contour, holes: Vec<Contour>) -> Result<StraightSkeleton> {
    Skeletonize::new(contour).with_holes(holes).execute()
}
