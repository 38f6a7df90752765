use std::fmt;

use thiserror::Error;

/// Top-level error type for roofline.
#[derive(Debug, Error)]
pub enum RooflineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Identifies one input ring in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    /// The outer contour.
    Outer,
    /// The hole at the given index.
    Hole(usize),
}

impl fmt::Display for RingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outer => write!(f, "outer contour"),
            Self::Hole(i) => write!(f, "hole {i}"),
        }
    }
}

/// Errors raised while validating polygon input, before the sweep starts.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{ring} has {count} distinct vertices, at least 3 are required")]
    TooFewVertices { ring: RingKind, count: usize },

    #[error("{ring} contains a non-finite coordinate")]
    NonFinite { ring: RingKind },

    #[error("{ring} has the wrong orientation (expected {expected})")]
    WrongOrientation {
        ring: RingKind,
        expected: &'static str,
    },

    #[error("{ring} intersects itself")]
    SelfIntersecting { ring: RingKind },

    #[error("{first} intersects {second}")]
    RingsIntersect { first: RingKind, second: RingKind },

    #[error("hole {hole} lies outside the outer contour")]
    HoleOutsideContour { hole: usize },

    #[error("hole {inner} lies inside hole {outer}")]
    NestedHoles { outer: usize, inner: usize },
}

/// Errors related to the ring arena.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to skeleton operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("sweep did not terminate within {iterations} iterations")]
    IterationLimit { iterations: usize },
}

/// Convenience type alias for results using [`RooflineError`].
pub type Result<T> = std::result::Result<T, RooflineError>;
