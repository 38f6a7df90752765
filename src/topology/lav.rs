use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a list of active vertices (one shrinking ring).
    pub struct LavId;
}

/// Data associated with a LAV: a circular doubly-linked ring of vertices.
///
/// The links themselves live on the vertices; the LAV only records an entry
/// point and the ring length.
#[derive(Debug, Clone)]
pub struct LavData {
    /// Any vertex of the ring, used as the start of traversals.
    pub head: VertexId,
    /// Number of vertices in the ring.
    pub len: usize,
}
