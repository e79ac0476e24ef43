use std::{error, fmt};

use super::{EdgeId, VertexId};
use crate::overlap::EdgeDesc;

pub type GraphResult<T> = Result<T, GraphError>;

/// Violations of the graph's structural invariants. None of these
/// can be recovered from locally; they point at a bug in the caller
/// or a corrupted graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A vertex with this name already exists.
    DuplicateVertex(String),
    /// The vertex ID does not belong to this graph.
    UnknownVertex(VertexId),
    /// The edge ID does not refer to a live edge.
    UnknownEdge(EdgeId),
    /// An edge with the same descriptor already starts at the vertex.
    DuplicateEdge(VertexId, EdgeDesc),
    /// An overlap's coordinates don't fit the sequences it joins.
    CoordinateOutOfRange(VertexId),
    /// An overlap joins a vertex to itself.
    SelfOverlap(VertexId),
    /// The edge given for excision doesn't start at the vertex being
    /// remodeled.
    EdgeNotIncident(EdgeId, VertexId),
    /// A newly created edge doesn't have the descriptor it was
    /// inferred with.
    DescriptorMismatch { expected: EdgeDesc, found: EdgeDesc },
    /// An edge's twin is missing or doesn't point back to it.
    BrokenTwin(EdgeId),
    /// The difference count recorded on an edge's overlap disagrees
    /// with the sequences it joins.
    DifferenceMismatch {
        edge: EdgeId,
        recorded: usize,
        found: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GraphError as GE;
        match self {
            GE::DuplicateVertex(name) => {
                write!(f, "Vertex `{}` was added twice", name)
            }
            GE::UnknownVertex(v) => write!(f, "Unknown vertex {}", v),
            GE::UnknownEdge(e) => write!(f, "Unknown edge {}", e),
            GE::DuplicateEdge(v, ed) => {
                write!(f, "Vertex {} already has an edge {}", v, ed)
            }
            GE::CoordinateOutOfRange(v) => write!(
                f,
                "Overlap coordinates don't match the sequence of vertex {}",
                v
            ),
            GE::SelfOverlap(v) => {
                write!(f, "Vertex {} cannot overlap itself", v)
            }
            GE::EdgeNotIncident(e, v) => {
                write!(f, "Edge {} does not start at vertex {}", e, v)
            }
            GE::DescriptorMismatch { expected, found } => write!(
                f,
                "Created edge {} where {} was expected",
                found, expected
            ),
            GE::BrokenTwin(e) => {
                write!(f, "Edge {} does not have a matching twin", e)
            }
            GE::DifferenceMismatch {
                edge,
                recorded,
                found,
            } => write!(
                f,
                "Edge {} records {} differences but its sequences have {}",
                edge, recorded, found
            ),
        }
    }
}

impl error::Error for GraphError {}
