//! Overlap bookkeeping for assembly string graphs: inferring
//! transitive overlaps, partitioning a vertex's overlaps into
//! irreducible and transitive ones, remodeling edges around a vertex
//! that is being removed, and building error-correction views of a
//! vertex's neighborhood.

pub mod alignment;
pub mod cigar;
pub mod closure;
pub mod graph;
pub mod overlap;
pub mod params;
pub mod parser;
pub mod reduce;
pub mod remodel;
pub mod transitive;
pub mod views;

pub use self::alignment::{Match, SeqCoord};
pub use self::closure::{
    construct_complete_overlap_map, construct_partitioned_overlap_map,
    OverlapMap, PartitionedOverlaps,
};
pub use self::graph::{
    Direction, EdgeId, GraphError, GraphResult, Orientation, StringGraph,
    VertexId,
};
pub use self::overlap::{EdgeDesc, Overlap};
pub use self::params::GraphParams;
pub use self::reduce::{excise_vertex, transitive_reduction, ReductionStats};
pub use self::remodel::remodel_vertex_for_excision;
pub use self::views::{make_extended_multi_overlap, make_extended_seq_tries};
