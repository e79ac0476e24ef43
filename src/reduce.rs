//! Whole-graph operations built on the per-vertex overlap maps.

use log::{debug, info};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::closure::construct_partitioned_overlap_map;
use crate::graph::{EdgeId, GraphError, GraphResult, StringGraph, VertexId};
use crate::remodel::remodel_vertex_for_excision;

/// What a pass over the graph changed. Edges are counted once per
/// twin pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ReductionStats {
    pub vertices_visited: usize,
    pub edges_removed: usize,
    pub edges_created: usize,
}

impl ReductionStats {
    /// Save the stats to a JSON file.
    #[cfg(feature = "serde1")]
    pub fn save_json<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::io::Result<()> {
        use std::{fs::File, io::BufWriter};
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

impl std::fmt::Display for ReductionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices visited, {} edges removed, {} edges created",
            self.vertices_visited, self.edges_removed, self.edges_created
        )
    }
}

/// Remove every edge that the partition of its start vertex, under
/// the graph's parameters, classifies as transitive. All vertices are
/// classified before anything is removed.
pub fn transitive_reduction(graph: &mut StringGraph) -> GraphResult<ReductionStats> {
    let params = *graph.params();
    let mut stats = ReductionStats::default();
    let mut doomed: Vec<EdgeId> = Vec::new();

    for v in graph.vertex_ids() {
        let partition = construct_partitioned_overlap_map(
            graph,
            v,
            params.max_error_rate,
            params.min_overlap,
        );
        doomed.extend(
            partition
                .transitive
                .keys()
                .filter_map(|ed| graph.find_edge(v, ed)),
        );
        stats.vertices_visited += 1;
    }

    for id in doomed {
        // the twin may already be gone
        if graph.edge(id).is_none() {
            continue;
        }
        graph.remove_edge(id)?;
        stats.edges_removed += 1;
    }

    info!("transitive reduction: {}", stats);
    Ok(stats)
}

/// Disconnect `vertex` from the graph, first giving each neighbor
/// direct edges to whatever it only reached through `vertex`.
pub fn excise_vertex(
    graph: &mut StringGraph,
    vertex: VertexId,
) -> GraphResult<ReductionStats> {
    if graph.vertex(vertex).is_none() {
        return Err(GraphError::UnknownVertex(vertex));
    }

    let mut stats = ReductionStats::default();

    let incoming: Vec<(VertexId, EdgeId)> = graph
        .all_edges_of(vertex)
        .map(|(_, edge)| (edge.end(), edge.twin()))
        .collect();

    for (neighbor, twin) in incoming {
        let created = remodel_vertex_for_excision(graph, neighbor, twin)?;
        debug!(
            "{}: {} edges replace the one to {}",
            neighbor,
            created.len(),
            vertex
        );
        stats.edges_created += created.len();
        stats.vertices_visited += 1;
    }

    let outgoing: Vec<EdgeId> =
        graph.all_edges_of(vertex).map(|(id, _)| id).collect();
    for id in outgoing {
        graph.remove_edge(id)?;
        stats.edges_removed += 1;
    }

    info!("excised {}: {}", vertex, stats);
    Ok(stats)
}
