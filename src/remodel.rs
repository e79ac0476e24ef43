//! Repairing a vertex's edges when one of them is about to be
//! deleted.
//!
//! Everything reachable from the vertex through its other edges is
//! excluded up front. The overlaps that were only reachable through
//! the deleted edge are then visited longest first; each one that
//! passes the graph's thresholds becomes a direct edge, and whatever
//! the new edge reaches is excluded in turn, so no transitive edges
//! get created.

use std::collections::BinaryHeap;

use fnv::FnvHashSet;
use log::debug;

use crate::closure::{add_overlaps_to_set, Candidate, OverlapMap};
use crate::graph::{EdgeId, GraphError, GraphResult, StringGraph, VertexId};
use crate::overlap::{EdgeDesc, Overlap};
use crate::transitive::*;

/// State of one remodeling pass around a single vertex.
#[derive(Debug)]
pub struct Exploration {
    vertex: VertexId,
    exclusion: OverlapMap,
    seen: FnvHashSet<EdgeDesc>,
    queue: BinaryHeap<Candidate>,
}

impl Exploration {
    /// Exclude the edge to be deleted and everything reachable
    /// through the other edges of `vertex`.
    pub fn new(
        graph: &StringGraph,
        vertex: VertexId,
        delete_edge: EdgeId,
    ) -> GraphResult<Self> {
        let deleted = graph
            .edge(delete_edge)
            .ok_or(GraphError::UnknownEdge(delete_edge))?;
        if deleted.start() != vertex {
            return Err(GraphError::EdgeNotIncident(delete_edge, vertex));
        }

        let mut exclusion = OverlapMap::new();
        exclusion.insert(deleted.desc(), *deleted.overlap());

        for (id, edge) in graph.all_edges_of(vertex) {
            if id == delete_edge {
                continue;
            }
            let ed = edge.desc();
            let ovr = *edge.overlap();
            exclusion.insert(ed, ovr);
            add_overlaps_to_set(graph, vertex, ed, ovr, 1.0, 0, &mut exclusion);
        }

        let seen = exclusion.keys().copied().collect();

        Ok(Exploration {
            vertex,
            exclusion,
            seen,
            queue: BinaryHeap::new(),
        })
    }

    pub fn is_excluded(&self, ed: &EdgeDesc) -> bool {
        self.exclusion.contains_key(ed)
    }

    /// Queue every overlap of the vertex that is reachable through
    /// `ed_xy` and hasn't been seen yet.
    pub fn enqueue_edges(
        &mut self,
        graph: &StringGraph,
        ed_xy: EdgeDesc,
        ovr_xy: Overlap,
    ) {
        let x = self.vertex;
        let mut stack = vec![(ed_xy, ovr_xy)];

        while let Some((ed_xy, ovr_xy)) = stack.pop() {
            for (_, edge_yz) in graph.edges_of(ed_xy.vertex, ed_xy.exit_dir()) {
                if edge_yz.end() == x {
                    continue;
                }
                let ed_xz = infer_transitive_edge_desc(&ed_xy, &edge_yz.desc());
                if self.seen.contains(&ed_xz) {
                    continue;
                }
                if let Some(ovr_xz) =
                    infer_transitive_overlap(&ovr_xy, edge_yz.overlap())
                {
                    let len = ovr_xz.m.min_overlap_len();
                    self.queue.push(Candidate::new(len, ed_xz, ovr_xz));
                    self.seen.insert(ed_xz);
                    stack.push((ed_xz, ovr_xz));
                }
            }
        }
    }

    /// Drain the queue, creating an edge for every candidate that is
    /// not already reachable and passes the graph's thresholds. A
    /// candidate whose overlap would induce a different edge than its
    /// descriptor names is an error, and leaves the graph unchanged.
    pub fn process(&mut self, graph: &mut StringGraph) -> GraphResult<Vec<EdgeId>> {
        let x = self.vertex;
        let params = *graph.params();
        let mut created = Vec::new();

        while let Some(Candidate { len, ed, ovr }) = self.queue.pop() {
            if self.is_excluded(&ed) {
                continue;
            }

            if len < params.min_overlap {
                continue;
            }
            let error_rate = calc_error_rate(graph, x, ed.vertex, &ovr);
            if !is_error_rate_acceptable(error_rate, params.max_error_rate) {
                continue;
            }

            let found = ovr.edge_desc();
            if found != ed {
                return Err(GraphError::DescriptorMismatch {
                    expected: ed,
                    found,
                });
            }
            let new_edge = graph.create_edges(ovr)?;
            debug!("{}: added edge {} ({} bases)", x, ed, len);
            created.push(new_edge);

            self.exclusion.insert(ed, ovr);
            add_overlaps_to_set(graph, x, ed, ovr, 1.0, 0, &mut self.exclusion);
        }

        Ok(created)
    }
}

/// Give `vertex` direct edges to everything it would otherwise only
/// reach through `delete_edge`, without creating transitive edges.
/// Call before removing `delete_edge`; it is left in place. Returns
/// the newly created edges.
pub fn remodel_vertex_for_excision(
    graph: &mut StringGraph,
    vertex: VertexId,
    delete_edge: EdgeId,
) -> GraphResult<Vec<EdgeId>> {
    let mut exploration = Exploration::new(graph, vertex, delete_edge)?;

    let (ed_xy, ovr_xy) = graph
        .edge(delete_edge)
        .map(|e| (e.desc(), *e.overlap()))
        .ok_or(GraphError::UnknownEdge(delete_edge))?;
    exploration.enqueue_edges(graph, ed_xy, ovr_xy);

    exploration.process(graph)
}
