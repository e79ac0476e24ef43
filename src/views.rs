//! Views of a vertex's complete overlap neighborhood, built for error
//! correction.

pub mod multioverlap;
pub mod seqtrie;

pub use self::multioverlap::MultiOverlap;
pub use self::seqtrie::SeqTrie;

use bio::alphabets::dna;
use log::debug;

use crate::closure::construct_complete_overlap_map;
use crate::graph::{GraphError, GraphResult, StringGraph, VertexId};

/// The vertex's sequence with every sequence in its complete overlap
/// map, regardless of length or error rate.
pub fn make_extended_multi_overlap(
    graph: &StringGraph,
    vertex: VertexId,
) -> GraphResult<MultiOverlap> {
    let root = graph
        .vertex(vertex)
        .ok_or(GraphError::UnknownVertex(vertex))?;
    let overlaps = construct_complete_overlap_map(graph, vertex, 1.0, 0);

    let mut mo = MultiOverlap::new(vertex, root.seq());
    for (ed, ovr) in overlaps.iter() {
        mo.add(graph.seq(ed.vertex), *ovr);
    }
    Ok(mo)
}

/// Tries of the sequences overlapping the left and right ends of the
/// vertex. Every overlapping stretch is read on the vertex's strand,
/// starting at the vertex's boundary and moving inward, and inserted
/// with weight `ln(p_error)`.
pub fn make_extended_seq_tries(
    graph: &StringGraph,
    vertex: VertexId,
    p_error: f64,
) -> GraphResult<(SeqTrie, SeqTrie)> {
    if graph.vertex(vertex).is_none() {
        return Err(GraphError::UnknownVertex(vertex));
    }
    let lp = p_error.ln();
    let overlaps = construct_complete_overlap_map(graph, vertex, 1.0, 0);

    let mut left = SeqTrie::new();
    let mut right = SeqTrie::new();

    for (ed, ovr) in overlaps.iter() {
        let neighbor = ovr.m.coord[1].substring(graph.seq(ed.vertex));
        let mut overlapped = if ovr.m.reverse {
            dna::revcomp(neighbor)
        } else {
            neighbor.to_vec()
        };

        if ovr.m.coord[0].is_right_extreme() {
            overlapped.reverse();
            right.insert(&overlapped, lp);
        } else {
            debug_assert!(ovr.m.coord[0].is_left_extreme());
            left.insert(&overlapped, lp);
        }
    }

    debug!(
        "{}: tries with {} left and {} right nodes",
        vertex,
        left.num_nodes(),
        right.num_nodes()
    );
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{genome, genome_overlap};

    /// m = g[50, 150) with a left neighbor l = g[0, 100), a right
    /// neighbor r = g[110, 210) stored reverse complemented, and
    /// rr = g[130, 230) only reachable through r.
    fn neighborhood() -> (StringGraph, VertexId, Vec<u8>) {
        let g = genome(240, 31);
        let mut graph = StringGraph::default();
        let l = graph.add_vertex("l", &g[0..100]).unwrap();
        let m = graph.add_vertex("m", &g[50..150]).unwrap();
        let r = graph.add_vertex("r", dna::revcomp(&g[110..210])).unwrap();
        let rr = graph.add_vertex("rr", &g[130..230]).unwrap();

        graph
            .create_edges(genome_overlap(l, (0, 100), m, (50, 100)))
            .unwrap();

        let mut mr = genome_overlap(m, (50, 100), r, (110, 100));
        mr.m.coord[1] = mr.m.coord[1].flip();
        mr.m.reverse = true;
        graph.create_edges(mr).unwrap();

        let mut r_rr = genome_overlap(r, (110, 100), rr, (130, 100));
        r_rr.m.coord[0] = r_rr.m.coord[0].flip();
        r_rr.m.reverse = true;
        graph.create_edges(r_rr).unwrap();

        (graph, m, g)
    }

    #[test]
    fn multi_overlap_pileup() {
        let (graph, m, g) = neighborhood();
        let mo = make_extended_multi_overlap(&graph, m).unwrap();
        assert_eq!(3, mo.len());
        assert_eq!(graph.seq(m), mo.root_seq());

        // m[0] = g[50] is covered by l only; m[99] = g[149] by r and rr
        assert_eq!(vec![g[50], g[50]], mo.pileup(0));
        assert_eq!(vec![g[149]; 3], mo.pileup(99));
        assert_eq!(2, mo.coverage(70));
        assert_eq!(3, mo.coverage(85));
    }

    #[test]
    fn tries_read_inward_from_each_end() {
        let (graph, m, g) = neighborhood();
        let (left, right) = make_extended_seq_tries(&graph, m, 0.5).unwrap();

        // left: l covers m[0, 50) = g[50, 100)
        assert_eq!(1, left.count_prefix(&g[50..100]));

        // right: r covers m[60, 100) and rr m[80, 100); both read from
        // m's right end going left
        let mut inward: Vec<u8> = g[110..150].to_vec();
        inward.reverse();
        assert_eq!(2, right.count_prefix(&inward[..20]));
        assert_eq!(1, right.count_prefix(&inward));
        let path = right.path(&inward[..1]);
        assert!((path[0].weight - 2.0 * 0.5f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn views_of_unknown_vertex_fail() {
        let (graph, _, _) = neighborhood();
        let foreign = VertexId(graph.vertex_count());
        assert!(matches!(
            make_extended_multi_overlap(&graph, foreign),
            Err(GraphError::UnknownVertex(v)) if v == foreign
        ));
        assert!(matches!(
            make_extended_seq_tries(&graph, foreign, 0.5),
            Err(GraphError::UnknownVertex(v)) if v == foreign
        ));
    }
}
