//! The overlap neighborhood of a vertex: every overlap reachable from
//! it by composing edges, and its split into irreducible and
//! transitive overlaps.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use log::{debug, trace};

use crate::graph::{StringGraph, VertexId};
use crate::overlap::{EdgeDesc, Overlap};
use crate::transitive::*;

/// Overlaps of one vertex, keyed by the edge they would induce.
pub type OverlapMap = BTreeMap<EdgeDesc, Overlap>;

/// Queue entry ordering overlaps longest first. Among equal lengths
/// the smaller descriptor comes out first. The overlap is payload and
/// takes no part in comparisons.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub(crate) len: usize,
    pub(crate) ed: EdgeDesc,
    pub(crate) ovr: Overlap,
}

impl Candidate {
    pub(crate) fn new(len: usize, ed: EdgeDesc, ovr: Overlap) -> Self {
        Candidate { len, ed, ovr }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.ed == other.ed
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| other.ed.cmp(&self.ed))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Add to `out` every overlap of `x` that can be inferred by walking
/// on from the far end of `ed_xy`, keeping only those within the
/// error rate and length thresholds. Descriptors already in `out` are
/// neither replaced nor walked through again.
pub fn add_overlaps_to_set(
    graph: &StringGraph,
    x: VertexId,
    ed_xy: EdgeDesc,
    ovr_xy: Overlap,
    max_error_rate: f64,
    min_len: usize,
    out: &mut OverlapMap,
) {
    let mut stack = vec![(ed_xy, ovr_xy)];

    while let Some((ed_xy, ovr_xy)) = stack.pop() {
        let y = ed_xy.vertex;
        for (_, edge_yz) in graph.edges_of(y, ed_xy.exit_dir()) {
            let z = edge_yz.end();
            if z == x {
                continue;
            }
            let ed_xz = infer_transitive_edge_desc(&ed_xy, &edge_yz.desc());
            if out.contains_key(&ed_xz) {
                continue;
            }

            let ovr_yz = edge_yz.overlap();
            let ovr_xz = match infer_transitive_overlap(&ovr_xy, ovr_yz) {
                Some(ovr) => ovr,
                None => continue,
            };

            let error_rate = calc_error_rate(graph, x, z, &ovr_xz);
            if is_error_rate_acceptable(error_rate, max_error_rate)
                && ovr_xz.len(0) >= min_len
            {
                trace!("{} reaches {} via {}: {}", x, ed_xz, y, ovr_xz);
                out.insert(ed_xz, ovr_xz);
                stack.push((ed_xz, ovr_xz));
            }
        }
    }
}

/// Every overlap of `vertex`: its own edges, plus all overlaps
/// inferred transitively through them that pass the thresholds.
pub fn construct_complete_overlap_map(
    graph: &StringGraph,
    vertex: VertexId,
    max_error_rate: f64,
    min_len: usize,
) -> OverlapMap {
    let mut out = OverlapMap::new();

    for (_, edge) in graph.all_edges_of(vertex) {
        out.insert(edge.desc(), *edge.overlap());
    }

    let direct: Vec<(EdgeDesc, Overlap)> =
        out.iter().map(|(ed, ovr)| (*ed, *ovr)).collect();
    for (ed, ovr) in direct {
        add_overlaps_to_set(
            graph,
            vertex,
            ed,
            ovr,
            max_error_rate,
            min_len,
            &mut out,
        );
    }

    out
}

/// The overlaps of a vertex split by whether a longer overlap
/// explains them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedOverlaps {
    pub irreducible: OverlapMap,
    pub transitive: OverlapMap,
}

impl PartitionedOverlaps {
    pub fn len(&self) -> usize {
        self.irreducible.len() + self.transitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.irreducible.is_empty() && self.transitive.is_empty()
    }
}

/// Partition the complete overlap map of `vertex` into irreducible and
/// transitive overlaps.
///
/// Overlaps are taken longest first. Each one moves to the transitive
/// set every shorter overlap on the same side of `vertex` for which
/// the overlap between the two far ends, inferred through `vertex`,
/// passes the thresholds. Only the overlaps themselves are consulted,
/// never the edges of the graph, so this can be rerun after the
/// sequences or edges have changed.
pub fn construct_partitioned_overlap_map(
    graph: &StringGraph,
    vertex: VertexId,
    max_error_rate: f64,
    min_len: usize,
) -> PartitionedOverlaps {
    let mut irreducible =
        construct_complete_overlap_map(graph, vertex, max_error_rate, min_len);
    let mut transitive = OverlapMap::new();

    let mut queue: BinaryHeap<Candidate> = irreducible
        .iter()
        .map(|(ed, ovr)| Candidate::new(ovr.len(0), *ed, *ovr))
        .collect();

    while let Some(Candidate { ed: ed_xy, ovr: ovr_xy, .. }) = queue.pop() {
        let ovr_yx = ovr_xy.swapped();

        let explained: Vec<EdgeDesc> = irreducible
            .iter()
            .filter(|(ed_xz, ovr_xz)| {
                **ed_xz != ed_xy
                    && ed_xz.dir == ed_xy.dir
                    && ovr_xy.len(0) > ovr_xz.len(0)
            })
            .filter(|(ed_xz, ovr_xz)| {
                infer_transitive_overlap(&ovr_yx, ovr_xz).map_or(
                    false,
                    |ovr_yz| {
                        let error_rate = calc_error_rate(
                            graph,
                            ed_xy.vertex,
                            ed_xz.vertex,
                            &ovr_yz,
                        );
                        is_error_rate_acceptable(error_rate, max_error_rate)
                            && ovr_yz.len(0) >= min_len
                    },
                )
            })
            .map(|(ed_xz, _)| *ed_xz)
            .collect();

        for ed_xz in explained {
            if let Some(ovr_xz) = irreducible.remove(&ed_xz) {
                trace!("{}: {} is transitive through {}", vertex, ed_xz, ed_xy);
                transitive.insert(ed_xz, ovr_xz);
            }
        }
    }

    debug!(
        "{}: {} irreducible, {} transitive overlaps",
        vertex,
        irreducible.len(),
        transitive.len()
    );

    PartitionedOverlaps {
        irreducible,
        transitive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{genome, genome_overlap, genome_read, stranded_overlap};
    use crate::graph::{Direction, Orientation};

    /// Reads a = g[0, 100), b = g[50, 110), c = g[70, 170) with edges
    /// a-b (50 bases) and b-c (40 bases); a-c (30 bases) is implied.
    fn abc() -> (StringGraph, [VertexId; 3]) {
        let g = genome(200, 11);
        let mut graph = StringGraph::default();
        let a = graph.add_vertex("a", &g[0..100]).unwrap();
        let b = graph.add_vertex("b", &g[50..110]).unwrap();
        let c = graph.add_vertex("c", &g[70..170]).unwrap();
        graph
            .create_edges(genome_overlap(a, (0, 100), b, (50, 60)))
            .unwrap();
        graph
            .create_edges(genome_overlap(b, (50, 60), c, (70, 100)))
            .unwrap();
        (graph, [a, b, c])
    }

    fn fwd_right(v: VertexId) -> EdgeDesc {
        EdgeDesc::new(v, Direction::Right, Orientation::Forward)
    }

    /// Reads of length 100 every 15 bases along a genome, with an edge
    /// between every pair overlapping by at least 20 bases.
    fn tiled(num_reads: usize) -> (StringGraph, Vec<VertexId>) {
        tiling(num_reads, |_| false)
    }

    /// `tiled`, with every odd read stored as its reverse complement.
    fn tiled_stranded(num_reads: usize) -> (StringGraph, Vec<VertexId>) {
        tiling(num_reads, |i| i % 2 == 1)
    }

    fn tiling<F>(num_reads: usize, reversed: F) -> (StringGraph, Vec<VertexId>)
    where
        F: Fn(usize) -> bool,
    {
        let step = 15;
        let len = 100;
        let g = genome(step * num_reads + len, 5);
        let mut graph = StringGraph::default();
        let ids: Vec<VertexId> = (0..num_reads)
            .map(|i| {
                let read = genome_read(&g, (i * step, len), reversed(i));
                graph.add_vertex(format!("r{}", i), read).unwrap()
            })
            .collect();
        for i in 0..num_reads {
            for j in i + 1..num_reads {
                let (si, sj) = (i * step, j * step);
                if si + len >= sj + 20 {
                    let ovr = stranded_overlap(
                        ids[i],
                        (si, len, reversed(i)),
                        ids[j],
                        (sj, len, reversed(j)),
                    );
                    graph.create_edges(ovr).unwrap();
                }
            }
        }
        (graph, ids)
    }

    #[test]
    fn complete_map_includes_inferred_overlap() {
        let (graph, [a, b, c]) = abc();
        let map = construct_complete_overlap_map(&graph, a, 0.0, 20);
        assert_eq!(2, map.len());
        assert_eq!(50, map[&fwd_right(b)].len(0));
        assert_eq!(30, map[&fwd_right(c)].len(0));

        // too short for the threshold
        let map = construct_complete_overlap_map(&graph, a, 0.0, 31);
        assert_eq!(1, map.len());
        assert!(map.contains_key(&fwd_right(b)));
    }

    #[test]
    fn abc_partition() {
        let (graph, [a, b, c]) = abc();
        let part = construct_partitioned_overlap_map(&graph, a, 0.0, 20);
        assert_eq!(1, part.irreducible.len());
        assert!(part.irreducible.contains_key(&fwd_right(b)));
        assert_eq!(1, part.transitive.len());
        assert!(part.transitive.contains_key(&fwd_right(c)));
    }

    #[test]
    fn abc_partition_with_direct_transitive_edge() {
        let (mut graph, [a, b, c]) = abc();
        graph
            .create_edges(genome_overlap(a, (0, 100), c, (70, 100)))
            .unwrap();
        let part = construct_partitioned_overlap_map(&graph, a, 0.0, 20);
        assert_eq!(vec![fwd_right(b)], part.irreducible.keys().copied().collect::<Vec<_>>());
        assert_eq!(vec![fwd_right(c)], part.transitive.keys().copied().collect::<Vec<_>>());

        // from the middle read both neighbors are irreducible, one on
        // each side
        let part = construct_partitioned_overlap_map(&graph, b, 0.0, 20);
        assert_eq!(2, part.irreducible.len());
        assert!(part.transitive.is_empty());
    }

    #[test]
    fn partition_properties_on_tiled_reads() {
        let (graph, ids) = tiled(8);
        for &v in ids.iter() {
            let complete = construct_complete_overlap_map(&graph, v, 0.0, 20);
            let part = construct_partitioned_overlap_map(&graph, v, 0.0, 20);

            // union is the complete map and the halves are disjoint
            assert_eq!(complete.len(), part.len());
            for (ed, ovr) in complete.iter() {
                let in_irr = part.irreducible.get(ed);
                let in_tr = part.transitive.get(ed);
                assert!(in_irr.is_some() != in_tr.is_some());
                assert_eq!(Some(ovr), in_irr.or(in_tr));
            }

            // rerunning gives the same answer
            let again = construct_partitioned_overlap_map(&graph, v, 0.0, 20);
            assert_eq!(part, again);

            // the longest overlap is never transitive
            if let Some(longest) = complete.values().map(|o| o.len(0)).max() {
                assert!(part.irreducible.values().any(|o| o.len(0) == longest));
                assert!(part.transitive.values().all(|o| o.len(0) < longest));
            }

            // in a clean tiling only the nearest read on each side is
            // irreducible
            assert!(part.irreducible.len() <= 2);
            assert!(!part.irreducible.is_empty());
        }
    }

    #[test]
    fn partition_does_not_depend_on_strands() {
        let (fwd, ids) = tiled(8);
        let (mixed, mixed_ids) = tiled_stranded(8);
        assert_eq!(ids, mixed_ids);

        let lens = |map: &OverlapMap| -> BTreeMap<VertexId, usize> {
            map.iter().map(|(ed, ovr)| (ed.vertex, ovr.len(0))).collect()
        };
        let odd = |v: VertexId| v.0 % 2 == 1;

        for &v in ids.iter() {
            let expected = construct_partitioned_overlap_map(&fwd, v, 0.0, 20);
            let part = construct_partitioned_overlap_map(&mixed, v, 0.0, 20);
            assert_eq!(lens(&expected.irreducible), lens(&part.irreducible));
            assert_eq!(lens(&expected.transitive), lens(&part.transitive));

            for (ed, ovr) in part.irreducible.iter().chain(part.transitive.iter()) {
                assert_eq!(Orientation::from_reverse(odd(v) != odd(ed.vertex)), ed.orient);
                assert_eq!(*ed, ovr.edge_desc());
                assert_eq!(0.0, calc_error_rate(&mixed, v, ed.vertex, ovr));
            }
        }

        // r0 is stored forward and r1 reversed
        let part = construct_partitioned_overlap_map(&mixed, ids[0], 0.0, 20);
        let r0_r1 = EdgeDesc::new(ids[1], Direction::Right, Orientation::Backward);
        assert_eq!(85, part.irreducible[&r0_r1].len(0));
        assert!(part
            .transitive
            .contains_key(&EdgeDesc::new(ids[2], Direction::Right, Orientation::Forward)));
    }

    #[test]
    fn closure_terminates_on_cycle() {
        // three reads around a circular genome of 120 bases, each
        // overlapping the next by 60
        let g = genome(120, 3);
        let circ = |start: usize| -> Vec<u8> {
            (start..start + 100).map(|i| g[i % 120]).collect()
        };
        let mut graph = StringGraph::default();
        let x = graph.add_vertex("x", circ(0)).unwrap();
        let y = graph.add_vertex("y", circ(40)).unwrap();
        let z = graph.add_vertex("z", circ(80)).unwrap();
        for &(p, q) in &[(x, y), (y, z), (z, x)] {
            graph
                .create_edges(genome_overlap(p, (0, 100), q, (40, 100)))
                .unwrap();
        }

        let map = construct_complete_overlap_map(&graph, x, 1.0, 0);
        assert_eq!(4, map.len());
        assert!(map.contains_key(&fwd_right(y)));
        assert!(map.contains_key(&fwd_right(z)));
        assert!(map.contains_key(&EdgeDesc::new(z, Direction::Left, Orientation::Forward)));
        assert!(map.contains_key(&EdgeDesc::new(y, Direction::Left, Orientation::Forward)));
        assert!(map.keys().all(|ed| ed.vertex != x));
    }

    #[test]
    fn candidates_pop_longest_then_smallest_desc() {
        let (graph, [a, b, c]) = abc();
        let ovr = *graph.all_edges_of(a).next().unwrap().1.overlap();
        let mut queue = BinaryHeap::new();
        queue.push(Candidate::new(30, fwd_right(c), ovr));
        queue.push(Candidate::new(30, fwd_right(b), ovr));
        queue.push(Candidate::new(50, fwd_right(c), ovr));
        let order: Vec<(usize, VertexId)> =
            std::iter::from_fn(|| queue.pop().map(|c| (c.len, c.ed.vertex)))
                .collect();
        assert_eq!(vec![(50, c), (30, b), (30, c)], order);
    }

    #[test]
    fn candidate_equality_ignores_the_overlap() {
        let (graph, [a, b, c]) = abc();
        let ab = *graph.all_edges_of(a).next().unwrap().1.overlap();
        let bc = *graph.all_edges_of(c).next().unwrap().1.overlap();
        assert_ne!(ab, bc);

        let x = Candidate::new(30, fwd_right(b), ab);
        let y = Candidate::new(30, fwd_right(b), bc);
        assert_eq!(x, y);
        assert_eq!(Ordering::Equal, x.cmp(&y));
        assert_ne!(x, Candidate::new(30, fwd_right(c), ab));
    }
}
