//! Composition of adjacent overlaps. Given X->Y and Y->Z, these
//! functions infer the overlap and edge descriptor X->Z through the
//! shared sequence Y.

use crate::alignment::Match;
use crate::graph::{StringGraph, VertexId};
use crate::overlap::{EdgeDesc, Overlap};

/// Slack allowed when comparing error rates, so that a rate computed
/// as e.g. 0.1 + rounding still passes a 0.1 threshold.
pub const ERROR_RATE_EPSILON: f64 = 1e-6;

/// Whether X->Y and Y->Z cover a common part of Y. Must hold before
/// calling `infer_transitive_overlap`.
pub fn has_transitive_overlap(ovr_xy: &Overlap, ovr_yz: &Overlap) -> bool {
    Match::intersects(&ovr_xy.m.swapped(), &ovr_yz.m)
}

/// Infer X->Z from X->Y and Y->Z, widened to the largest overlap the
/// two sequences allow.
///
/// Returns `None` if the two overlaps don't intersect on Y.
pub fn infer_transitive_overlap(
    ovr_xy: &Overlap,
    ovr_yz: &Overlap,
) -> Option<Overlap> {
    let match_yx = ovr_xy.m.swapped();
    let mut match_xz = Match::infer(&match_yx, &ovr_yz.m)?;
    match_xz.expand();
    Some(Overlap::new(ovr_xy.ids[0], ovr_yz.ids[1], match_xz))
}

/// Infer the descriptor of X->Z from X->Y and Y->Z. The edge leaves X
/// the same way X->Y does, and the orientations compose.
pub fn infer_transitive_edge_desc(ed_xy: &EdgeDesc, ed_yz: &EdgeDesc) -> EdgeDesc {
    EdgeDesc::new(ed_yz.vertex, ed_xy.dir, ed_xy.orient.compose(ed_yz.orient))
}

/// Fraction of mismatching bases in the overlap, computed from the
/// current sequences of `x` and `y`. Always in `[0, 1]`; an empty
/// overlap has rate 1.
pub fn calc_error_rate(
    graph: &StringGraph,
    x: VertexId,
    y: VertexId,
    ovr_xy: &Overlap,
) -> f64 {
    let len = ovr_xy.m.min_overlap_len();
    if len == 0 {
        return 1.0;
    }
    let diffs = ovr_xy.m.count_differences(graph.seq(x), graph.seq(y));
    diffs as f64 / len as f64
}

#[inline]
pub fn is_error_rate_acceptable(error_rate: f64, max_error_rate: f64) -> bool {
    error_rate - max_error_rate <= ERROR_RATE_EPSILON
}
