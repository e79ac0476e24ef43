use crate::alignment::Match;
use crate::graph::{Direction, Orientation, VertexId};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// An alignment between the sequences of two vertices. `ids[0]` owns
/// `m.coord[0]` and `ids[1]` owns `m.coord[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Overlap {
    pub ids: [VertexId; 2],
    pub m: Match,
}

impl Overlap {
    pub fn new(x: VertexId, y: VertexId, m: Match) -> Self {
        Overlap { ids: [x, y], m }
    }

    #[inline]
    pub fn swap(&mut self) {
        self.ids.swap(0, 1);
        self.m.swap();
    }

    #[inline]
    pub fn swapped(mut self) -> Self {
        self.swap();
        self
    }

    /// Length of the matched interval on sequence `i`.
    #[inline]
    pub fn len(&self, i: usize) -> usize {
        self.m.coord[i].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.m.coord[0].is_empty() || self.m.coord[1].is_empty()
    }

    /// The end of `ids[i]` this overlap leaves from.
    #[inline]
    pub fn direction(&self, i: usize) -> Direction {
        if self.m.coord[i].is_left_extreme() {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::from_reverse(self.m.reverse)
    }

    /// The descriptor of the edge this overlap induces on `ids[0]`.
    pub fn edge_desc(&self) -> EdgeDesc {
        EdgeDesc::new(self.ids[1], self.direction(0), self.orientation())
    }
}

impl std::fmt::Display for Overlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.ids[0], self.ids[1], self.m)
    }
}

/// Identifies an edge by its far end, the direction it leaves the
/// near end, and the relative orientation of the far end, without the
/// overlap payload.
///
/// The derived ordering (vertex, then direction, then orientation) is
/// the tie-break between candidates of equal overlap length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct EdgeDesc {
    pub vertex: VertexId,
    pub dir: Direction,
    pub orient: Orientation,
}

impl EdgeDesc {
    pub fn new(vertex: VertexId, dir: Direction, orient: Orientation) -> Self {
        EdgeDesc {
            vertex,
            dir,
            orient,
        }
    }

    /// The direction to leave `vertex` by when walking through this
    /// edge.
    #[inline]
    pub fn exit_dir(&self) -> Direction {
        self.dir.continue_through(self.orient)
    }
}

impl std::fmt::Display for EdgeDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.vertex, self.dir, self.orient)
    }
}
