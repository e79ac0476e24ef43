use bio::alphabets::dna;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` on a sequence of length
/// `seq_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SeqCoord {
    pub start: usize,
    pub end: usize,
    pub seq_len: usize,
}

impl SeqCoord {
    pub fn new(start: usize, end: usize, seq_len: usize) -> Self {
        debug_assert!(start <= end && end <= seq_len);
        SeqCoord {
            start,
            end,
            seq_len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn is_left_extreme(&self) -> bool {
        self.start == 0
    }

    #[inline]
    pub fn is_right_extreme(&self) -> bool {
        self.end == self.seq_len
    }

    #[inline]
    pub fn is_contained(&self) -> bool {
        self.is_left_extreme() && self.is_right_extreme()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end && self.end <= self.seq_len
    }

    /// The same interval expressed on the reverse complement of the
    /// sequence.
    #[inline]
    pub fn flip(&self) -> Self {
        SeqCoord {
            start: self.seq_len - self.end,
            end: self.seq_len - self.start,
            seq_len: self.seq_len,
        }
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(SeqCoord { start, end, ..*self })
        } else {
            None
        }
    }

    pub fn substring<'a>(&self, seq: &'a [u8]) -> &'a [u8] {
        &seq[self.start..self.end]
    }
}

impl std::fmt::Display for SeqCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}) {}", self.start, self.end, self.seq_len)
    }
}

/// An ungapped alignment between two sequences. `coord[0]` lies on the
/// first sequence and `coord[1]` on the second; when `reverse` is set
/// the second sequence aligns as its reverse complement, so the first
/// base of `coord[0]` pairs with the last base of `coord[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Match {
    pub coord: [SeqCoord; 2],
    pub reverse: bool,
    /// Differences reported by whoever produced the match; inferred
    /// matches don't carry one.
    pub num_diffs: Option<usize>,
}

impl Match {
    pub fn new(first: SeqCoord, second: SeqCoord, reverse: bool) -> Self {
        Match {
            coord: [first, second],
            reverse,
            num_diffs: None,
        }
    }

    pub fn with_diffs(mut self, num_diffs: usize) -> Self {
        self.num_diffs = Some(num_diffs);
        self
    }

    /// Exchange the roles of the two sequences.
    #[inline]
    pub fn swap(&mut self) {
        self.coord.swap(0, 1);
    }

    #[inline]
    pub fn swapped(mut self) -> Self {
        self.swap();
        self
    }

    #[inline]
    pub fn min_overlap_len(&self) -> usize {
        self.coord[0].len().min(self.coord[1].len())
    }

    #[inline]
    pub fn is_left_extreme(&self) -> bool {
        self.coord[0].is_left_extreme()
    }

    #[inline]
    pub fn is_right_extreme(&self) -> bool {
        self.coord[0].is_right_extreme()
    }

    /// Map an interval lying within `coord[0]` onto the second
    /// sequence. Positions are carried over by offset, clamped to the
    /// bounds of `coord[1]`.
    pub fn translate(&self, intv: &SeqCoord) -> SeqCoord {
        let [c0, c1] = self.coord;
        let lo = intv.start.saturating_sub(c0.start).min(c1.len());
        let hi = intv.end.saturating_sub(c0.start).min(c1.len());
        if self.reverse {
            SeqCoord::new(c1.end - hi, c1.end - lo, c1.seq_len)
        } else {
            SeqCoord::new(c1.start + lo, c1.start + hi, c1.seq_len)
        }
    }

    /// Whether two matches that share their first sequence overlap on
    /// it; required before calling `infer`.
    pub fn intersects(match_yx: &Match, match_yz: &Match) -> bool {
        match_yx.coord[0].intersection(&match_yz.coord[0]).is_some()
    }

    /// Compose Y->X and Y->Z into X->Z, restricted to the part of Y
    /// that both matches cover. Returns `None` if they don't
    /// intersect.
    pub fn infer(match_yx: &Match, match_yz: &Match) -> Option<Match> {
        let y_int = match_yx.coord[0].intersection(&match_yz.coord[0])?;
        let x_int = match_yx.translate(&y_int);
        let z_int = match_yz.translate(&y_int);
        Some(Match::new(
            x_int,
            z_int,
            match_yx.reverse != match_yz.reverse,
        ))
    }

    /// Widen the match in both directions until one of the two
    /// sequences runs out, at each end.
    pub fn expand(&mut self) {
        let c0 = self.coord[0];
        // work in the frame where the second sequence runs forward
        let c1 = if self.reverse {
            self.coord[1].flip()
        } else {
            self.coord[1]
        };

        let left = c0.start.min(c1.start);
        let right = (c0.seq_len - c0.end).min(c1.seq_len - c1.end);

        let c0 = SeqCoord::new(c0.start - left, c0.end + right, c0.seq_len);
        let c1 = SeqCoord::new(c1.start - left, c1.end + right, c1.seq_len);

        self.coord = [c0, if self.reverse { c1.flip() } else { c1 }];
    }

    /// Count mismatching bases between the matched parts of the two
    /// sequences, comparing position by position over the shorter
    /// of the two intervals.
    pub fn count_differences(&self, seq_x: &[u8], seq_y: &[u8]) -> usize {
        let sub_x = self.coord[0].substring(seq_x);
        let sub_y = self.coord[1].substring(seq_y);
        let count = |ys: &[u8]| {
            sub_x
                .iter()
                .zip(ys.iter())
                .filter(|&(a, b)| !a.eq_ignore_ascii_case(b))
                .count()
        };
        if self.reverse {
            count(&dna::revcomp(sub_y))
        } else {
            count(sub_y)
        }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.coord[0],
            self.coord[1],
            if self.reverse { "rc" } else { "fw" }
        )?;
        if let Some(nd) = self.num_diffs {
            write!(f, " nd:{}", nd)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_coord() {
        let c = SeqCoord::new(10, 30, 100);
        assert_eq!(SeqCoord::new(70, 90, 100), c.flip());
        assert_eq!(c, c.flip().flip());
    }

    #[test]
    fn extremes() {
        assert!(SeqCoord::new(0, 10, 100).is_left_extreme());
        assert!(SeqCoord::new(90, 100, 100).is_right_extreme());
        assert!(SeqCoord::new(0, 100, 100).is_contained());
        assert!(!SeqCoord::new(5, 95, 100).is_left_extreme());
    }

    #[test]
    fn translate_forward_and_reverse() {
        let fwd = Match::new(
            SeqCoord::new(20, 60, 100),
            SeqCoord::new(0, 40, 100),
            false,
        );
        assert_eq!(
            SeqCoord::new(10, 30, 100),
            fwd.translate(&SeqCoord::new(30, 50, 100))
        );

        let rev = Match { reverse: true, ..fwd };
        assert_eq!(
            SeqCoord::new(10, 30, 100),
            rev.translate(&SeqCoord::new(30, 50, 100))
        );
        assert_eq!(
            SeqCoord::new(30, 40, 100),
            rev.translate(&SeqCoord::new(20, 30, 100))
        );
    }

    #[test]
    fn infer_through_shared_sequence() {
        // Y[0, 50) ~ X[50, 100) and Y[20, 60) ~ Z[0, 40)
        let yx = Match::new(
            SeqCoord::new(0, 50, 60),
            SeqCoord::new(50, 100, 100),
            false,
        );
        let yz = Match::new(
            SeqCoord::new(20, 60, 60),
            SeqCoord::new(0, 40, 100),
            false,
        );
        assert!(Match::intersects(&yx, &yz));
        let xz = Match::infer(&yx, &yz).unwrap();
        assert_eq!(SeqCoord::new(70, 100, 100), xz.coord[0]);
        assert_eq!(SeqCoord::new(0, 30, 100), xz.coord[1]);
        assert!(!xz.reverse);
    }

    #[test]
    fn disjoint_matches_do_not_infer() {
        let yx = Match::new(
            SeqCoord::new(0, 50, 100),
            SeqCoord::new(50, 100, 100),
            false,
        );
        let yz = Match::new(
            SeqCoord::new(50, 100, 100),
            SeqCoord::new(0, 50, 100),
            false,
        );
        assert!(!Match::intersects(&yx, &yz));
        assert!(Match::infer(&yx, &yz).is_none());
    }

    #[test]
    fn expand_to_extremes() {
        let mut m = Match::new(
            SeqCoord::new(20, 50, 60),
            SeqCoord::new(0, 30, 100),
            false,
        );
        m.expand();
        assert_eq!(SeqCoord::new(20, 60, 60), m.coord[0]);
        assert_eq!(SeqCoord::new(0, 40, 100), m.coord[1]);

        // same overlap against the reverse complement of the second
        let mut m = Match::new(
            SeqCoord::new(20, 50, 60),
            SeqCoord::new(70, 100, 100),
            true,
        );
        m.expand();
        assert_eq!(SeqCoord::new(20, 60, 60), m.coord[0]);
        assert_eq!(SeqCoord::new(60, 100, 100), m.coord[1]);
    }

    #[test]
    fn count_differences_both_strands() {
        let x = b"ACGTACGTAC";
        let y = b"ACGAACGTTC";
        let m = Match::new(
            SeqCoord::new(0, 10, 10),
            SeqCoord::new(0, 10, 10),
            false,
        );
        assert_eq!(2, m.count_differences(x, y));

        let y_rc = dna::revcomp(&y[..]);
        let m = Match { reverse: true, ..m };
        assert_eq!(2, m.count_differences(x, &y_rc));
    }
}
