use bstr::{BString, ByteSlice};

use crate::graph::VertexId;
use crate::overlap::Overlap;

/// A root sequence together with every sequence overlapping it. Each
/// overlap has the root as `ids[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiOverlap {
    root_id: VertexId,
    root_seq: BString,
    overlaps: Vec<(BString, Overlap)>,
}

impl MultiOverlap {
    pub fn new<S: AsRef<[u8]>>(root_id: VertexId, root_seq: S) -> Self {
        MultiOverlap {
            root_id,
            root_seq: BString::from(root_seq.as_ref()),
            overlaps: Vec::new(),
        }
    }

    pub fn add<S: AsRef<[u8]>>(&mut self, seq: S, ovr: Overlap) {
        debug_assert_eq!(self.root_id, ovr.ids[0]);
        self.overlaps.push((BString::from(seq.as_ref()), ovr));
    }

    pub fn root_id(&self) -> VertexId {
        self.root_id
    }

    pub fn root_seq(&self) -> &[u8] {
        self.root_seq.as_slice()
    }

    pub fn len(&self) -> usize {
        self.overlaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlaps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Overlap)> + '_ {
        self.overlaps.iter().map(|(s, o)| (s.as_bytes(), o))
    }

    /// The bases aligned to position `pos` of the root: the root's own
    /// base first, then one base from each overlapping sequence that
    /// covers `pos`, complemented if that sequence is reversed.
    pub fn pileup(&self, pos: usize) -> Vec<u8> {
        let mut column = Vec::with_capacity(self.overlaps.len() + 1);
        if let Some(&b) = self.root_seq.get(pos) {
            column.push(b);
        }
        for (seq, ovr) in self.overlaps.iter() {
            let c0 = ovr.m.coord[0];
            if pos < c0.start || pos >= c0.end {
                continue;
            }
            let offset = pos - c0.start;
            let c1 = ovr.m.coord[1];
            if offset >= c1.len() {
                continue;
            }
            let base = if ovr.m.reverse {
                bio::alphabets::dna::complement(seq[c1.end - 1 - offset])
            } else {
                seq[c1.start + offset]
            };
            column.push(base);
        }
        column
    }

    /// Number of sequences, the root included, covering `pos`.
    pub fn coverage(&self, pos: usize) -> usize {
        self.pileup(pos).len()
    }
}
