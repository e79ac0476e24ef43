#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Thresholds deciding which overlaps count as real. Shared by every
/// vertex in a graph.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GraphParams {
    /// Shortest overlap, in bases, that may become an edge.
    pub min_overlap: usize,
    /// Largest fraction of mismatching bases an overlap may have.
    pub max_error_rate: f64,
}

impl GraphParams {
    pub const DEFAULT_MIN_OVERLAP: usize = 45;
    pub const DEFAULT_MAX_ERROR_RATE: f64 = 0.0;

    pub fn new(min_overlap: usize, max_error_rate: f64) -> Self {
        GraphParams {
            min_overlap,
            max_error_rate,
        }
    }

    /// Accept every overlap, whatever its length or error rate. Used
    /// for pure reachability queries.
    pub fn permissive() -> Self {
        GraphParams {
            min_overlap: 0,
            max_error_rate: 1.0,
        }
    }

    pub fn with_min_overlap(self, min_overlap: usize) -> Self {
        GraphParams {
            min_overlap,
            ..self
        }
    }

    pub fn with_max_error_rate(self, max_error_rate: f64) -> Self {
        GraphParams {
            max_error_rate,
            ..self
        }
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        GraphParams {
            min_overlap: Self::DEFAULT_MIN_OVERLAP,
            max_error_rate: Self::DEFAULT_MAX_ERROR_RATE,
        }
    }
}

impl std::fmt::Display for GraphParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min overlap {}, max error rate {}",
            self.min_overlap, self.max_error_rate
        )
    }
}
