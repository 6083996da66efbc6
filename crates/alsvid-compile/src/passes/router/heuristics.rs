//! Distance metrics used as A* heuristics.
//!
//! All metrics are computed over a conceptual square-grid embedding of the
//! qubit indices: qubit `i` sits at `(i / columns, i % columns)`.

use serde::{Deserialize, Serialize};

/// The distance metric of an A* heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// |Δrow| + |Δcol|.
    Manhattan,
    /// √(Δrow² + Δcol²).
    Euclidean,
    /// max(|Δrow|, |Δcol|).
    Chebyshev,
}

impl DistanceMetric {
    /// The distance between two qubit indices on a grid with the given
    /// number of columns.
    pub fn distance(self, a: u32, b: u32, columns: u32) -> f64 {
        let (row_a, col_a) = (f64::from(a / columns), f64::from(a % columns));
        let (row_b, col_b) = (f64::from(b / columns), f64::from(b % columns));
        let (dr, dc) = ((row_a - row_b).abs(), (col_a - col_b).abs());
        match self {
            DistanceMetric::Manhattan => dr + dc,
            DistanceMetric::Euclidean => (dr * dr + dc * dc).sqrt(),
            DistanceMetric::Chebyshev => dr.max(dc),
        }
    }
}

/// The grid column count for `num_qubits` qubits: `⌈√n⌉`.
pub(crate) fn grid_columns(num_qubits: u32) -> u32 {
    (f64::from(num_qubits).sqrt().ceil() as u32).max(1)
}
