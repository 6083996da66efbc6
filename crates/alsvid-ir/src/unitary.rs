//! Dense unitary matrices for small qubit counts.
//!
//! Matrices are stored row-major in a contiguous `Vec<Complex64>`, sized
//! 2^k × 2^k. This is only used for gate semantics and rewrite verification,
//! so dimensions stay small (k is the operand count of a single gate, or the
//! register size of a test circuit).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::math::ATOL;

/// A square complex matrix of dimension 2^k, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unitary {
    dim: usize,
    data: Vec<Complex64>,
}

impl Unitary {
    /// Create a matrix from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is not `dim * dim`.
    pub fn from_rows(dim: usize, data: Vec<Complex64>) -> Self {
        assert_eq!(
            data.len(),
            dim * dim,
            "matrix data length {} does not match dimension {dim}",
            data.len(),
        );
        Self { dim, data }
    }

    /// The all-zeros matrix of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![Complex64::ZERO; dim * dim],
        }
    }

    /// The identity matrix of the given dimension.
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m.set(i, i, Complex64::ONE);
        }
        m
    }

    /// Matrix dimension (2^k).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the entry at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Set the entry at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.dim + col] = value;
    }

    /// Matrix product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn mul(&self, other: &Unitary) -> Unitary {
        assert_eq!(self.dim, other.dim, "dimension mismatch in matrix product");
        let n = self.dim;
        let mut out = Unitary::zeros(n);
        for r in 0..n {
            for k in 0..n {
                let lhs = self.get(r, k);
                if lhs.norm_sqr() == 0.0 {
                    continue;
                }
                for c in 0..n {
                    let v = out.get(r, c) + lhs * other.get(k, c);
                    out.set(r, c, v);
                }
            }
        }
        out
    }

    /// Check if this matrix is the identity up to a global phase.
    pub fn is_identity_up_to_global_phase(&self) -> bool {
        self.equivalent_up_to_global_phase(&Unitary::identity(self.dim))
    }

    /// Check matrix equivalence up to a global phase, with tolerance `ATOL`.
    ///
    /// Finds the first entry of `self` with modulus above `ATOL`, divides it
    /// by the corresponding entry of `other`, and compares `self` against the
    /// rescaled `other` entry-wise.
    pub fn equivalent_up_to_global_phase(&self, other: &Unitary) -> bool {
        match self.phase_difference(other) {
            Some(lambda) => self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - lambda * b).norm() < ATOL),
            None => false,
        }
    }

    /// The global-phase ratio `self[i,j] / other[i,j]` at the first entry of
    /// `self` with modulus above `ATOL`.
    ///
    /// Returns `None` when the matrices cannot be phase-related (dimension
    /// mismatch, `self` numerically zero, or a zero entry in `other` where
    /// `self` is non-zero).
    pub fn phase_difference(&self, other: &Unitary) -> Option<Complex64> {
        if self.dim != other.dim {
            return None;
        }
        let index = self.data.iter().position(|v| v.norm() > ATOL)?;
        if other.data[index].norm() < ATOL {
            return None;
        }
        Some(self.data[index] / other.data[index])
    }
}

impl std::ops::Mul for &Unitary {
    type Output = Unitary;

    fn mul(self, rhs: &Unitary) -> Unitary {
        Unitary::mul(self, rhs)
    }
}

/// The single-qubit unitary `exp(iφ)·(cos(θ/2)·I − i·sin(θ/2)·(n·σ))` for a
/// rotation of angle `θ` around unit axis `n`, with global phase `φ`.
pub fn can1(axis: &Axis, angle: f64, phase: f64) -> Unitary {
    let [nx, ny, nz] = axis.value();
    let cos = (angle / 2.0).cos();
    let sin = (angle / 2.0).sin();
    let global = Complex64::from_polar(1.0, phase);

    // cos(θ/2)·I − i·sin(θ/2)·(nx·X + ny·Y + nz·Z)
    let a = Complex64::new(cos, -sin * nz);
    let b = Complex64::new(-sin * ny, -sin * nx);
    let c = Complex64::new(sin * ny, -sin * nx);
    let d = Complex64::new(cos, sin * nz);

    Unitary::from_rows(2, vec![global * a, global * b, global * c, global * d])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn identity_is_identity() {
        assert!(Unitary::identity(4).is_identity_up_to_global_phase());
    }

    #[test]
    fn can1_x_squares_to_identity() {
        // X = rotation by π around the X axis with phase π/2.
        let x = can1(&Axis::X, PI, PI / 2.0);
        assert!(x.mul(&x).is_identity_up_to_global_phase());
    }

    #[test]
    fn can1_hadamard() {
        let axis = Axis::new([1.0, 0.0, 1.0]).unwrap();
        let h = can1(&axis, PI, PI / 2.0);
        let s = 1.0 / 2.0_f64.sqrt();
        let expected = Unitary::from_rows(
            2,
            vec![
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(-s, 0.0),
            ],
        );
        assert!(h.equivalent_up_to_global_phase(&expected));
        // The phase convention makes H exactly real, not just up to phase.
        for i in 0..2 {
            for j in 0..2 {
                assert!((h.get(i, j) - expected.get(i, j)).norm() < ATOL);
            }
        }
    }

    #[test]
    fn phase_equivalence_detects_mismatch() {
        let z = can1(&Axis::Z, PI, PI / 2.0);
        let x = can1(&Axis::X, PI, PI / 2.0);
        assert!(!z.equivalent_up_to_global_phase(&x));

        let z_rephased = {
            let mut m = z.clone();
            for r in 0..2 {
                for c in 0..2 {
                    m.set(r, c, m.get(r, c) * Complex64::from_polar(1.0, 0.7));
                }
            }
            m
        };
        assert!(z.equivalent_up_to_global_phase(&z_rephased));
    }
}
