//! Rotation axis: a unit 3-vector.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::math::ATOL;

/// A rotation axis on the Bloch sphere.
///
/// Always stored normalized; construction rejects (near-)zero vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis([f64; 3]);

impl Axis {
    /// The X axis.
    pub const X: Axis = Axis([1.0, 0.0, 0.0]);
    /// The Y axis.
    pub const Y: Axis = Axis([0.0, 1.0, 0.0]);
    /// The Z axis.
    pub const Z: Axis = Axis([0.0, 0.0, 1.0]);

    /// Create a normalized axis from an arbitrary 3-vector.
    pub fn new(value: [f64; 3]) -> IrResult<Self> {
        let norm = (value[0] * value[0] + value[1] * value[1] + value[2] * value[2]).sqrt();
        if norm < ATOL {
            return Err(IrError::InvalidAxis);
        }
        Ok(Axis([value[0] / norm, value[1] / norm, value[2] / norm]))
    }

    /// Construct from components already known to be normalized.
    ///
    /// Only for compile-time constants of the gate catalog.
    pub(crate) const fn from_normalized(value: [f64; 3]) -> Self {
        Axis(value)
    }

    /// The axis components.
    #[inline]
    pub fn value(&self) -> [f64; 3] {
        self.0
    }

    /// Dot product with another axis.
    pub fn dot(&self, other: &Axis) -> f64 {
        self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
    }

    /// Cross product with another axis (not necessarily unit-norm).
    pub fn cross(&self, other: &Axis) -> [f64; 3] {
        [
            self.0[1] * other.0[2] - self.0[2] * other.0[1],
            self.0[2] * other.0[0] - self.0[0] * other.0[2],
            self.0[0] * other.0[1] - self.0[1] * other.0[0],
        ]
    }

    /// Component-wise closeness to another axis, within `ATOL`.
    pub fn close_to(&self, other: &Axis) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() < ATOL)
    }

    /// Component-wise closeness to the negation of another axis.
    pub fn close_to_negated(&self, other: &Axis) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a + b).abs() < ATOL)
    }
}

impl std::ops::Index<usize> for Axis {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<[f64; 3]> for Axis {
    type Error = IrError;

    fn try_from(value: [f64; 3]) -> IrResult<Self> {
        Axis::new(value)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.5} {:.5} {:.5}]",
            self.0[0], self.0[1], self.0[2]
        )
    }
}
