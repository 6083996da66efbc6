//! Error types for the IR crate.

use crate::qubit::{Bit, Qubit};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Axis vector is zero (or numerically indistinguishable from zero).
    #[error("axis requires at least one component to be non-zero")]
    InvalidAxis,

    /// A matrix gate was built with a matrix of the wrong dimension.
    #[error("matrix gate on {operands} qubits requires a {expected}x{expected} matrix, got {got}x{got}")]
    MatrixShapeMismatch {
        /// Number of qubit operands.
        operands: usize,
        /// Expected matrix dimension.
        expected: usize,
        /// Actual matrix dimension.
        got: usize,
    },

    /// A gate was built with repeated qubit operands.
    #[error("duplicate qubit {qubit:?} in gate operands")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: Qubit,
    },

    /// A matrix gate was built with fewer than two operands.
    #[error("matrix gates require at least 2 operands; use a Bloch sphere rotation for 1-qubit gates")]
    TooFewOperands,

    /// Qubit index exceeds the register size.
    #[error("qubit {qubit:?} exceeds register size {size}")]
    QubitOutOfBounds {
        /// The offending qubit.
        qubit: Qubit,
        /// Total qubit register size.
        size: u32,
    },

    /// Bit index exceeds the register size.
    #[error("bit {bit:?} exceeds register size {size}")]
    BitOutOfBounds {
        /// The offending bit.
        bit: Bit,
        /// Total bit register size.
        size: u32,
    },

    /// Local index exceeds the size of a named register.
    #[error("index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        /// Register name.
        register: String,
        /// Offending local index.
        index: u32,
        /// Register size.
        size: u32,
    },

    /// A register with the same name and kind already exists.
    #[error("duplicate register '{0}'")]
    DuplicateRegister(String),

    /// No register with the given name exists.
    #[error("unknown register '{0}'")]
    UnknownRegister(String),

    /// A qubit was not found in a reindexing map.
    #[error("qubit {qubit:?} does not appear in the reindexing operand list")]
    UnknownQubit {
        /// The missing qubit.
        qubit: Qubit,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
