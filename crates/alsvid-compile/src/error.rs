//! Error types for the compilation passes.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur during compilation passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A decomposer's replacement does not act on the gate's operand qubits.
    #[error("replacement for gate '{gate}' does not operate on the right qubits")]
    BadReplacementOperands {
        /// Name of the gate being replaced.
        gate: String,
    },

    /// A decomposer's replacement would change the quantum state.
    #[error("replacement for gate '{gate}' does not preserve the quantum state")]
    NonUnitaryPreserving {
        /// Name of the gate being replaced.
        gate: String,
    },

    /// The router could not connect two interacting qubits.
    #[error("no routing path available between qubit {qubit_0} and qubit {qubit_1}")]
    NoRoutingPath {
        /// First logical qubit.
        qubit_0: u32,
        /// Second logical qubit.
        qubit_1: u32,
    },

    /// The MIP mapper has no feasible placement.
    #[error("no feasible mapping: {virtual_qubits} virtual qubits exceed {physical_qubits} physical qubits")]
    MipInfeasible {
        /// Number of virtual qubits to place.
        virtual_qubits: u32,
        /// Number of physical qubits available.
        physical_qubits: u32,
    },

    /// The MIP mapper exceeded its time limit.
    #[error("MIP mapper timed out before finding an optimal mapping")]
    MipTimeout,

    /// Gates outside the primitive gate set.
    #[error("the following gates are not in the primitive gate set: {}", names.join(", "))]
    GatesNotInPrimitiveSet {
        /// Offending gate names, deduplicated.
        names: Vec<String>,
    },

    /// Two-qubit interactions not present in the connectivity.
    #[error("the following qubit interactions prevent a 1-to-1 mapping: {pairs:?}")]
    NonExecutableInteractions {
        /// Offending (qubit, qubit) pairs, deduplicated.
        pairs: Vec<(u32, u32)>,
    },

    /// A gate a pass or exporter cannot handle.
    #[error("unsupported gate: {0}")]
    UnsupportedGate(String),

    /// Malformed configuration (connectivity, mapping, register sizes).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying IR error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compilation passes.
pub type CompileResult<T> = Result<T, CompileError>;
