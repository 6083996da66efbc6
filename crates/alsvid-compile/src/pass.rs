//! The five pass shapes of the compiler.
//!
//! Every pass over a circuit is one of these traits. Decomposers are purely
//! local gate rewrites checked by the replacement loop in [`crate::replace`];
//! mergers and routers mutate the whole statement list in place; mappers are
//! pure and produce a [`Mapping`]; validators are read-only checks.

use alsvid_ir::{Gate, Ir};

use crate::error::CompileResult;
use crate::passes::mapper::Mapping;

/// A local gate rewriter.
///
/// Returning `vec![gate.clone()]` means "leave the gate alone". Every
/// replacement is verified by the replacement loop to preserve the quantum
/// state up to a global phase.
pub trait Decomposer {
    /// Decompose a single gate into an equivalent gate sequence.
    fn decompose(&self, gate: &Gate) -> Vec<Gate>;
}

/// A whole-IR mutator that fuses statements.
pub trait Merger {
    /// Merge statements of `ir` in place.
    fn merge(&self, ir: &mut Ir, qubit_register_size: u32) -> CompileResult<()>;
}

/// A whole-IR mutator that makes two-qubit gates executable on a
/// connectivity, inserting SWAPs and relabeling qubit indices.
pub trait Router {
    /// Route `ir` in place.
    fn route(&self, ir: &mut Ir, qubit_register_size: u32) -> CompileResult<()>;
}

/// A pure analysis producing an initial virtual→physical placement.
///
/// Mappers must not mutate the IR; applying the mapping is a separate step
/// (see [`crate::passes::mapper::remap_ir`]).
pub trait Mapper {
    /// Compute a mapping for the circuit.
    fn map(&self, ir: &Ir, qubit_register_size: u32) -> CompileResult<Mapping>;
}

/// A read-only circuit check.
pub trait Validator {
    /// Validate `ir`, failing with a `CompileError` carrying the offending
    /// set on violation.
    fn validate(&self, ir: &Ir) -> CompileResult<()>;
}
