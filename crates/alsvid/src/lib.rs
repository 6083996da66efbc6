//! Alsvid: a cQASM 3 quantum-circuit compiler
//!
//! Alsvid ingests a cQASM 3 program, lowers it to a typed intermediate
//! representation, runs a pipeline of analysis and rewriting passes over it
//! (merging, decomposition, routing, placement, validation), and re-emits
//! the transformed circuit as text.
//!
//! The central correctness mechanism is the verified replacement loop: every
//! local rewrite a decomposer produces is checked numerically — via the
//! matrix expander, on the gate's operand support — to preserve the quantum
//! state up to a global phase.
//!
//! # Example: merge, decompose, validate
//!
//! ```rust
//! use alsvid::compile::passes::decomposer::McKayDecomposer;
//! use alsvid::compile::passes::merger::SingleQubitGatesMerger;
//! use alsvid::compile::passes::validator::PrimitiveGateValidator;
//! use alsvid::Circuit;
//!
//! let mut circuit = Circuit::from_string(
//!     "version 3.0; qubit[2] q; Ry(1.5707963) q[0]; X q[0]; CNOT q[0], q[1]",
//! )
//! .unwrap();
//!
//! circuit.merge(&SingleQubitGatesMerger).unwrap();
//! circuit.decompose(&McKayDecomposer).unwrap();
//! circuit
//!     .validate(&PrimitiveGateValidator::new(["Rz", "X90", "CNOT"]))
//!     .unwrap();
//! ```
//!
//! # Crates
//!
//! - [`ir`]: the circuit IR (gate algebra, statements, registers, expander);
//! - [`cqasm`]: the cQASM 3 parser and writers;
//! - [`compile`]: the pass framework and the built-in passes;
//! - this crate: the [`Circuit`] facade and [`CircuitBuilder`].

pub mod builder;
pub mod circuit;

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, CircuitError, CircuitResult, ExportFormat};

pub use alsvid_compile as compile;
pub use alsvid_cqasm as cqasm;
pub use alsvid_ir as ir;
