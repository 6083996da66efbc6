//! Alsvid Compilation Passes
//!
//! This crate provides the pass framework and the concrete analysis and
//! rewriting passes of the Alsvid quantum-circuit compiler.
//!
//! # Pass shapes
//!
//! Every pass is one of five trait shapes ([`Decomposer`], [`Merger`],
//! [`Router`], [`Mapper`], [`Validator`]); see [`pass`]. Decomposer outputs
//! go through the central replacement loop in [`replace`], which numerically
//! verifies that each local rewrite preserves the quantum state up to a
//! global phase on the gate's operand support, and accounts the measured
//! phase into a per-qubit [`PhaseMap`].
//!
//! # Built-in passes
//!
//! - **Mergers**: [`passes::merger::SingleQubitGatesMerger`], plus barrier
//!   rearrangement helpers.
//! - **Decomposers**: the ABA family (ZYZ, XYX, YZY, XZX, YXY, ZXZ),
//!   [`passes::decomposer::McKayDecomposer`] (`Rz`/`X90` basis),
//!   ABC decompositions into CNOT or CZ, and the fixed CNOT↔CZ and
//!   SWAP rewrites.
//! - **Routers**: [`passes::router::ShortestPathRouter`] (BFS) and
//!   [`passes::router::AStarRouter`] over a [`Connectivity`] graph.
//! - **Mappers**: identity, hardcoded, random, and the MIP initial placement.
//! - **Validators**: primitive-gate set and interaction/connectivity checks.
//!
//! # Example
//!
//! ```rust
//! use alsvid_compile::passes::decomposer::McKayDecomposer;
//! use alsvid_compile::{PhaseMap, replace};
//! use alsvid_ir::{Ir, Qubit, catalog};
//!
//! let mut ir = Ir::new();
//! ir.add_gate(catalog::h(Qubit(0)));
//!
//! let mut phase_map = PhaseMap::new(1);
//! replace::decompose(&mut ir, &mut phase_map, &McKayDecomposer).unwrap();
//! assert_eq!(ir.statements.len(), 3); // Rz · X90 · Rz
//! ```

pub mod connectivity;
pub mod error;
pub mod pass;
pub mod phase;
pub mod replace;

// Built-in passes
pub mod passes;

pub use connectivity::Connectivity;
pub use error::{CompileError, CompileResult};
pub use pass::{Decomposer, Mapper, Merger, Router, Validator};
pub use passes::mapper::{Mapping, remap_ir};
pub use phase::PhaseMap;
