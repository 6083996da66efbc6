//! Alsvid circuit intermediate representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Alsvid: the typed statement tree, the gate algebra, the
//! register layout, and the matrix expander used to verify rewrites.
//!
//! # Overview
//!
//! A circuit body is an [`Ir`]: an ordered list of [`Statement`]s. Statements
//! are either opaque [`AsmDeclaration`]s or instructions — unitary [`Gate`]s
//! and [`NonUnitary`] operations (measure, init, reset, barrier, wait).
//!
//! Gates come in three shapes, each a uniform algebraic object rather than a
//! per-gate class:
//!
//! - [`BlochSphereRotation`]: a single-qubit rotation given by a unit
//!   [`Axis`], an angle, and a global phase;
//! - [`MatrixGate`]: an explicit 2^k × 2^k unitary on k ≥ 2 qubits;
//! - [`ControlledGate`]: a control qubit wrapping another gate, recursively.
//!
//! Named catalog gates (H, X, CNOT, …) are instances of these shapes tagged
//! with a [`GateName`]; the constructors live in [`catalog`].
//!
//! # Gate equality
//!
//! `Gate` equality is *semantic*: two gates are equal when their unitaries
//! agree up to a global phase on the union of their operands (see
//! [`expand`]). Rotation pairs take an algebraic fast path.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Ir, Qubit, catalog};
//!
//! let mut ir = Ir::new();
//! ir.add_gate(catalog::h(Qubit(0)));
//! ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
//! assert_eq!(ir.statements.len(), 2);
//! ```

pub mod axis;
pub mod catalog;
pub mod error;
pub mod expand;
pub mod expression;
pub mod gate;
pub mod ir;
pub mod math;
pub mod qubit;
pub mod register;
pub mod statement;
pub mod unitary;

pub use axis::Axis;
pub use error::{IrError, IrResult};
pub use expression::Expression;
pub use gate::{BlochSphereRotation, ControlledGate, Gate, GateName, MatrixGate};
pub use ir::{Ir, Visitor};
pub use math::{ATOL, normalize_angle};
pub use qubit::{Bit, Qubit};
pub use register::{Register, RegisterKind, RegisterManager};
pub use statement::{
    AsmDeclaration, Barrier, Init, Measure, NonUnitary, Reset, Statement, Wait,
};
pub use unitary::{Unitary, can1};
