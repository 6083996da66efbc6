//! The circuit IR: an ordered statement list with visitor dispatch.

use serde::{Deserialize, Serialize};

use crate::gate::{BlochSphereRotation, ControlledGate, Gate, MatrixGate};
use crate::statement::{
    AsmDeclaration, Barrier, Init, Measure, NonUnitary, Reset, Statement, Wait,
};

/// Ordered list of circuit statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ir {
    /// The statements, in program order.
    pub statements: Vec<Statement>,
}

impl Ir {
    /// Create an empty IR.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a gate.
    pub fn add_gate(&mut self, gate: Gate) {
        self.statements.push(Statement::Gate(gate));
    }

    /// Append a non-unitary instruction.
    pub fn add_non_unitary(&mut self, non_unitary: NonUnitary) {
        self.statements.push(Statement::NonUnitary(non_unitary));
    }

    /// Append an assembly declaration.
    pub fn add_asm_declaration(&mut self, asm: AsmDeclaration) {
        self.statements.push(Statement::Asm(asm));
    }

    /// Append any statement.
    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Walk all statements in order with a visitor.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for statement in &self.statements {
            visitor.visit_statement(statement);
        }
    }
}

/// Read-only visitor over the IR tree.
///
/// Every method has a default implementation; dispatch happens through
/// `visit_statement` / `visit_gate` / `visit_non_unitary`, so an
/// implementation only overrides the nodes it cares about. Overriding one of
/// the dispatching methods takes over dispatch for that subtree.
pub trait Visitor {
    /// Visit a statement, dispatching on its variant.
    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Asm(asm) => self.visit_asm_declaration(asm),
            Statement::Gate(gate) => self.visit_gate(gate),
            Statement::NonUnitary(nu) => self.visit_non_unitary(nu),
        }
    }

    /// Visit an assembly declaration.
    fn visit_asm_declaration(&mut self, _asm: &AsmDeclaration) {}

    /// Visit a gate, dispatching on its shape.
    fn visit_gate(&mut self, gate: &Gate) {
        match gate {
            Gate::BlochSphereRotation(bsr) => self.visit_bloch_sphere_rotation(bsr),
            Gate::Matrix(m) => self.visit_matrix_gate(m),
            Gate::Controlled(c) => self.visit_controlled_gate(c),
        }
    }

    /// Visit a Bloch sphere rotation.
    fn visit_bloch_sphere_rotation(&mut self, _gate: &BlochSphereRotation) {}

    /// Visit a matrix gate.
    fn visit_matrix_gate(&mut self, _gate: &MatrixGate) {}

    /// Visit a controlled gate.
    fn visit_controlled_gate(&mut self, _gate: &ControlledGate) {}

    /// Visit a non-unitary instruction, dispatching on its variant.
    fn visit_non_unitary(&mut self, non_unitary: &NonUnitary) {
        match non_unitary {
            NonUnitary::Measure(m) => self.visit_measure(m),
            NonUnitary::Init(i) => self.visit_init(i),
            NonUnitary::Reset(r) => self.visit_reset(r),
            NonUnitary::Barrier(b) => self.visit_barrier(b),
            NonUnitary::Wait(w) => self.visit_wait(w),
        }
    }

    /// Visit a measurement.
    fn visit_measure(&mut self, _measure: &Measure) {}

    /// Visit an initialization.
    fn visit_init(&mut self, _init: &Init) {}

    /// Visit a reset.
    fn visit_reset(&mut self, _reset: &Reset) {}

    /// Visit a barrier.
    fn visit_barrier(&mut self, _barrier: &Barrier) {}

    /// Visit a wait.
    fn visit_wait(&mut self, _wait: &Wait) {}
}
