//! Statements: the effectful nodes of the IR tree.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::expression::Expression;
use crate::gate::Gate;
use crate::qubit::{Bit, Qubit};

/// A measurement of `qubit` along `axis` into `bit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Measured qubit.
    pub qubit: Qubit,
    /// Destination classical bit.
    pub bit: Bit,
    /// Measurement axis; the default is Ẑ.
    pub axis: Axis,
}

impl Measure {
    /// A Z-basis measurement.
    pub fn new(qubit: Qubit, bit: Bit) -> Self {
        Self {
            qubit,
            bit,
            axis: Axis::Z,
        }
    }
}

/// State initialization of a single qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Init {
    /// The initialized qubit.
    pub qubit: Qubit,
}

/// Reset of a single qubit to |0⟩.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reset {
    /// The reset qubit.
    pub qubit: Qubit,
}

/// Scheduling barrier on a single qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    /// The barriered qubit.
    pub qubit: Qubit,
}

/// Idle wait on a single qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wait {
    /// The waiting qubit.
    pub qubit: Qubit,
    /// Wait duration in backend cycles.
    pub time: i64,
}

/// Non-unitary instructions. Each carries its single qubit operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NonUnitary {
    /// Measurement.
    Measure(Measure),
    /// Initialization.
    Init(Init),
    /// Reset.
    Reset(Reset),
    /// Barrier.
    Barrier(Barrier),
    /// Wait.
    Wait(Wait),
}

impl NonUnitary {
    /// The instruction name, as emitted in cQASM.
    pub fn name(&self) -> &'static str {
        match self {
            NonUnitary::Measure(_) => "measure",
            NonUnitary::Init(_) => "init",
            NonUnitary::Reset(_) => "reset",
            NonUnitary::Barrier(_) => "barrier",
            NonUnitary::Wait(_) => "wait",
        }
    }

    /// The single qubit operand.
    pub fn qubit(&self) -> Qubit {
        match self {
            NonUnitary::Measure(m) => m.qubit,
            NonUnitary::Init(i) => i.qubit,
            NonUnitary::Reset(r) => r.qubit,
            NonUnitary::Barrier(b) => b.qubit,
            NonUnitary::Wait(w) => w.qubit,
        }
    }

    /// Mutable access to the qubit operand (used by index remapping).
    pub fn qubit_mut(&mut self) -> &mut Qubit {
        match self {
            NonUnitary::Measure(m) => &mut m.qubit,
            NonUnitary::Init(i) => &mut i.qubit,
            NonUnitary::Reset(r) => &mut r.qubit,
            NonUnitary::Barrier(b) => &mut b.qubit,
            NonUnitary::Wait(w) => &mut w.qubit,
        }
    }

    /// The bit operands (non-empty only for measurements).
    pub fn bit_operands(&self) -> Vec<Bit> {
        match self {
            NonUnitary::Measure(m) => vec![m.bit],
            _ => vec![],
        }
    }

    /// The constructor arguments, as expression leaves.
    pub fn arguments(&self) -> Vec<Expression> {
        match self {
            NonUnitary::Measure(m) => {
                vec![Expression::Qubit(m.qubit), Expression::Bit(m.bit)]
            }
            NonUnitary::Init(i) => vec![Expression::Qubit(i.qubit)],
            NonUnitary::Reset(r) => vec![Expression::Qubit(r.qubit)],
            NonUnitary::Barrier(b) => vec![Expression::Qubit(b.qubit)],
            NonUnitary::Wait(w) => {
                vec![Expression::Qubit(w.qubit), Expression::Int(w.time)]
            }
        }
    }
}

/// An opaque assembly passthrough for a named backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsmDeclaration {
    /// Name of the backend that processes the code block.
    pub backend_name: String,
    /// Raw backend code, passed through verbatim.
    pub backend_code: String,
}

/// A statement of the circuit body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Backend assembly passthrough.
    Asm(AsmDeclaration),
    /// A unitary gate.
    Gate(Gate),
    /// A non-unitary instruction.
    NonUnitary(NonUnitary),
}

impl Statement {
    /// The instruction name, or `None` for assembly declarations.
    pub fn instruction_name(&self) -> Option<&'static str> {
        match self {
            Statement::Asm(_) => None,
            Statement::Gate(g) => Some(g.name()),
            Statement::NonUnitary(nu) => Some(nu.name()),
        }
    }

    /// The qubit operands touched by this statement.
    pub fn qubit_operands(&self) -> Vec<Qubit> {
        match self {
            Statement::Asm(_) => vec![],
            Statement::Gate(g) => g.qubit_operands(),
            Statement::NonUnitary(nu) => vec![nu.qubit()],
        }
    }

    /// Rewrite every qubit operand through `f`. Assembly declarations are
    /// left untouched.
    pub fn map_qubits(&mut self, f: &mut dyn FnMut(Qubit) -> Qubit) {
        match self {
            Statement::Asm(_) => {}
            Statement::Gate(g) => g.map_qubits(f),
            Statement::NonUnitary(nu) => {
                let qubit = nu.qubit_mut();
                *qubit = f(*qubit);
            }
        }
    }

    /// The gate held by this statement, if any.
    pub fn as_gate(&self) -> Option<&Gate> {
        match self {
            Statement::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Check whether this statement is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self, Statement::NonUnitary(NonUnitary::Barrier(_)))
    }
}

impl From<Gate> for Statement {
    fn from(gate: Gate) -> Self {
        Statement::Gate(gate)
    }
}

impl From<NonUnitary> for Statement {
    fn from(nu: NonUnitary) -> Self {
        Statement::NonUnitary(nu)
    }
}
