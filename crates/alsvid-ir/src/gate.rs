//! Quantum gate types: the unitary algebra of the IR.
//!
//! Gates come in three shapes: single-qubit Bloch sphere rotations, raw
//! matrix gates on two or more qubits, and (recursively nestable) controlled
//! gates. Named catalog gates are ordinary instances of these shapes carrying
//! a [`GateName`] tag; a gate without a tag is *anonymous*.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{IrError, IrResult};
use crate::expand;
use crate::expression::Expression;
use crate::math::{ATOL, normalize_angle};
use crate::qubit::{Bit, Qubit};
use crate::unitary::Unitary;

/// Names of the default gate catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateName {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// +90° X rotation.
    X90,
    /// −90° X rotation.
    MX90,
    /// Pauli-Y.
    Y,
    /// +90° Y rotation.
    Y90,
    /// −90° Y rotation.
    MY90,
    /// Pauli-Z.
    Z,
    /// S gate (√Z).
    S,
    /// S-dagger.
    Sdag,
    /// T gate (⁴√Z).
    T,
    /// T-dagger.
    Tdag,
    /// X rotation by an angle parameter.
    Rx,
    /// Y rotation by an angle parameter.
    Ry,
    /// Z rotation by an angle parameter.
    Rz,
    /// Rotation around an arbitrary axis, fully parameterized.
    Rn,
    /// Two-qubit SWAP.
    Swap,
    /// Controlled-X.
    Cnot,
    /// Controlled-Z.
    Cz,
    /// Controlled phase rotation.
    Cr,
    /// Controlled phase rotation by 2π/2^k.
    Crk,
}

impl GateName {
    /// The stable catalog name, used for validator comparisons and emission.
    pub fn as_str(self) -> &'static str {
        match self {
            GateName::I => "I",
            GateName::H => "H",
            GateName::X => "X",
            GateName::X90 => "X90",
            GateName::MX90 => "mX90",
            GateName::Y => "Y",
            GateName::Y90 => "Y90",
            GateName::MY90 => "mY90",
            GateName::Z => "Z",
            GateName::S => "S",
            GateName::Sdag => "Sdag",
            GateName::T => "T",
            GateName::Tdag => "Tdag",
            GateName::Rx => "Rx",
            GateName::Ry => "Ry",
            GateName::Rz => "Rz",
            GateName::Rn => "Rn",
            GateName::Swap => "SWAP",
            GateName::Cnot => "CNOT",
            GateName::Cz => "CZ",
            GateName::Cr => "CR",
            GateName::Crk => "CRk",
        }
    }
}

/// A single-qubit rotation `exp(iφ)·(cos(θ/2)·I − i·sin(θ/2)·(n·σ))`.
///
/// Angle and phase are normalized to (−π, π] on construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlochSphereRotation {
    /// The qubit operand.
    pub qubit: Qubit,
    /// Unit rotation axis.
    pub axis: Axis,
    /// Rotation angle, normalized to (−π, π].
    pub angle: f64,
    /// Global phase, normalized to (−π, π].
    pub phase: f64,
    /// Catalog name tag; `None` for anonymous rotations.
    pub name: Option<GateName>,
}

impl BlochSphereRotation {
    /// Create an anonymous Bloch sphere rotation.
    pub fn new(qubit: Qubit, axis: Axis, angle: f64, phase: f64) -> Self {
        Self {
            qubit,
            axis,
            angle: normalize_angle(angle),
            phase: normalize_angle(phase),
            name: None,
        }
    }

    /// Create a named Bloch sphere rotation.
    pub fn named(name: GateName, qubit: Qubit, axis: Axis, angle: f64, phase: f64) -> Self {
        Self {
            name: Some(name),
            ..Self::new(qubit, axis, angle, phase)
        }
    }

    /// The identity rotation on `qubit`.
    pub fn identity(qubit: Qubit) -> Self {
        Self::named(GateName::I, qubit, Axis::X, 0.0, 0.0)
    }

    /// Check whether this rotation is the identity (angle and phase ≈ 0).
    pub fn is_identity(&self) -> bool {
        self.angle.abs() < ATOL && self.phase.abs() < ATOL
    }

    /// The 2×2 matrix of this rotation.
    pub fn matrix(&self) -> Unitary {
        crate::unitary::can1(&self.axis, self.angle, self.phase)
    }

    /// Equality of two rotations on the same qubit: parallel axes with
    /// matching signed angles, and matching phase, all within `ATOL`.
    pub fn same_rotation(&self, other: &BlochSphereRotation) -> bool {
        if self.qubit != other.qubit {
            return false;
        }
        if (self.phase - other.phase).abs() > ATOL {
            return false;
        }
        if self.axis.close_to(&other.axis) {
            return (self.angle - other.angle).abs() < ATOL;
        }
        if self.axis.close_to_negated(&other.axis) {
            return (self.angle + other.angle).abs() < ATOL;
        }
        false
    }
}

impl std::fmt::Display for BlochSphereRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BlochSphereRotation(qubit={}, axis={}, angle={}, phase={})",
            self.qubit,
            self.axis,
            round5(self.angle),
            round5(self.phase)
        )
    }
}

/// A gate given by an explicit 2^k × 2^k unitary on k ≥ 2 distinct qubits.
///
/// The first-listed operand corresponds to the *most significant* bit of the
/// small matrix (the conventional way CNOT-like matrices are written down).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixGate {
    /// The gate unitary, row-major.
    pub matrix: Unitary,
    /// Qubit operands, most significant small-matrix bit first.
    pub operands: Vec<Qubit>,
    /// Catalog name tag; `None` for anonymous matrix gates.
    pub name: Option<GateName>,
}

impl MatrixGate {
    /// Create an anonymous matrix gate.
    pub fn new(matrix: Unitary, operands: Vec<Qubit>) -> IrResult<Self> {
        if operands.len() < 2 {
            return Err(IrError::TooFewOperands);
        }
        if let Some(qubit) = first_duplicate(&operands) {
            return Err(IrError::DuplicateQubit { qubit });
        }
        let expected = 1usize << operands.len();
        if matrix.dim() != expected {
            return Err(IrError::MatrixShapeMismatch {
                operands: operands.len(),
                expected,
                got: matrix.dim(),
            });
        }
        Ok(Self {
            matrix,
            operands,
            name: None,
        })
    }

    /// Check whether the matrix is (exactly, within `ATOL`) the identity.
    pub fn is_identity(&self) -> bool {
        let dim = self.matrix.dim();
        let identity = Unitary::identity(dim);
        (0..dim).all(|r| (0..dim).all(|c| (self.matrix.get(r, c) - identity.get(r, c)).norm() < ATOL))
    }
}

impl std::fmt::Display for MatrixGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MatrixGate(qubits=[")?;
        for (i, q) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, "], matrix=[")?;
        for r in 0..self.matrix.dim() {
            write!(f, "[")?;
            for c in 0..self.matrix.dim() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", round_complex(self.matrix.get(r, c)))?;
            }
            write!(f, "]")?;
        }
        write!(f, "])")
    }
}

/// A controlled gate: applies `target_gate` when `control_qubit` is |1⟩.
///
/// Nestable: the target may itself be a controlled gate (CCZ = C(CZ)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlledGate {
    /// Control qubit, distinct from every target operand.
    pub control_qubit: Qubit,
    /// The controlled target gate.
    pub target_gate: Box<Gate>,
    /// Catalog name tag; `None` for anonymous controlled gates.
    pub name: Option<GateName>,
    /// Constructor parameters of named variants (CR theta, CRk k).
    pub params: Vec<Expression>,
}

impl ControlledGate {
    /// Create an anonymous controlled gate.
    pub fn new(control_qubit: Qubit, target_gate: Gate) -> IrResult<Self> {
        if target_gate.qubit_operands().contains(&control_qubit) {
            return Err(IrError::DuplicateQubit {
                qubit: control_qubit,
            });
        }
        Ok(Self {
            control_qubit,
            target_gate: Box::new(target_gate),
            name: None,
            params: vec![],
        })
    }

    /// Check whether the controlled gate is the identity.
    pub fn is_identity(&self) -> bool {
        self.target_gate.is_identity()
    }
}

impl std::fmt::Display for ControlledGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ControlledGate(control_qubit={}, target_gate={})",
            self.control_qubit, self.target_gate
        )
    }
}

/// A quantum gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Gate {
    /// Single-qubit rotation.
    BlochSphereRotation(BlochSphereRotation),
    /// Explicit-matrix gate on ≥ 2 qubits.
    Matrix(MatrixGate),
    /// Controlled gate.
    Controlled(ControlledGate),
}

impl Gate {
    /// The catalog name tag, if any.
    pub fn gate_name(&self) -> Option<GateName> {
        match self {
            Gate::BlochSphereRotation(g) => g.name,
            Gate::Matrix(g) => g.name,
            Gate::Controlled(g) => g.name,
        }
    }

    /// The gate name used for emission and validator comparison.
    ///
    /// Anonymous gates report their shape name.
    pub fn name(&self) -> &'static str {
        match (self, self.gate_name()) {
            (_, Some(name)) => name.as_str(),
            (Gate::BlochSphereRotation(_), None) => "BlochSphereRotation",
            (Gate::Matrix(_), None) => "MatrixGate",
            (Gate::Controlled(_), None) => "ControlledGate",
        }
    }

    /// Check whether this gate has no catalog name.
    pub fn is_anonymous(&self) -> bool {
        self.gate_name().is_none()
    }

    /// Check whether this gate is the identity on its operands.
    pub fn is_identity(&self) -> bool {
        match self {
            Gate::BlochSphereRotation(g) => g.is_identity(),
            Gate::Matrix(g) => g.is_identity(),
            Gate::Controlled(g) => g.is_identity(),
        }
    }

    /// The qubit operands, in constructor order (controls first).
    pub fn qubit_operands(&self) -> Vec<Qubit> {
        match self {
            Gate::BlochSphereRotation(g) => vec![g.qubit],
            Gate::Matrix(g) => g.operands.clone(),
            Gate::Controlled(g) => {
                let mut operands = vec![g.control_qubit];
                operands.extend(g.target_gate.qubit_operands());
                operands
            }
        }
    }

    /// The bit operands. Always empty for unitary gates.
    pub fn bit_operands(&self) -> Vec<Bit> {
        vec![]
    }

    /// The constructor arguments of this gate, as expression leaves.
    pub fn arguments(&self) -> Vec<Expression> {
        match self {
            Gate::BlochSphereRotation(g) => {
                let mut args = vec![Expression::Qubit(g.qubit)];
                match g.name {
                    Some(GateName::Rx | GateName::Ry | GateName::Rz) => {
                        args.push(Expression::Float(g.angle));
                    }
                    Some(GateName::Rn) => {
                        let [nx, ny, nz] = g.axis.value();
                        args.extend([
                            Expression::Float(nx),
                            Expression::Float(ny),
                            Expression::Float(nz),
                            Expression::Float(g.angle),
                            Expression::Float(g.phase),
                        ]);
                    }
                    _ => {}
                }
                args
            }
            Gate::Matrix(g) => g.operands.iter().copied().map(Expression::Qubit).collect(),
            Gate::Controlled(g) => {
                let mut args: Vec<Expression> = self
                    .qubit_operands()
                    .into_iter()
                    .map(Expression::Qubit)
                    .collect();
                args.extend(g.params.iter().cloned());
                args
            }
        }
    }

    /// Rewrite every qubit operand through `f`, recursing into controlled
    /// targets.
    pub fn map_qubits(&mut self, f: &mut dyn FnMut(Qubit) -> Qubit) {
        match self {
            Gate::BlochSphereRotation(g) => g.qubit = f(g.qubit),
            Gate::Matrix(g) => {
                for q in &mut g.operands {
                    *q = f(*q);
                }
            }
            Gate::Controlled(g) => {
                g.control_qubit = f(g.control_qubit);
                g.target_gate.map_qubits(f);
            }
        }
    }

    /// Gate equality: matrix equivalence up to a global phase on the union of
    /// the operand qubits, with a fast path for rotation pairs.
    pub fn equivalent(&self, other: &Gate) -> bool {
        if let (Gate::BlochSphereRotation(a), Gate::BlochSphereRotation(b)) = (self, other) {
            return a.same_rotation(b);
        }

        let mut union = self.qubit_operands();
        for q in other.qubit_operands() {
            if !union.contains(&q) {
                union.push(q);
            }
        }
        union.sort_unstable();

        let matrix_of = |gate: &Gate| -> IrResult<Unitary> {
            let reindexed = expand::reindexed(std::slice::from_ref(gate), &union)?;
            expand::circuit_matrix(&reindexed, union.len() as u32)
        };
        match (matrix_of(self), matrix_of(other)) {
            (Ok(a), Ok(b)) => a.equivalent_up_to_global_phase(&b),
            _ => false,
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        self.equivalent(other)
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::BlochSphereRotation(g) => write!(f, "{g}"),
            Gate::Matrix(g) => write!(f, "{g}"),
            Gate::Controlled(g) => write!(f, "{g}"),
        }
    }
}

fn first_duplicate(qubits: &[Qubit]) -> Option<Qubit> {
    let mut seen = rustc_hash::FxHashSet::default();
    qubits.iter().copied().find(|q| !seen.insert(*q))
}

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

fn round_complex(value: Complex64) -> String {
    if value.im.abs() < 1e-12 {
        format!("{}", round5(value.re))
    } else {
        format!("{}", Complex64::new(round5(value.re), round5(value.im)))
    }
}
