//! The default gate catalog.
//!
//! Each constructor builds a named gate from a typed argument tuple. The
//! catalog is a compile-time table; aliases are handled by the frontends.

use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

use num_complex::Complex64;

use crate::axis::Axis;
use crate::error::IrResult;
use crate::expression::Expression;
use crate::gate::{BlochSphereRotation, ControlledGate, Gate, GateName, MatrixGate};
use crate::math::ATOL;
use crate::qubit::Qubit;
use crate::unitary::Unitary;

const H_AXIS: Axis = Axis::from_normalized([FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2]);

/// Axis, angle and phase of every parameter-free default rotation, in the
/// order used by named-gate matching.
const BSR_NO_PARAMS: [(GateName, Axis, f64, f64); 13] = [
    (GateName::H, H_AXIS, PI, PI / 2.0),
    (GateName::I, Axis::X, 0.0, 0.0),
    (GateName::S, Axis::Z, PI / 2.0, 0.0),
    (GateName::Sdag, Axis::Z, -PI / 2.0, 0.0),
    (GateName::T, Axis::Z, PI / 4.0, 0.0),
    (GateName::Tdag, Axis::Z, -PI / 4.0, 0.0),
    (GateName::X, Axis::X, PI, PI / 2.0),
    (GateName::X90, Axis::X, PI / 2.0, 0.0),
    (GateName::Y, Axis::Y, PI, PI / 2.0),
    (GateName::Y90, Axis::Y, PI / 2.0, 0.0),
    (GateName::Z, Axis::Z, PI, PI / 2.0),
    (GateName::MX90, Axis::X, -PI / 2.0, 0.0),
    (GateName::MY90, Axis::Y, -PI / 2.0, 0.0),
];

/// Axes of the one-angle default rotations.
const BSR_ANGLE_PARAM: [(GateName, Axis); 3] = [
    (GateName::Rx, Axis::X),
    (GateName::Ry, Axis::Y),
    (GateName::Rz, Axis::Z),
];

fn named_bsr(name: GateName, qubit: Qubit, axis: Axis, angle: f64, phase: f64) -> Gate {
    Gate::BlochSphereRotation(BlochSphereRotation::named(name, qubit, axis, angle, phase))
}

/// Identity gate.
pub fn i(qubit: Qubit) -> Gate {
    Gate::BlochSphereRotation(BlochSphereRotation::identity(qubit))
}

/// Hadamard gate.
pub fn h(qubit: Qubit) -> Gate {
    named_bsr(GateName::H, qubit, H_AXIS, PI, PI / 2.0)
}

/// Pauli-X gate.
pub fn x(qubit: Qubit) -> Gate {
    named_bsr(GateName::X, qubit, Axis::X, PI, PI / 2.0)
}

/// +90° X rotation.
pub fn x90(qubit: Qubit) -> Gate {
    named_bsr(GateName::X90, qubit, Axis::X, PI / 2.0, 0.0)
}

/// −90° X rotation.
pub fn mx90(qubit: Qubit) -> Gate {
    named_bsr(GateName::MX90, qubit, Axis::X, -PI / 2.0, 0.0)
}

/// Pauli-Y gate.
pub fn y(qubit: Qubit) -> Gate {
    named_bsr(GateName::Y, qubit, Axis::Y, PI, PI / 2.0)
}

/// +90° Y rotation.
pub fn y90(qubit: Qubit) -> Gate {
    named_bsr(GateName::Y90, qubit, Axis::Y, PI / 2.0, 0.0)
}

/// −90° Y rotation.
pub fn my90(qubit: Qubit) -> Gate {
    named_bsr(GateName::MY90, qubit, Axis::Y, -PI / 2.0, 0.0)
}

/// Pauli-Z gate.
pub fn z(qubit: Qubit) -> Gate {
    named_bsr(GateName::Z, qubit, Axis::Z, PI, PI / 2.0)
}

/// S gate.
pub fn s(qubit: Qubit) -> Gate {
    named_bsr(GateName::S, qubit, Axis::Z, PI / 2.0, 0.0)
}

/// S-dagger gate.
pub fn sdag(qubit: Qubit) -> Gate {
    named_bsr(GateName::Sdag, qubit, Axis::Z, -PI / 2.0, 0.0)
}

/// T gate.
pub fn t(qubit: Qubit) -> Gate {
    named_bsr(GateName::T, qubit, Axis::Z, PI / 4.0, 0.0)
}

/// T-dagger gate.
pub fn tdag(qubit: Qubit) -> Gate {
    named_bsr(GateName::Tdag, qubit, Axis::Z, -PI / 4.0, 0.0)
}

/// X rotation by `theta`.
pub fn rx(qubit: Qubit, theta: f64) -> Gate {
    named_bsr(GateName::Rx, qubit, Axis::X, theta, 0.0)
}

/// Y rotation by `theta`.
pub fn ry(qubit: Qubit, theta: f64) -> Gate {
    named_bsr(GateName::Ry, qubit, Axis::Y, theta, 0.0)
}

/// Z rotation by `theta`.
pub fn rz(qubit: Qubit, theta: f64) -> Gate {
    named_bsr(GateName::Rz, qubit, Axis::Z, theta, 0.0)
}

/// Rotation by `theta` around the axis `(nx, ny, nz)` with global phase `phi`.
pub fn rn(qubit: Qubit, nx: f64, ny: f64, nz: f64, theta: f64, phi: f64) -> IrResult<Gate> {
    let axis = Axis::new([nx, ny, nz])?;
    Ok(named_bsr(GateName::Rn, qubit, axis, theta, phi))
}

/// Two-qubit SWAP gate.
pub fn swap(qubit_0: Qubit, qubit_1: Qubit) -> IrResult<Gate> {
    let rows = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into_iter()
    .flatten()
    .map(|v| Complex64::new(v, 0.0))
    .collect();
    let mut gate = MatrixGate::new(Unitary::from_rows(4, rows), vec![qubit_0, qubit_1])?;
    gate.name = Some(GateName::Swap);
    Ok(Gate::Matrix(gate))
}

/// Controlled-X gate.
pub fn cnot(control: Qubit, target: Qubit) -> IrResult<Gate> {
    let mut gate = ControlledGate::new(control, x(target))?;
    gate.name = Some(GateName::Cnot);
    Ok(Gate::Controlled(gate))
}

/// Controlled-Z gate.
pub fn cz(control: Qubit, target: Qubit) -> IrResult<Gate> {
    let mut gate = ControlledGate::new(control, z(target))?;
    gate.name = Some(GateName::Cz);
    Ok(Gate::Controlled(gate))
}

/// Controlled phase rotation by `theta`.
pub fn cr(control: Qubit, target: Qubit, theta: f64) -> IrResult<Gate> {
    let target_gate = Gate::BlochSphereRotation(BlochSphereRotation::new(
        target,
        Axis::Z,
        theta,
        theta / 2.0,
    ));
    let mut gate = ControlledGate::new(control, target_gate)?;
    gate.name = Some(GateName::Cr);
    gate.params = vec![Expression::Float(theta)];
    Ok(Gate::Controlled(gate))
}

/// Controlled phase rotation by `2π / 2^k`.
pub fn crk(control: Qubit, target: Qubit, k: i64) -> IrResult<Gate> {
    let theta = TAU / f64::powi(2.0, k as i32);
    let target_gate = Gate::BlochSphereRotation(BlochSphereRotation::new(
        target,
        Axis::Z,
        theta,
        theta / 2.0,
    ));
    let mut gate = ControlledGate::new(control, target_gate)?;
    gate.name = Some(GateName::Crk);
    gate.params = vec![Expression::Int(k)];
    Ok(Gate::Controlled(gate))
}

/// Doubly-controlled Z: `Controlled(control_0, CZ(control_1, target))`.
pub fn ccz(control_0: Qubit, control_1: Qubit, target: Qubit) -> IrResult<Gate> {
    let inner = cz(control_1, target)?;
    Ok(Gate::Controlled(ControlledGate::new(control_0, inner)?))
}

/// Try to replace a Bloch sphere rotation with the matching default gate.
///
/// Linearly searches the parameter-free table, then the one-angle table; when
/// `(axis, angle, phase)` match within `ATOL` the named gate is returned.
/// Falls back to `Rn` with the rotation's full parameters.
pub fn try_match_replace_with_default(bsr: &BlochSphereRotation) -> BlochSphereRotation {
    for (name, axis, angle, phase) in BSR_NO_PARAMS {
        if bsr.axis.close_to(&axis)
            && (bsr.angle - crate::math::normalize_angle(angle)).abs() < ATOL
            && (bsr.phase - crate::math::normalize_angle(phase)).abs() < ATOL
        {
            return BlochSphereRotation::named(name, bsr.qubit, axis, angle, phase);
        }
    }
    for (name, axis) in BSR_ANGLE_PARAM {
        if bsr.axis.close_to(&axis) && bsr.phase.abs() < ATOL {
            return BlochSphereRotation::named(name, bsr.qubit, axis, bsr.angle, 0.0);
        }
    }
    BlochSphereRotation {
        name: Some(GateName::Rn),
        ..bsr.clone()
    }
}
