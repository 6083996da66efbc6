//! ABC decomposition of controlled rotations into CNOT + Rz/Ry.
//!
//! Source of the math: <https://threeplusone.com/pubs/on_gates.pdf>,
//! chapter 7.5 "ABC decomposition".

use std::f64::consts::{PI, TAU};

use alsvid_ir::math::ATOL;
use alsvid_ir::{BlochSphereRotation, Gate, catalog};

use super::aba::{RotationAxis, decomposition_angles, filter_out_identities};
use crate::pass::Decomposer;
use crate::passes::merger::compose_bloch_sphere_rotations;

/// Decomposes two-qubit controlled rotations to CNOT + Rz/Ry.
///
/// Applying single-qubit gate fusion after this pass might be beneficial.
/// Controlled gates with nested controls and matrix gates pass through.
pub struct CnotDecomposer;

impl Decomposer for CnotDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        let Gate::Controlled(controlled) = gate else {
            return vec![gate.clone()];
        };
        let Gate::BlochSphereRotation(target) = controlled.target_gate.as_ref() else {
            // 2+ control qubits (or a matrix target) are out of scope.
            return vec![gate.clone()];
        };
        let control = controlled.control_qubit;
        let qubit = target.qubit;

        // Single-CNOT special case (Barenco et al., lemma 5.5): ZYZ of X
        // followed by the target rotation.
        let Gate::BlochSphereRotation(x) = catalog::x(qubit) else {
            unreachable!("X is a rotation");
        };
        let times_x = compose_bloch_sphere_rotations(&x, target);
        let (theta_0_x, theta_1_x, theta_2_x) = decomposition_angles(
            RotationAxis::Z,
            RotationAxis::Y,
            times_x.angle,
            &times_x.axis,
        );
        let Ok(cnot) = catalog::cnot(control, qubit) else {
            return vec![gate.clone()];
        };
        if is_multiple_of_tau(theta_0_x - theta_2_x) {
            return filter_out_identities(vec![
                catalog::rz(qubit, theta_2_x),
                catalog::ry(qubit, theta_1_x / 2.0),
                cnot,
                catalog::ry(qubit, -theta_1_x / 2.0),
                catalog::rz(qubit, -theta_2_x),
                catalog::rz(control, target.phase - PI / 2.0),
            ]);
        }

        let (theta_0, theta_1, theta_2) = decomposition_angles(
            RotationAxis::Z,
            RotationAxis::Y,
            target.angle,
            &target.axis,
        );
        filter_out_identities(vec![
            // C
            catalog::rz(qubit, (theta_0 - theta_2) / 2.0),
            cnot.clone(),
            // B
            catalog::rz(qubit, -(theta_0 + theta_2) / 2.0),
            catalog::ry(qubit, -theta_1 / 2.0),
            cnot,
            // A
            catalog::ry(qubit, theta_1 / 2.0),
            catalog::rz(qubit, theta_2),
            catalog::rz(control, target.phase),
        ])
    }
}

/// Check `value ≈ 0 (mod 2π)`, accepting residues near either end.
pub(crate) fn is_multiple_of_tau(value: f64) -> bool {
    let residue = value.rem_euclid(TAU);
    residue < ATOL || TAU - residue < ATOL
}

pub(crate) fn target_rotation(gate: &Gate) -> Option<(alsvid_ir::Qubit, &BlochSphereRotation)> {
    let Gate::Controlled(controlled) = gate else {
        return None;
    };
    match controlled.target_gate.as_ref() {
        Gate::BlochSphereRotation(target) => Some((controlled.control_qubit, target)),
        _ => None,
    }
}
