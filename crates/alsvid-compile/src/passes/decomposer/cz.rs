//! ABC decomposition of controlled rotations into CZ + Rx/Ry.
//!
//! Structurally mirrors the CNOT decomposer with XYX angles of `Z·U` for the
//! single-CZ special case.

use std::f64::consts::PI;

use alsvid_ir::{Gate, catalog};

use super::aba::{RotationAxis, decomposition_angles, filter_out_identities};
use super::cnot::{is_multiple_of_tau, target_rotation};
use crate::pass::Decomposer;
use crate::passes::merger::compose_bloch_sphere_rotations;

/// Decomposes two-qubit controlled rotations to CZ + Rx/Ry.
///
/// Applying single-qubit gate fusion after this pass might be beneficial.
/// Controlled gates with nested controls and matrix gates pass through.
pub struct CzDecomposer;

impl Decomposer for CzDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        let Some((control, target)) = target_rotation(gate) else {
            return vec![gate.clone()];
        };
        let qubit = target.qubit;

        // Single-CZ special case: V = A·Z·B·Z with A·B = I, found through the
        // XYX angles of the target followed by Z.
        let Gate::BlochSphereRotation(z) = catalog::z(qubit) else {
            unreachable!("Z is a rotation");
        };
        let times_z = compose_bloch_sphere_rotations(&z, target);
        let (theta_0_z, theta_1_z, theta_2_z) = decomposition_angles(
            RotationAxis::X,
            RotationAxis::Y,
            times_z.angle,
            &times_z.axis,
        );
        let Ok(cz) = catalog::cz(control, qubit) else {
            return vec![gate.clone()];
        };
        if is_multiple_of_tau(theta_0_z - theta_2_z) {
            return filter_out_identities(vec![
                // B
                catalog::rx(qubit, -theta_2_z),
                catalog::ry(qubit, -theta_1_z / 2.0),
                cz,
                // A
                catalog::ry(qubit, theta_1_z / 2.0),
                catalog::rx(qubit, theta_2_z),
                catalog::rz(control, target.phase - PI / 2.0),
            ]);
        }

        let (theta_0, theta_1, theta_2) = decomposition_angles(
            RotationAxis::X,
            RotationAxis::Y,
            target.angle,
            &target.axis,
        );
        filter_out_identities(vec![
            // C
            catalog::rx(qubit, (theta_0 - theta_2) / 2.0),
            cz.clone(),
            // B
            catalog::rx(qubit, -(theta_0 + theta_2) / 2.0),
            catalog::ry(qubit, -theta_1 / 2.0),
            cz,
            // A
            catalog::ry(qubit, theta_1 / 2.0),
            catalog::rx(qubit, theta_2),
            catalog::rz(control, target.phase),
        ])
    }
}
