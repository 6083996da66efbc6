//! McKay decomposition: `Rz·X90·Rz·X90·Rz`.
//!
//! Relevant literature: <https://arxiv.org/abs/1612.00858>.

use std::f64::consts::PI;

use alsvid_ir::math::ATOL;
use alsvid_ir::{Gate, catalog, normalize_angle};

use super::aba::{RotationAxis, decomposition_angles, filter_out_identities};
use crate::pass::Decomposer;

/// Decomposes single-qubit gates into the `{Rz, X90}` basis.
///
/// `Rz` and `X90` pass through untouched since they are native to the target
/// basis. The global phase is deemed irrelevant; outputs are equivalent to
/// their inputs modulo a global phase.
pub struct McKayDecomposer;

impl Decomposer for McKayDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        let Gate::BlochSphereRotation(rotation) = gate else {
            return vec![gate.clone()];
        };
        let qubit = rotation.qubit;

        if let Gate::BlochSphereRotation(x90) = catalog::x90(qubit) {
            if rotation.same_rotation(&x90) {
                return vec![gate.clone()];
            }
        }

        if rotation.angle.abs() < ATOL {
            return vec![catalog::i(qubit)];
        }

        // Rotations along ±Ẑ reduce to a single Rz.
        if rotation.axis[0].abs() < ATOL && rotation.axis[1].abs() < ATOL {
            return vec![catalog::rz(qubit, rotation.angle * rotation.axis[2])];
        }

        // When the ZXZ middle angle is exactly a quarter turn, the X rotation
        // already is an X90.
        let (zxz_1, zxz_2, zxz_3) = decomposition_angles(
            RotationAxis::Z,
            RotationAxis::X,
            rotation.angle,
            &rotation.axis,
        );
        if (zxz_2 - PI / 2.0).abs() < ATOL {
            return filter_out_identities(vec![
                catalog::rz(qubit, zxz_1),
                catalog::x90(qubit),
                catalog::rz(qubit, zxz_3),
            ]);
        }

        let (sin_half, cos_half) = (rotation.angle / 2.0).sin_cos();
        let [nx, ny, nz] = rotation.axis.value();

        let za_mod = (cos_half.powi(2) + (nz * sin_half).powi(2)).sqrt();
        let zb_mod = sin_half.abs() * (nx * nx + ny * ny).sqrt();

        let theta = normalize_angle(PI - 2.0 * f64::atan2(zb_mod, za_mod));

        let alpha = f64::atan2(-sin_half * nz, cos_half);
        let beta = f64::atan2(-sin_half * nx, -sin_half * ny);

        let lambda = normalize_angle(beta - alpha);
        let phi = normalize_angle(-beta - alpha - PI);

        if theta.abs() < ATOL && (lambda - phi).abs() < ATOL {
            return vec![catalog::x90(qubit), catalog::x90(qubit)];
        }

        let mut decomposition = Vec::with_capacity(5);
        if lambda.abs() > ATOL {
            decomposition.push(catalog::rz(qubit, lambda));
        }
        decomposition.push(catalog::x90(qubit));
        if theta.abs() > ATOL {
            decomposition.push(catalog::rz(qubit, theta));
        }
        decomposition.push(catalog::x90(qubit));
        if phi.abs() > ATOL {
            decomposition.push(catalog::rz(qubit, phi));
        }
        decomposition
    }
}
