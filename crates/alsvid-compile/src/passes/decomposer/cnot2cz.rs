//! Predefined decomposition of CNOT into CZ with Y rotations.

use std::f64::consts::PI;

use alsvid_ir::{Gate, catalog};

use crate::pass::Decomposer;

/// Rewrites `CNOT(c, t)` as `Ry(t, −π/2)·CZ(c, t)·Ry(t, π/2)`.
///
/// ```text
/// ---•---     -----------------•----------------
///    |     →                   |
/// ---⊕---     --[Ry(-pi/2)]---[Z]---[Ry(pi/2)]--
/// ```
///
/// This decomposition preserves the global phase of the CNOT gate. Works on
/// any gate named `CNOT`, whether controlled or written as a matrix.
pub struct Cnot2CzDecomposer;

impl Decomposer for Cnot2CzDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        if gate.name() != "CNOT" {
            return vec![gate.clone()];
        }
        let operands = gate.qubit_operands();
        let [control, target] = operands[..] else {
            return vec![gate.clone()];
        };
        let Ok(cz) = catalog::cz(control, target) else {
            return vec![gate.clone()];
        };
        vec![
            catalog::ry(target, -PI / 2.0),
            cz,
            catalog::ry(target, PI / 2.0),
        ]
    }
}
