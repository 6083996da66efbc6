//! Predefined SWAP decompositions.

use std::f64::consts::PI;

use alsvid_ir::{Gate, catalog};

use crate::pass::Decomposer;

/// Rewrites `SWAP(a, b)` as three CNOTs.
///
/// ```text
/// ---x---     ----•---[X]---•----
///    |     →      |    |    |
/// ---x---     ---[X]---•---[X]---
/// ```
///
/// This decomposition preserves the global phase of the SWAP gate.
pub struct Swap2CnotDecomposer;

impl Decomposer for Swap2CnotDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        if gate.name() != "SWAP" {
            return vec![gate.clone()];
        }
        let operands = gate.qubit_operands();
        let [qubit_0, qubit_1] = operands[..] else {
            return vec![gate.clone()];
        };
        match (
            catalog::cnot(qubit_0, qubit_1),
            catalog::cnot(qubit_1, qubit_0),
            catalog::cnot(qubit_0, qubit_1),
        ) {
            (Ok(a), Ok(b), Ok(c)) => vec![a, b, c],
            _ => vec![gate.clone()],
        }
    }
}

/// Rewrites `SWAP(a, b)` as a 9-gate Ry/CZ sequence.
///
/// ```text
/// ---x---     -------------•-[Ry(-pi/2)]-•-[Ry(+pi/2)]-•-------------
///    |     →               |             |             |
/// ---x---     -[Ry(-pi/2)]-•-[Ry(+pi/2)]-•-[Ry(-pi/2)]-•-[Ry(+pi/2)]-
/// ```
///
/// This decomposition preserves the global phase of the SWAP gate.
pub struct Swap2CzDecomposer;

impl Decomposer for Swap2CzDecomposer {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        if gate.name() != "SWAP" {
            return vec![gate.clone()];
        }
        let operands = gate.qubit_operands();
        let [qubit_0, qubit_1] = operands[..] else {
            return vec![gate.clone()];
        };
        let (Ok(cz_01a), Ok(cz_10), Ok(cz_01b)) = (
            catalog::cz(qubit_0, qubit_1),
            catalog::cz(qubit_1, qubit_0),
            catalog::cz(qubit_0, qubit_1),
        ) else {
            return vec![gate.clone()];
        };
        vec![
            catalog::ry(qubit_1, -PI / 2.0),
            cz_01a,
            catalog::ry(qubit_1, PI / 2.0),
            catalog::ry(qubit_0, -PI / 2.0),
            cz_10,
            catalog::ry(qubit_0, PI / 2.0),
            catalog::ry(qubit_1, -PI / 2.0),
            cz_01b,
            catalog::ry(qubit_1, PI / 2.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Qubit, expand};

    fn assert_exact(gate: &Gate, decomposition: &[Gate]) {
        let lhs = expand::expand_gate(gate, 2).unwrap();
        let rhs = expand::circuit_matrix(decomposition, 2).unwrap();
        for r in 0..4 {
            for c in 0..4 {
                assert!(
                    (lhs.get(r, c) - rhs.get(r, c)).norm() < 1e-7,
                    "global phase not preserved at ({r}, {c})"
                );
            }
        }
    }

    #[test]
    fn swap_to_three_cnots() {
        let swap = catalog::swap(Qubit(0), Qubit(1)).unwrap();
        let out = Swap2CnotDecomposer.decompose(&swap);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|g| g.name() == "CNOT"));
        assert_exact(&swap, &out);
    }

    #[test]
    fn swap_to_ry_cz_sequence() {
        let swap = catalog::swap(Qubit(1), Qubit(0)).unwrap();
        let out = Swap2CzDecomposer.decompose(&swap);
        assert_eq!(out.len(), 9);
        assert_eq!(out.iter().filter(|g| g.name() == "CZ").count(), 3);
        assert_exact(&swap, &out);
    }

    #[test]
    fn non_swap_gates_pass_through() {
        let cnot = catalog::cnot(Qubit(0), Qubit(1)).unwrap();
        assert_eq!(Swap2CnotDecomposer.decompose(&cnot).len(), 1);
        assert_eq!(Swap2CzDecomposer.decompose(&cnot).len(), 1);
    }
}
