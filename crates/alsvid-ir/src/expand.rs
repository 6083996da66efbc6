//! Matrix expander: lifts a k-qubit gate to the full-register unitary.
//!
//! Used for rewrite verification and for computing small test-circuit
//! unitaries; never on large registers. Qubit `#i` corresponds to the i-th
//! least significant bit of a basis ket.

use crate::error::{IrError, IrResult};
use crate::gate::{BlochSphereRotation, ControlledGate, Gate, MatrixGate};
use crate::qubit::Qubit;
use crate::unitary::{Unitary, can1};

/// Extract the bits of `ket` at the positions given by `qubits`, in order.
///
/// The analogue of the `pext` instruction: qubit `i` of the result is the bit
/// of `ket` at position `qubits[i]`.
pub fn reduced_ket(ket: usize, qubits: &[Qubit]) -> usize {
    let mut reduced = 0usize;
    for (i, qubit) in qubits.iter().enumerate() {
        reduced |= ((ket >> qubit.index()) & 1) << i;
    }
    reduced
}

/// Deposit the bits of `reduced_ket` into `base_ket` at the positions given
/// by `qubits`, leaving all other bits of `base_ket` untouched.
///
/// The analogue of the `pdep` instruction.
pub fn expand_ket(base_ket: usize, reduced_ket: usize, qubits: &[Qubit]) -> usize {
    let mut expanded = base_ket;
    for (i, qubit) in qubits.iter().enumerate() {
        expanded &= !(1 << qubit.index());
        expanded |= ((reduced_ket >> i) & 1) << qubit.index();
    }
    expanded
}

/// Scatter a small 2^k matrix into the 2^n identity-padded big matrix.
///
/// `qubits[i]` is the register position of the i-th least significant bit of
/// the small matrix.
fn scatter(small: &Unitary, qubits: &[Qubit], num_qubits: u32) -> Unitary {
    let big_dim = 1usize << num_qubits;
    let mut out = Unitary::zeros(big_dim);
    for col in 0..big_dim {
        let small_col = reduced_ket(col, qubits);
        for small_row in 0..small.dim() {
            let value = small.get(small_row, small_col);
            if value.norm_sqr() == 0.0 {
                continue;
            }
            let row = expand_ket(col, small_row, qubits);
            out.set(row, col, value);
        }
    }
    out
}

fn check_operand(qubit: Qubit, num_qubits: u32) -> IrResult<()> {
    if qubit.0 >= num_qubits {
        return Err(IrError::QubitOutOfBounds {
            qubit,
            size: num_qubits,
        });
    }
    Ok(())
}

fn expand_bsr(gate: &BlochSphereRotation, num_qubits: u32) -> IrResult<Unitary> {
    check_operand(gate.qubit, num_qubits)?;
    Ok(scatter(
        &can1(&gate.axis, gate.angle, gate.phase),
        &[gate.qubit],
        num_qubits,
    ))
}

fn expand_matrix_gate(gate: &MatrixGate, num_qubits: u32) -> IrResult<Unitary> {
    for &qubit in &gate.operands {
        check_operand(qubit, num_qubits)?;
    }
    // Gate matrices are written with the first-listed operand as the most
    // significant bit; reverse so position i maps to small-matrix bit i.
    let reversed: Vec<Qubit> = gate.operands.iter().rev().copied().collect();
    Ok(scatter(&gate.matrix, &reversed, num_qubits))
}

fn expand_controlled(gate: &ControlledGate, num_qubits: u32) -> IrResult<Unitary> {
    check_operand(gate.control_qubit, num_qubits)?;
    let mut expanded = expand_gate(&gate.target_gate, num_qubits)?;
    let control_mask = 1usize << gate.control_qubit.index();
    for col in 0..expanded.dim() {
        if col & control_mask == 0 {
            for row in 0..expanded.dim() {
                expanded.set(row, col, num_complex::Complex64::ZERO);
            }
            expanded.set(col, col, num_complex::Complex64::ONE);
        }
    }
    Ok(expanded)
}

/// The 2^n × 2^n unitary implemented by `gate` on a register of `num_qubits`.
pub fn expand_gate(gate: &Gate, num_qubits: u32) -> IrResult<Unitary> {
    match gate {
        Gate::BlochSphereRotation(bsr) => expand_bsr(bsr, num_qubits),
        Gate::Matrix(m) => expand_matrix_gate(m, num_qubits),
        Gate::Controlled(c) => expand_controlled(c, num_qubits),
    }
}

/// The unitary of a gate sequence applied in order on `num_qubits` qubits.
pub fn circuit_matrix(gates: &[Gate], num_qubits: u32) -> IrResult<Unitary> {
    let mut total = Unitary::identity(1usize << num_qubits);
    for gate in gates {
        total = expand_gate(gate, num_qubits)?.mul(&total);
    }
    Ok(total)
}

/// Rebuild `gates` with every qubit index replaced by its position in
/// `qubit_indices`, so the expander sees a dense register of that size.
pub fn reindexed(gates: &[Gate], qubit_indices: &[Qubit]) -> IrResult<Vec<Gate>> {
    gates.iter().map(|g| reindex_gate(g, qubit_indices)).collect()
}

fn reindex_qubit(qubit: Qubit, qubit_indices: &[Qubit]) -> IrResult<Qubit> {
    qubit_indices
        .iter()
        .position(|&q| q == qubit)
        .map(|pos| Qubit(pos as u32))
        .ok_or(IrError::UnknownQubit { qubit })
}

fn reindex_gate(gate: &Gate, qubit_indices: &[Qubit]) -> IrResult<Gate> {
    Ok(match gate {
        Gate::BlochSphereRotation(bsr) => Gate::BlochSphereRotation(BlochSphereRotation {
            qubit: reindex_qubit(bsr.qubit, qubit_indices)?,
            ..bsr.clone()
        }),
        Gate::Matrix(m) => {
            let operands = m
                .operands
                .iter()
                .map(|&q| reindex_qubit(q, qubit_indices))
                .collect::<IrResult<Vec<_>>>()?;
            Gate::Matrix(MatrixGate {
                operands,
                ..m.clone()
            })
        }
        Gate::Controlled(c) => Gate::Controlled(ControlledGate {
            control_qubit: reindex_qubit(c.control_qubit, qubit_indices)?,
            target_gate: Box::new(reindex_gate(&c.target_gate, qubit_indices)?),
            ..c.clone()
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::math::ATOL;

    fn as_ints(matrix: &Unitary) -> Vec<Vec<i32>> {
        (0..matrix.dim())
            .map(|r| {
                (0..matrix.dim())
                    .map(|c| {
                        let v = matrix.get(r, c);
                        assert!(v.im.abs() < 0.5);
                        v.re.round() as i32
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn reduced_and_expand_ket() {
        assert_eq!(reduced_ket(1, &[Qubit(0)]), 1);
        assert_eq!(reduced_ket(1111, &[Qubit(2)]), 1);
        assert_eq!(reduced_ket(1111, &[Qubit(5)]), 0);
        assert_eq!(reduced_ket(101, &[Qubit(1), Qubit(0)]), 2);
        assert_eq!(reduced_ket(101, &[Qubit(0), Qubit(1)]), 1);

        assert_eq!(expand_ket(0b00000, 0b1, &[Qubit(5)]), 32);
        assert_eq!(expand_ket(0b00111, 0b1, &[Qubit(5)]), 39);
        assert_eq!(
            expand_ket(0b0001, 0b101, &[Qubit(1), Qubit(2), Qubit(3)]),
            0b1011
        );
    }

    #[test]
    fn expand_x_on_high_qubit() {
        // The π/2 phase of the catalog X cancels the −i from the rotation,
        // so the expanded matrix is exactly X ⊗ I.
        let x = catalog::x(Qubit(1));
        let matrix = expand_gate(&x, 2).unwrap();
        let expected = [
            [0, 0, 1, 0],
            [0, 0, 0, 1],
            [1, 0, 0, 0],
            [0, 1, 0, 0],
        ];
        let got = as_ints(&matrix);
        for (r, row) in expected.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(got[r][c], v, "mismatch at ({r}, {c})");
            }
        }
    }

    #[test]
    fn expand_controlled_on_non_adjacent_qubits() {
        // CNOT with control q0 and target q2 on a 3-qubit register.
        let cnot = catalog::cnot(Qubit(0), Qubit(2)).unwrap();
        let matrix = expand_gate(&cnot, 3).unwrap();
        let expected = [
            [1, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 1, 0, 0],
            [0, 0, 1, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 1],
            [0, 0, 0, 0, 1, 0, 0, 0],
            [0, 1, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 1, 0],
            [0, 0, 0, 1, 0, 0, 0, 0],
        ];
        let got = as_ints(&matrix);
        for (r, row) in expected.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(got[r][c], v, "mismatch at ({r}, {c})");
            }
        }
    }

    #[test]
    fn matrix_gate_operand_order_convention() {
        // SWAP written as a matrix gate must agree with its CNOT expansion.
        let swap = catalog::swap(Qubit(0), Qubit(1)).unwrap();
        let cnots = vec![
            catalog::cnot(Qubit(0), Qubit(1)).unwrap(),
            catalog::cnot(Qubit(1), Qubit(0)).unwrap(),
            catalog::cnot(Qubit(0), Qubit(1)).unwrap(),
        ];
        let lhs = expand_gate(&swap, 2).unwrap();
        let rhs = circuit_matrix(&cnots, 2).unwrap();
        assert!(lhs.equivalent_up_to_global_phase(&rhs));
    }

    #[test]
    fn reindex_compacts_qubits() {
        let cnot = catalog::cnot(Qubit(5), Qubit(2)).unwrap();
        let reindexed = reindexed(std::slice::from_ref(&cnot), &[Qubit(5), Qubit(2)]).unwrap();
        assert_eq!(reindexed[0].qubit_operands(), vec![Qubit(0), Qubit(1)]);
        let matrix = circuit_matrix(&reindexed, 2).unwrap();
        assert_eq!(matrix.dim(), 4);
    }

    #[test]
    fn out_of_bounds_operand_rejected() {
        let x = catalog::x(Qubit(3));
        assert!(matches!(
            expand_gate(&x, 2),
            Err(IrError::QubitOutOfBounds { .. })
        ));
    }

    #[test]
    fn ccz_is_diagonal_with_single_minus_one() {
        let ccz = catalog::ccz(Qubit(0), Qubit(1), Qubit(2)).unwrap();
        let matrix = expand_gate(&ccz, 3).unwrap();
        for r in 0..8 {
            for c in 0..8 {
                let v = matrix.get(r, c);
                if r != c {
                    assert!(v.norm() < ATOL);
                } else if r == 7 {
                    assert!((v.re + 1.0).abs() < ATOL && v.im.abs() < ATOL);
                } else {
                    assert!((v.re - 1.0).abs() < ATOL && v.im.abs() < ATOL);
                }
            }
        }
    }
}
