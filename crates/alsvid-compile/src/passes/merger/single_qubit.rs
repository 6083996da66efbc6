//! Consecutive single-qubit-gate fusion.

use alsvid_ir::{BlochSphereRotation, Gate, IrError, Qubit, Statement, catalog};
use tracing::debug;

use super::compose_bloch_sphere_rotations;
use crate::error::CompileResult;
use crate::pass::Merger;

/// Merges all consecutive single-qubit rotations on each qubit.
///
/// Walks the statement list keeping a per-qubit accumulator rotation.
/// Rotations fold into their accumulator and disappear; any other
/// instruction first flushes the accumulators of the qubits it touches
/// (barriers and assembly declarations flush every qubit). Fused rotations
/// are renamed against the default catalog where possible.
pub struct SingleQubitGatesMerger;

impl Merger for SingleQubitGatesMerger {
    fn merge(&self, ir: &mut alsvid_ir::Ir, qubit_register_size: u32) -> CompileResult<()> {
        let mut accumulators: Vec<BlochSphereRotation> = (0..qubit_register_size)
            .map(|i| BlochSphereRotation::identity(Qubit(i)))
            .collect();
        let mut fused = 0usize;

        let mut index = 0;
        while index < ir.statements.len() {
            if let Statement::Gate(Gate::BlochSphereRotation(rotation)) = &ir.statements[index] {
                let slot = rotation.qubit.index();
                if slot >= accumulators.len() {
                    return Err(IrError::QubitOutOfBounds {
                        qubit: rotation.qubit,
                        size: qubit_register_size,
                    }
                    .into());
                }
                accumulators[slot] = compose_bloch_sphere_rotations(&accumulators[slot], rotation);
                ir.statements.remove(index);
                fused += 1;
                continue;
            }

            let flush_all = ir.statements[index].is_barrier()
                || matches!(ir.statements[index], Statement::Asm(_));
            let flush_qubits: Vec<Qubit> = if flush_all {
                (0..qubit_register_size).map(Qubit).collect()
            } else {
                ir.statements[index].qubit_operands()
            };

            for qubit in flush_qubits {
                let slot = qubit.index();
                if slot >= accumulators.len() {
                    return Err(IrError::QubitOutOfBounds {
                        qubit,
                        size: qubit_register_size,
                    }
                    .into());
                }
                if !accumulators[slot].is_identity() {
                    let named = catalog::try_match_replace_with_default(&accumulators[slot]);
                    ir.statements
                        .insert(index, Statement::Gate(Gate::BlochSphereRotation(named)));
                    accumulators[slot] = BlochSphereRotation::identity(qubit);
                    index += 1;
                }
            }
            index += 1;
        }

        for accumulator in &accumulators {
            if !accumulator.is_identity() {
                let named = catalog::try_match_replace_with_default(accumulator);
                ir.add_gate(Gate::BlochSphereRotation(named));
            }
        }

        debug!(fused, "merged single-qubit rotations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{AsmDeclaration, Barrier, Bit, GateName, Ir, Measure, NonUnitary, catalog};
    use std::f64::consts::PI;

    fn merge(ir: &mut Ir, size: u32) {
        SingleQubitGatesMerger.merge(ir, size).unwrap();
    }

    #[test]
    fn two_hadamards_cancel() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(2)));
        ir.add_gate(catalog::h(Qubit(2)));
        merge(&mut ir, 4);
        assert!(ir.statements.is_empty());
    }

    #[test]
    fn ry_then_x_merges_to_h() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::ry(Qubit(0), PI / 2.0));
        ir.add_gate(catalog::x(Qubit(0)));
        merge(&mut ir, 1);

        assert_eq!(ir.statements.len(), 1);
        let gate = ir.statements[0].as_gate().unwrap();
        // X carries a π/2 phase, so the fused rotation is exactly H and
        // default matching restores the name.
        assert_eq!(gate.gate_name(), Some(GateName::H));
        let h = catalog::h(Qubit(0));
        let lhs = alsvid_ir::expand::expand_gate(gate, 1).unwrap();
        let rhs = alsvid_ir::expand::expand_gate(&h, 1).unwrap();
        assert!(lhs.equivalent_up_to_global_phase(&rhs));
    }

    #[test]
    fn gates_on_different_qubits_do_not_merge() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(0)));
        ir.add_gate(catalog::h(Qubit(2)));
        merge(&mut ir, 4);
        assert_eq!(ir.statements.len(), 2);
    }

    #[test]
    fn two_qubit_gate_flushes_its_operands() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::ry(Qubit(0), PI / 2.0));
        ir.add_gate(catalog::rz(Qubit(1), 1.5));
        ir.add_gate(catalog::rx(Qubit(0), PI));
        ir.add_gate(catalog::rz(Qubit(1), -2.5));
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
        ir.add_gate(catalog::ry(Qubit(0), 3.234));
        merge(&mut ir, 4);

        // Fused q0 rotation, fused Rz(-1) on q1, CNOT, trailing Ry.
        assert_eq!(ir.statements.len(), 4);
        assert_eq!(ir.statements[2].instruction_name(), Some("CNOT"));
        let rz = ir.statements[1].as_gate().unwrap();
        assert_eq!(rz.gate_name(), Some(GateName::Rz));
        let Gate::BlochSphereRotation(rz) = rz else {
            panic!("expected rotation");
        };
        assert!((rz.angle + 1.0).abs() < 1e-7);
        let trailing = ir.statements[3].as_gate().unwrap();
        assert_eq!(trailing.gate_name(), Some(GateName::Ry));
    }

    #[test]
    fn measure_flushes_only_its_qubit() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::rx(Qubit(0), 0.5));
        ir.add_gate(catalog::rx(Qubit(1), 0.5));
        ir.add_non_unitary(NonUnitary::Measure(Measure::new(Qubit(0), Bit(0))));
        merge(&mut ir, 2);

        assert_eq!(ir.statements.len(), 3);
        assert_eq!(ir.statements[0].instruction_name(), Some("Rx"));
        assert_eq!(ir.statements[0].qubit_operands(), vec![Qubit(0)]);
        assert_eq!(ir.statements[1].instruction_name(), Some("measure"));
        // q1's accumulator flushes at end of circuit.
        assert_eq!(ir.statements[2].qubit_operands(), vec![Qubit(1)]);
    }

    #[test]
    fn barrier_flushes_all_qubits() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::rx(Qubit(1), 0.5));
        ir.add_non_unitary(NonUnitary::Barrier(Barrier { qubit: Qubit(0) }));
        merge(&mut ir, 2);

        assert_eq!(ir.statements.len(), 2);
        assert_eq!(ir.statements[0].instruction_name(), Some("Rx"));
        assert!(ir.statements[1].is_barrier());
    }

    #[test]
    fn asm_declaration_flushes_all_qubits() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::rx(Qubit(1), 0.5));
        ir.add_asm_declaration(AsmDeclaration {
            backend_name: "TestBackend".to_string(),
            backend_code: " nop ".to_string(),
        });
        merge(&mut ir, 2);

        assert_eq!(ir.statements.len(), 2);
        assert_eq!(ir.statements[0].instruction_name(), Some("Rx"));
        assert!(matches!(ir.statements[1], Statement::Asm(_)));
    }

    #[test]
    fn idempotent() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::ry(Qubit(0), 1.0));
        ir.add_gate(catalog::t(Qubit(0)));
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
        ir.add_gate(catalog::s(Qubit(1)));
        merge(&mut ir, 2);
        let once = ir.clone();
        merge(&mut ir, 2);
        assert_eq!(once, ir);
    }
}
