//! Property test: emitting a circuit and parsing it back is lossless.

use alsvid_cqasm::{circuit_to_string, parse};
use alsvid_ir::{Bit, Ir, Measure, NonUnitary, Qubit, RegisterManager, catalog};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    H(u32),
    X(u32),
    S(u32),
    Rx(u32, f64),
    Rz(u32, f64),
    Cnot(u32, u32),
    Cz(u32, u32),
    Cr(u32, u32, f64),
    Swap(u32, u32),
    Measure(u32, u32),
}

fn op_strategy(num_qubits: u32) -> impl Strategy<Value = Op> {
    let q = 0..num_qubits;
    let angle = -3.1f64..3.1f64;
    prop_oneof![
        q.clone().prop_map(Op::H),
        q.clone().prop_map(Op::X),
        q.clone().prop_map(Op::S),
        (q.clone(), angle.clone()).prop_map(|(q, a)| Op::Rx(q, a)),
        (q.clone(), angle.clone()).prop_map(|(q, a)| Op::Rz(q, a)),
        (q.clone(), q.clone()).prop_map(|(a, b)| Op::Cnot(a, b)),
        (q.clone(), q.clone()).prop_map(|(a, b)| Op::Cz(a, b)),
        (q.clone(), q.clone(), angle).prop_map(|(a, b, t)| Op::Cr(a, b, t)),
        (q.clone(), q.clone()).prop_map(|(a, b)| Op::Swap(a, b)),
        (q.clone(), q).prop_map(|(q, b)| Op::Measure(q, b)),
    ]
}

fn build(num_qubits: u32, ops: &[Op]) -> (RegisterManager, Ir) {
    let registers = RegisterManager::with_sizes(num_qubits, num_qubits);
    let mut ir = Ir::new();
    for op in ops {
        match *op {
            Op::H(q) => ir.add_gate(catalog::h(Qubit(q))),
            Op::X(q) => ir.add_gate(catalog::x(Qubit(q))),
            Op::S(q) => ir.add_gate(catalog::s(Qubit(q))),
            Op::Rx(q, a) => ir.add_gate(catalog::rx(Qubit(q), a)),
            Op::Rz(q, a) => ir.add_gate(catalog::rz(Qubit(q), a)),
            Op::Cnot(a, b) if a != b => {
                ir.add_gate(catalog::cnot(Qubit(a), Qubit(b)).unwrap());
            }
            Op::Cz(a, b) if a != b => {
                ir.add_gate(catalog::cz(Qubit(a), Qubit(b)).unwrap());
            }
            Op::Cr(a, b, t) if a != b => {
                ir.add_gate(catalog::cr(Qubit(a), Qubit(b), t).unwrap());
            }
            Op::Swap(a, b) if a != b => {
                ir.add_gate(catalog::swap(Qubit(a), Qubit(b)).unwrap());
            }
            Op::Measure(q, b) => {
                ir.add_non_unitary(NonUnitary::Measure(Measure::new(Qubit(q), Bit(b))));
            }
            // Coinciding operands are skipped rather than filtered out of
            // the strategy, to keep shrinking simple.
            _ => {}
        }
    }
    (registers, ir)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn emit_then_parse_is_lossless(
        num_qubits in 1u32..5,
        ops in prop::collection::vec(op_strategy(4), 0..24),
    ) {
        let (registers, ir) = build(num_qubits, &ops
            .into_iter()
            .filter(|op| match *op {
                Op::H(q) | Op::X(q) | Op::S(q) | Op::Rx(q, _) | Op::Rz(q, _) => q < num_qubits,
                Op::Cnot(a, b) | Op::Cz(a, b) | Op::Cr(a, b, _) | Op::Swap(a, b) => {
                    a < num_qubits && b < num_qubits
                }
                Op::Measure(q, b) => q < num_qubits && b < num_qubits,
            })
            .collect::<Vec<_>>());

        let emitted = circuit_to_string(&registers, &ir);
        let (parsed_registers, parsed_ir) = parse(&emitted).expect("emitted text parses");

        prop_assert_eq!(
            registers.qubit_register_size(),
            parsed_registers.qubit_register_size()
        );
        prop_assert_eq!(ir.statements.len(), parsed_ir.statements.len());

        // Statement-by-statement: same instruction, same operands, and for
        // gates the same unitary semantics.
        for (a, b) in ir.statements.iter().zip(parsed_ir.statements.iter()) {
            prop_assert_eq!(a.instruction_name(), b.instruction_name());
            prop_assert_eq!(a.qubit_operands(), b.qubit_operands());
            if let (Some(ga), Some(gb)) = (a.as_gate(), b.as_gate()) {
                prop_assert!(ga.equivalent(gb), "gate changed across round trip");
            }
        }

        // And the second emission is a fixpoint.
        let emitted_again = circuit_to_string(&parsed_registers, &parsed_ir);
        prop_assert_eq!(emitted, emitted_again);
    }
}
