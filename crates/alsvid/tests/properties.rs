//! Universal pass invariants, checked through the public facade.

use std::f64::consts::PI;

use alsvid::compile::passes::decomposer::{
    CnotDecomposer, CzDecomposer, McKayDecomposer, XyxDecomposer, XzxDecomposer, YxyDecomposer,
    YzyDecomposer, ZxzDecomposer, ZyzDecomposer,
};
use alsvid::compile::passes::mapper::{HardcodedMapper, IdentityMapper, Mapping, RandomMapper};
use alsvid::compile::passes::merger::SingleQubitGatesMerger;
use alsvid::compile::{Decomposer, Mapper};
use alsvid::ir::math::ATOL;
use alsvid::ir::{Gate, Qubit, Statement, catalog};
use alsvid::{Circuit, CircuitBuilder};

fn mixed_circuit() -> Circuit {
    let mut builder = CircuitBuilder::with_bits(3, 3);
    builder
        .h(0)
        .unwrap()
        .t(0)
        .unwrap()
        .ry(1, 0.7)
        .unwrap()
        .cnot(0, 1)
        .unwrap()
        .cr(1, 2, 1.234)
        .unwrap()
        .rn(2, 0.3, -0.4, 0.8, 2.1, 0.0)
        .unwrap()
        .cz(2, 0)
        .unwrap()
        .swap(1, 2)
        .unwrap()
        .measure(0, 0)
        .unwrap();
    builder.to_circuit()
}

fn all_decomposers() -> Vec<Box<dyn Decomposer>> {
    vec![
        Box::new(XyxDecomposer),
        Box::new(XzxDecomposer),
        Box::new(YxyDecomposer),
        Box::new(YzyDecomposer),
        Box::new(ZxzDecomposer),
        Box::new(ZyzDecomposer),
        Box::new(McKayDecomposer),
        Box::new(CnotDecomposer),
        Box::new(CzDecomposer),
    ]
}

/// Decomposing through the facade runs the verified replacement loop, so a
/// pass completing at all certifies unitary preservation on every gate.
#[test]
fn every_decomposer_preserves_the_state() {
    for decomposer in all_decomposers() {
        let mut circuit = mixed_circuit();
        circuit.decompose(decomposer.as_ref()).unwrap();
    }
}

#[test]
fn every_produced_rotation_is_normalized() {
    for decomposer in all_decomposers() {
        let mut circuit = mixed_circuit();
        circuit.decompose(decomposer.as_ref()).unwrap();
        for statement in &circuit.ir().statements {
            let Some(Gate::BlochSphereRotation(rotation)) = statement.as_gate() else {
                continue;
            };
            assert!(
                -PI < rotation.angle && rotation.angle <= PI + ATOL,
                "angle {} out of (-π, π]",
                rotation.angle
            );
            assert!(
                -PI < rotation.phase && rotation.phase <= PI + ATOL,
                "phase {} out of (-π, π]",
                rotation.phase
            );
            let norm: f64 = rotation.axis.value().iter().map(|v| v * v).sum();
            assert!((norm - 1.0).abs() < ATOL);
        }
    }
}

#[test]
fn decomposer_output_stays_on_the_operand_support() {
    for decomposer in all_decomposers() {
        for gate in [
            catalog::h(Qubit(1)),
            catalog::rn(Qubit(0), 1.0, 2.0, -1.0, 1.9, 0.3).unwrap(),
            catalog::cnot(Qubit(2), Qubit(0)).unwrap(),
            catalog::cr(Qubit(0), Qubit(1), -0.7).unwrap(),
        ] {
            let support = gate.qubit_operands();
            for out in decomposer.decompose(&gate) {
                for qubit in out.qubit_operands() {
                    assert!(
                        support.contains(&qubit),
                        "decomposition escaped the operand support"
                    );
                }
            }
        }
    }
}

#[test]
fn merger_is_idempotent() {
    let mut circuit = mixed_circuit();
    circuit.merge(&SingleQubitGatesMerger).unwrap();
    let once = circuit.ir().clone();
    circuit.merge(&SingleQubitGatesMerger).unwrap();
    assert_eq!(&once, circuit.ir());
}

#[test]
fn aba_decomposers_are_idempotent_on_rotations() {
    let decomposers: Vec<Box<dyn Decomposer>> = vec![
        Box::new(ZyzDecomposer),
        Box::new(XzxDecomposer),
        Box::new(YxyDecomposer),
    ];
    for decomposer in decomposers {
        let mut circuit = CircuitBuilder::new(1).to_circuit();
        circuit
            .ir_mut()
            .add_gate(catalog::rn(Qubit(0), 0.3, -1.2, 0.8, 2.0, 0.0).unwrap());
        circuit.decompose(decomposer.as_ref()).unwrap();
        let once = circuit.ir().clone();
        circuit.decompose(decomposer.as_ref()).unwrap();
        assert_eq!(&once, circuit.ir());
    }
}

#[test]
fn mappers_do_not_mutate_the_ir() {
    let circuit = mixed_circuit();
    let before = circuit.ir().clone();
    let size = circuit.qubit_register_size();

    let mappers: Vec<Box<dyn Mapper>> = vec![
        Box::new(IdentityMapper),
        Box::new(RandomMapper::with_seed(5)),
        Box::new(HardcodedMapper::new(Mapping::new(vec![2, 0, 1]).unwrap())),
    ];
    for mapper in mappers {
        mapper.map(circuit.ir(), size).unwrap();
        assert_eq!(&before, circuit.ir());
    }
}

#[test]
fn mapping_application_is_a_permutation_of_indices() {
    let mut circuit = mixed_circuit();
    let before: Vec<_> = circuit
        .ir()
        .statements
        .iter()
        .map(Statement::qubit_operands)
        .collect();
    circuit
        .map(&HardcodedMapper::new(Mapping::new(vec![2, 0, 1]).unwrap()))
        .unwrap();
    let after: Vec<_> = circuit
        .ir()
        .statements
        .iter()
        .map(Statement::qubit_operands)
        .collect();

    let permutation = [2u32, 0, 1];
    for (old_ops, new_ops) in before.iter().zip(after.iter()) {
        for (old, new) in old_ops.iter().zip(new_ops.iter()) {
            assert_eq!(permutation[old.index()], new.0);
        }
    }
}

#[test]
fn gate_equality_is_congruent_with_expansion() {
    // Same gate expressed three ways.
    let cnot = catalog::cnot(Qubit(0), Qubit(1)).unwrap();
    let via_cz = [
        catalog::ry(Qubit(1), -PI / 2.0),
        catalog::cz(Qubit(0), Qubit(1)).unwrap(),
        catalog::ry(Qubit(1), PI / 2.0),
    ];
    let lhs = alsvid::ir::expand::expand_gate(&cnot, 2).unwrap();
    let rhs = alsvid::ir::expand::circuit_matrix(&via_cz, 2).unwrap();
    assert!(lhs.equivalent_up_to_global_phase(&rhs));

    // And inequality shows up in the expansion too.
    let cz = catalog::cz(Qubit(0), Qubit(1)).unwrap();
    assert_ne!(cnot, cz);
    let rhs = alsvid::ir::expand::expand_gate(&cz, 2).unwrap();
    assert!(!lhs.equivalent_up_to_global_phase(&rhs));
}

#[test]
fn phase_map_tracks_dropped_phases() {
    // Z → Rz(π) drops a π/2 global phase into the phase map.
    let mut circuit = CircuitBuilder::new(1).to_circuit();
    circuit.ir_mut().add_gate(catalog::z(Qubit(0)));
    circuit
        .replace("Z", &|gate| {
            vec![catalog::rz(gate.qubit_operands()[0], PI)]
        })
        .unwrap();
    let phase = circuit.phase_map().get_qubit_phase(Qubit(0));
    assert!((phase.abs() - PI / 2.0).abs() < ATOL);
}
