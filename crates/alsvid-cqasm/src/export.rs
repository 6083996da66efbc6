//! cQASM v1 exporter.
//!
//! Same statement shape as v3 with lowercase gate names, a `qubits N`
//! header, `measure_z`/`prep_z` for measure/init/reset, and consecutive
//! barriers merged into a single `barrier q[i, j, …]` line.

use alsvid_ir::{Expression, Gate, Ir, NonUnitary, RegisterManager, Statement};

use crate::error::{ExportError, ExportResult};
use crate::writer::fmt_float;

/// Serialize a circuit body to cQASM v1 text.
///
/// Anonymous gates have no v1 spelling and fail with
/// [`ExportError::UnsupportedGate`]. Assembly declarations are dropped.
pub fn export_cqasm_v1(register_manager: &RegisterManager, ir: &Ir) -> ExportResult<String> {
    let mut output = String::from("version 1.0\n\n");
    let qubit_register_size = register_manager.qubit_register_size();
    if qubit_register_size > 0 {
        output.push_str(&format!("qubits {qubit_register_size}\n\n"));
    }

    let register_name = register_manager.qubit_register_name();
    // Consecutive barriers merge into one line; flushed on any other
    // statement.
    let mut barrier_group: Vec<u32> = vec![];

    for statement in &ir.statements {
        if let Statement::NonUnitary(NonUnitary::Barrier(barrier)) = statement {
            barrier_group.push(barrier.qubit.0);
            continue;
        }
        flush_barriers(&mut output, register_name, &mut barrier_group);

        match statement {
            Statement::Asm(_) => {}
            Statement::Gate(gate) => emit_gate(&mut output, register_name, gate)?,
            Statement::NonUnitary(non_unitary) => {
                emit_non_unitary(&mut output, register_name, non_unitary);
            }
        }
    }
    flush_barriers(&mut output, register_name, &mut barrier_group);

    Ok(format!("{}\n", output.trim_end_matches('\n')))
}

fn flush_barriers(output: &mut String, register_name: &str, group: &mut Vec<u32>) {
    if group.is_empty() {
        return;
    }
    let indices: Vec<String> = group.iter().map(u32::to_string).collect();
    output.push_str(&format!(
        "barrier {register_name}[{}]\n",
        indices.join(", ")
    ));
    group.clear();
}

fn emit_gate(output: &mut String, register_name: &str, gate: &Gate) -> ExportResult<()> {
    if gate.is_anonymous() {
        return Err(ExportError::UnsupportedGate(gate.to_string()));
    }
    let name = gate.name().to_lowercase();
    let qubits: Vec<String> = gate
        .qubit_operands()
        .into_iter()
        .map(|q| format!("{register_name}[{}]", q.0))
        .collect();
    let mut params: Vec<String> = vec![];
    for argument in gate.arguments() {
        match argument {
            Expression::Float(v) => params.push(fmt_float(v)),
            Expression::Int(v) => params.push(v.to_string()),
            _ => {}
        }
    }

    if params.is_empty() {
        output.push_str(&format!("{name} {}\n", qubits.join(", ")));
    } else {
        output.push_str(&format!(
            "{name} {}, {}\n",
            qubits.join(", "),
            params.join(", ")
        ));
    }
    Ok(())
}

fn emit_non_unitary(output: &mut String, register_name: &str, non_unitary: &NonUnitary) {
    let qubit = non_unitary.qubit().0;
    match non_unitary {
        NonUnitary::Measure(_) => {
            output.push_str(&format!("measure_z {register_name}[{qubit}]\n"));
        }
        NonUnitary::Init(_) | NonUnitary::Reset(_) => {
            output.push_str(&format!("prep_z {register_name}[{qubit}]\n"));
        }
        NonUnitary::Wait(wait) => {
            output.push_str(&format!(
                "wait {register_name}[{qubit}], {}\n",
                wait.time
            ));
        }
        NonUnitary::Barrier(_) => {
            // Handled by the caller's barrier grouping.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Barrier, Bit, BlochSphereRotation, Measure, Qubit, catalog};
    use std::f64::consts::PI;

    #[test]
    fn exports_lowercase_gates() {
        let register_manager = RegisterManager::with_sizes(2, 2);
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(0)));
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
        ir.add_gate(catalog::rz(Qubit(0), PI / 2.0));
        ir.add_non_unitary(NonUnitary::Measure(Measure::new(Qubit(0), Bit(0))));

        let output = export_cqasm_v1(&register_manager, &ir).unwrap();
        assert_eq!(
            output,
            "version 1.0\n\nqubits 2\n\nh q[0]\ncnot q[0], q[1]\nrz q[0], 1.5707963\nmeasure_z q[0]\n"
        );
    }

    #[test]
    fn merges_consecutive_barriers() {
        let register_manager = RegisterManager::with_sizes(3, 0);
        let mut ir = Ir::new();
        ir.add_non_unitary(NonUnitary::Barrier(Barrier { qubit: Qubit(0) }));
        ir.add_non_unitary(NonUnitary::Barrier(Barrier { qubit: Qubit(2) }));
        ir.add_gate(catalog::x(Qubit(1)));
        ir.add_non_unitary(NonUnitary::Barrier(Barrier { qubit: Qubit(1) }));

        let output = export_cqasm_v1(&register_manager, &ir).unwrap();
        assert!(output.contains("barrier q[0, 2]\nx q[1]\nbarrier q[1]\n"));
    }

    #[test]
    fn init_and_reset_become_prep() {
        let register_manager = RegisterManager::with_sizes(1, 0);
        let mut ir = Ir::new();
        ir.add_non_unitary(NonUnitary::Init(alsvid_ir::Init { qubit: Qubit(0) }));
        ir.add_non_unitary(NonUnitary::Reset(alsvid_ir::Reset { qubit: Qubit(0) }));
        let output = export_cqasm_v1(&register_manager, &ir).unwrap();
        assert_eq!(output.matches("prep_z q[0]").count(), 2);
    }

    #[test]
    fn anonymous_gates_are_unsupported() {
        let register_manager = RegisterManager::with_sizes(1, 0);
        let mut ir = Ir::new();
        ir.add_gate(alsvid_ir::Gate::BlochSphereRotation(BlochSphereRotation::new(
            Qubit(0),
            alsvid_ir::Axis::new([1.0, 1.0, 0.0]).unwrap(),
            0.5,
            0.0,
        )));
        assert!(matches!(
            export_cqasm_v1(&register_manager, &ir),
            Err(ExportError::UnsupportedGate(_))
        ));
    }
}
