//! cQASM 3 text writer.

use alsvid_ir::{
    AsmDeclaration, Bit, Expression, Gate, Ir, Measure, NonUnitary, Qubit, RegisterManager,
    Visitor, Wait,
};

/// Serialize a circuit body to cQASM 3 text.
///
/// Registers are declared after the version header; floats are printed to 8
/// significant digits; anonymous gates render as `Anonymous gate: <repr>`;
/// the output ends in exactly one newline.
pub fn circuit_to_string(register_manager: &RegisterManager, ir: &Ir) -> String {
    let mut writer = WriterVisitor {
        register_manager,
        output: String::from("version 3.0\n\n"),
    };

    for register in register_manager.qubit_registers() {
        writer.output
            .push_str(&format!("qubit[{}] {}\n", register.size(), register.name()));
    }
    for register in register_manager.bit_registers() {
        if register.size() > 0 {
            writer.output
                .push_str(&format!("bit[{}] {}\n", register.size(), register.name()));
        }
    }
    writer.output.push('\n');

    ir.accept(&mut writer);

    let trimmed = writer.output.trim_end_matches('\n');
    format!("{trimmed}\n")
}

struct WriterVisitor<'a> {
    register_manager: &'a RegisterManager,
    output: String,
}

impl WriterVisitor<'_> {
    fn qubit_ref(&self, qubit: Qubit) -> String {
        match self.register_manager.resolve_qubit(qubit) {
            Ok((register, local)) => format!("{}[{local}]", register.name()),
            Err(_) => format!(
                "{}[{}]",
                self.register_manager.qubit_register_name(),
                qubit.0
            ),
        }
    }

    fn bit_ref(&self, bit: Bit) -> String {
        match self.register_manager.resolve_bit(bit) {
            Ok((register, local)) => format!("{}[{local}]", register.name()),
            Err(_) => format!("{}[{}]", self.register_manager.bit_register_name(), bit.0),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

impl Visitor for WriterVisitor<'_> {
    fn visit_asm_declaration(&mut self, asm: &AsmDeclaration) {
        let line = format!("asm({}) '''{}'''", asm.backend_name, asm.backend_code);
        self.writeln(&line);
    }

    fn visit_gate(&mut self, gate: &Gate) {
        if gate.is_anonymous() {
            let line = format!("Anonymous gate: {gate}");
            self.writeln(&line);
            return;
        }

        let mut params: Vec<String> = vec![];
        for argument in gate.arguments() {
            match argument {
                Expression::Float(v) => params.push(fmt_float(v)),
                Expression::Int(v) => params.push(v.to_string()),
                _ => {}
            }
        }
        let qubits: Vec<String> = gate
            .qubit_operands()
            .into_iter()
            .map(|q| self.qubit_ref(q))
            .collect();

        let line = if params.is_empty() {
            format!("{} {}", gate.name(), qubits.join(", "))
        } else {
            format!("{}({}) {}", gate.name(), params.join(", "), qubits.join(", "))
        };
        self.writeln(&line);
    }

    fn visit_non_unitary(&mut self, non_unitary: &NonUnitary) {
        let line = match non_unitary {
            NonUnitary::Measure(Measure { qubit, bit, .. }) => {
                format!(
                    "{} = measure {}",
                    self.bit_ref(*bit),
                    self.qubit_ref(*qubit)
                )
            }
            NonUnitary::Wait(Wait { qubit, time }) => {
                format!("wait({time}) {}", self.qubit_ref(*qubit))
            }
            other => format!("{} {}", other.name(), self.qubit_ref(other.qubit())),
        };
        self.writeln(&line);
    }
}

/// Format a float to 8 significant digits, trimming trailing zeros but
/// keeping at least one decimal.
pub(crate) fn fmt_float(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (7 - magnitude).max(0) as usize;
    let formatted = format!("{value:.decimals$}");
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{BlochSphereRotation, catalog};
    use std::f64::consts::PI;

    #[test]
    fn float_formatting() {
        assert_eq!(fmt_float(PI / 2.0), "1.5707963");
        assert_eq!(fmt_float(1.234), "1.234");
        assert_eq!(fmt_float(-1.0), "-1.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(0.5), "0.5");
        assert_eq!(fmt_float(-PI), "-3.1415927");
    }

    #[test]
    fn writes_registers_and_gates() {
        let register_manager = RegisterManager::with_sizes(3, 0);
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(0)));
        ir.add_gate(catalog::cr(Qubit(0), Qubit(1), 1.234).unwrap());

        let expected = "version 3.0\n\nqubit[3] q\n\nH q[0]\nCR(1.234) q[0], q[1]\n";
        assert_eq!(circuit_to_string(&register_manager, &ir), expected);
    }

    #[test]
    fn empty_circuit_has_single_trailing_newline() {
        let register_manager = RegisterManager::with_sizes(3, 0);
        let ir = Ir::new();
        assert_eq!(
            circuit_to_string(&register_manager, &ir),
            "version 3.0\n\nqubit[3] q\n"
        );
    }

    #[test]
    fn writes_anonymous_gates() {
        let register_manager = RegisterManager::with_sizes(2, 2);
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(0)));
        ir.add_gate(alsvid_ir::Gate::BlochSphereRotation(BlochSphereRotation::new(
            Qubit(0),
            alsvid_ir::Axis::new([1.0, 1.0, 1.0]).unwrap(),
            1.23,
            0.0,
        )));

        let output = circuit_to_string(&register_manager, &ir);
        assert!(output.contains("bit[2] b\n"));
        assert!(output.contains("Anonymous gate: BlochSphereRotation("));
    }

    #[test]
    fn writes_non_unitaries() {
        let register_manager = RegisterManager::with_sizes(2, 1);
        let mut ir = Ir::new();
        ir.add_non_unitary(NonUnitary::Measure(Measure::new(Qubit(1), Bit(0))));
        ir.add_non_unitary(NonUnitary::Wait(Wait {
            qubit: Qubit(0),
            time: 3,
        }));
        ir.add_non_unitary(NonUnitary::Init(alsvid_ir::Init { qubit: Qubit(0) }));

        let output = circuit_to_string(&register_manager, &ir);
        assert!(output.contains("b[0] = measure q[1]\n"));
        assert!(output.contains("wait(3) q[0]\n"));
        assert!(output.contains("init q[0]\n"));
    }

    #[test]
    fn writes_asm_declarations() {
        let register_manager = RegisterManager::with_sizes(1, 0);
        let mut ir = Ir::new();
        ir.add_asm_declaration(AsmDeclaration {
            backend_name: "TestBackend".to_string(),
            backend_code: " a ' \" {} () [] b ".to_string(),
        });
        let output = circuit_to_string(&register_manager, &ir);
        assert!(output.contains("asm(TestBackend) ''' a ' \" {} () [] b '''\n"));
    }
}
