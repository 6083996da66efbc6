//! The circuit facade: the single entry point to the compiler.

use alsvid_compile::{
    CompileError, Decomposer, Mapper, Merger, PhaseMap, Router, Validator, remap_ir, replace,
};
use alsvid_cqasm::{ExportError, ParseError};
use alsvid_ir::{Gate, Ir, NonUnitary, RegisterManager, Statement};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors surfaced by the circuit facade.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// cQASM parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A compilation pass failed.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Output formats of [`Circuit::export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// cQASM 3 (the same text produced by `to_string`).
    CqasmV3,
    /// cQASM v1 (lowercase names, `qubits N` header).
    CqasmV1,
}

/// A quantum circuit: a register layout plus a statement list, with the
/// per-qubit phase accounting maintained by the replacement loop.
///
/// Passes mutate the circuit in place through the methods below; a failing
/// pass reports an error and by convention the circuit is then discarded.
#[derive(Debug)]
pub struct Circuit {
    register_manager: RegisterManager,
    ir: Ir,
    phase_map: PhaseMap,
}

impl Circuit {
    /// Create a circuit from its register layout and body.
    pub fn new(register_manager: RegisterManager, ir: Ir) -> Self {
        let phase_map = PhaseMap::new(register_manager.qubit_register_size());
        Self {
            register_manager,
            ir,
            phase_map,
        }
    }

    /// Parse a cQASM 3 source string.
    pub fn from_string(source: &str) -> CircuitResult<Self> {
        let (register_manager, ir) = alsvid_cqasm::parse(source)?;
        Ok(Self::new(register_manager, ir))
    }

    /// The register layout.
    pub fn register_manager(&self) -> &RegisterManager {
        &self.register_manager
    }

    /// The circuit body.
    pub fn ir(&self) -> &Ir {
        &self.ir
    }

    /// Mutable access to the circuit body.
    pub fn ir_mut(&mut self) -> &mut Ir {
        &mut self.ir
    }

    /// The per-qubit global-phase accumulator.
    pub fn phase_map(&self) -> &PhaseMap {
        &self.phase_map
    }

    /// Total number of qubits.
    pub fn qubit_register_size(&self) -> u32 {
        self.register_manager.qubit_register_size()
    }

    /// Name of the (first) qubit register.
    pub fn qubit_register_name(&self) -> &str {
        self.register_manager.qubit_register_name()
    }

    /// Total number of classical bits.
    pub fn bit_register_size(&self) -> u32 {
        self.register_manager.bit_register_size()
    }

    /// Name of the (first) bit register.
    pub fn bit_register_name(&self) -> &str {
        self.register_manager.bit_register_name()
    }

    /// Number of instruction statements (gates and non-unitaries).
    pub fn instruction_count(&self) -> usize {
        self.ir
            .statements
            .iter()
            .filter(|s| s.instruction_name().is_some())
            .count()
    }

    /// For every bit, the acquisition index and qubit of the most recent
    /// measurement writing it.
    pub fn measurement_to_bit_map(&self) -> FxHashMap<u32, (usize, u32)> {
        let mut map = FxHashMap::default();
        let mut acquisition_index = 0usize;
        for statement in &self.ir.statements {
            if let Statement::NonUnitary(NonUnitary::Measure(measure)) = statement {
                map.insert(measure.bit.0, (acquisition_index, measure.qubit.0));
                acquisition_index += 1;
            }
        }
        map
    }

    /// Apply a merger pass.
    pub fn merge(&mut self, merger: &dyn Merger) -> CircuitResult<()> {
        merger.merge(&mut self.ir, self.register_manager.qubit_register_size())?;
        Ok(())
    }

    /// Apply a decomposer through the verified replacement loop.
    pub fn decompose(&mut self, decomposer: &dyn Decomposer) -> CircuitResult<()> {
        replace::decompose(&mut self.ir, &mut self.phase_map, decomposer)?;
        Ok(())
    }

    /// Replace every occurrence of a named gate, through the replacement
    /// loop.
    pub fn replace(
        &mut self,
        name: &str,
        replacement: &dyn Fn(&Gate) -> Vec<Gate>,
    ) -> CircuitResult<()> {
        replace::replace_named(&mut self.ir, &mut self.phase_map, name, replacement)?;
        Ok(())
    }

    /// Apply a router pass.
    pub fn route(&mut self, router: &dyn Router) -> CircuitResult<()> {
        router.route(&mut self.ir, self.register_manager.qubit_register_size())?;
        Ok(())
    }

    /// Obtain a placement from `mapper` and rewrite all qubit indices
    /// through it.
    pub fn map(&mut self, mapper: &dyn Mapper) -> CircuitResult<()> {
        let size = self.register_manager.qubit_register_size();
        let mapping = mapper.map(&self.ir, size)?;
        if (mapping.len() as u32) < size {
            return Err(CompileError::InvalidConfig(format!(
                "mapping of size {} does not cover the register of size {size}",
                mapping.len()
            ))
            .into());
        }
        remap_ir(&mut self.ir, &mapping)?;
        Ok(())
    }

    /// Run a validator.
    pub fn validate(&self, validator: &dyn Validator) -> CircuitResult<()> {
        validator.validate(&self.ir)?;
        Ok(())
    }

    /// Keep only assembly declarations whose backend name starts with
    /// `prefix`.
    pub fn asm_filter(&mut self, prefix: &str) {
        self.ir.statements.retain(|statement| match statement {
            Statement::Asm(asm) => asm.backend_name.starts_with(prefix),
            _ => true,
        });
    }

    /// Serialize to the given text format.
    pub fn export(&self, format: ExportFormat) -> CircuitResult<String> {
        match format {
            ExportFormat::CqasmV3 => Ok(self.to_string()),
            ExportFormat::CqasmV1 => {
                Ok(alsvid_cqasm::export_cqasm_v1(&self.register_manager, &self.ir)?)
            }
        }
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&alsvid_cqasm::circuit_to_string(
            &self.register_manager,
            &self.ir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Qubit, catalog};

    #[test]
    fn from_string_and_accessors() {
        let circuit =
            Circuit::from_string("version 3.0; qubit[3] q; bit[2] b; H q[0]").unwrap();
        assert_eq!(circuit.qubit_register_size(), 3);
        assert_eq!(circuit.bit_register_size(), 2);
        assert_eq!(circuit.qubit_register_name(), "q");
        assert_eq!(circuit.bit_register_name(), "b");
        assert_eq!(circuit.instruction_count(), 1);
    }

    #[test]
    fn measurement_map_keeps_latest() {
        let circuit = Circuit::from_string(
            "version 3.0; qubit[2] q; bit[1] b; b[0] = measure q[0]; b[0] = measure q[1]",
        )
        .unwrap();
        let map = circuit.measurement_to_bit_map();
        assert_eq!(map.get(&0), Some(&(1, 1)));
    }

    #[test]
    fn asm_filter_by_backend_prefix() {
        let mut circuit = Circuit::from_string(
            "version 3.0\nqubit q\nasm(Alpha) '''a'''\nasm(Beta) '''b'''\nH q[0]",
        )
        .unwrap();
        circuit.asm_filter("Alpha");
        assert_eq!(circuit.ir().statements.len(), 2);
    }

    #[test]
    fn replace_named_gate() {
        let mut circuit = Circuit::new(RegisterManager::with_sizes(1, 0), {
            let mut ir = alsvid_ir::Ir::new();
            ir.add_gate(catalog::x(Qubit(0)));
            ir
        });
        circuit
            .replace("X", &|gate| {
                let q = gate.qubit_operands()[0];
                vec![catalog::x90(q), catalog::x90(q)]
            })
            .unwrap();
        assert_eq!(circuit.ir().statements.len(), 2);
    }
}
