//! Read-only circuit validators.

use alsvid_ir::{Ir, Statement};
use rustc_hash::FxHashSet;

use crate::connectivity::Connectivity;
use crate::error::{CompileError, CompileResult};
use crate::pass::Validator;

/// Checks that every instruction name is in the target's primitive gate set.
pub struct PrimitiveGateValidator {
    primitive_gate_set: Vec<String>,
}

impl PrimitiveGateValidator {
    /// Create a validator for the given set of allowed instruction names.
    pub fn new(primitive_gate_set: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            primitive_gate_set: primitive_gate_set.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for PrimitiveGateValidator {
    fn validate(&self, ir: &Ir) -> CompileResult<()> {
        let mut offending: Vec<String> = vec![];
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for statement in &ir.statements {
            let Some(name) = statement.instruction_name() else {
                continue;
            };
            if !self.primitive_gate_set.iter().any(|allowed| allowed == name)
                && seen.insert(name)
            {
                offending.push(name.to_string());
            }
        }
        if offending.is_empty() {
            Ok(())
        } else {
            Err(CompileError::GatesNotInPrimitiveSet { names: offending })
        }
    }
}

/// Checks that every two-qubit gate acts on a connected qubit pair.
pub struct InteractionValidator {
    connectivity: Connectivity,
}

impl InteractionValidator {
    /// Create a validator for the given connectivity.
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }
}

impl Validator for InteractionValidator {
    fn validate(&self, ir: &Ir) -> CompileResult<()> {
        let mut offending: Vec<(u32, u32)> = vec![];
        let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
        for statement in &ir.statements {
            let Statement::Gate(gate) = statement else {
                continue;
            };
            let operands = gate.qubit_operands();
            if operands.len() != 2 {
                continue;
            }
            let pair = (operands[0].0, operands[1].0);
            if !self.connectivity.is_connected(pair.0, pair.1) && seen.insert(pair) {
                offending.push(pair);
            }
        }
        if offending.is_empty() {
            Ok(())
        } else {
            Err(CompileError::NonExecutableInteractions { pairs: offending })
        }
    }
}
