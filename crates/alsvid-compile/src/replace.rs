//! The central replacement loop.
//!
//! Every decomposer output goes through [`check_gate_replacement`], which
//! verifies the rewrite preserves the quantum state up to a global phase on
//! the gate's operand support, and accounts the measured phase into the
//! circuit's [`PhaseMap`].

use alsvid_ir::{Gate, Ir, Qubit, Statement, catalog, expand, math::ATOL};
use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::pass::Decomposer;
use crate::phase::PhaseMap;

/// Verify `replacement` against `gate` and return the (possibly corrected)
/// replacement list.
///
/// - If the original gate is the identity on its support (up to a global
///   phase), the replacement is discarded entirely.
/// - The replacement must act on exactly the gate's operand qubits.
/// - The replacement unitary must match the gate unitary up to a global
///   phase; the measured phase is accumulated into `phase_map` on every
///   operand qubit.
/// - For multi-qubit gates, a trailing `Rz` is appended when the accumulated
///   per-qubit phases have drifted apart, keeping them consistent.
pub fn check_gate_replacement(
    gate: &Gate,
    replacement: Vec<Gate>,
    phase_map: &mut PhaseMap,
) -> CompileResult<Vec<Gate>> {
    let operands = gate.qubit_operands();

    let reindexed_gate = expand::reindexed(std::slice::from_ref(gate), &operands)?;
    let replaced_matrix = expand::circuit_matrix(&reindexed_gate, operands.len() as u32)?;

    if replaced_matrix.is_identity_up_to_global_phase() {
        return Ok(vec![]);
    }

    let mut replacement_operands: Vec<Qubit> = vec![];
    for g in &replacement {
        for q in g.qubit_operands() {
            if !replacement_operands.contains(&q) {
                replacement_operands.push(q);
            }
        }
    }
    let mut expected = operands.clone();
    expected.sort_unstable();
    replacement_operands.sort_unstable();
    if expected != replacement_operands {
        return Err(CompileError::BadReplacementOperands {
            gate: gate.name().to_string(),
        });
    }

    let reindexed_replacement = expand::reindexed(&replacement, &operands)?;
    let replacement_matrix =
        expand::circuit_matrix(&reindexed_replacement, operands.len() as u32)?;

    if !replaced_matrix.equivalent_up_to_global_phase(&replacement_matrix) {
        return Err(CompileError::NonUnitaryPreserving {
            gate: gate.name().to_string(),
        });
    }

    let mut replacement = replacement;
    if let Some(lambda) = replaced_matrix.phase_difference(&replacement_matrix) {
        let euler_phase = lambda.arg();
        for &q in &operands {
            phase_map.add_qubit_phase(q, euler_phase);
        }
        if operands.len() > 1 {
            let relative_phase =
                phase_map.get_qubit_phase(operands[1]) - phase_map.get_qubit_phase(operands[0]);
            if relative_phase.abs() > ATOL {
                trace!(
                    gate = gate.name(),
                    relative_phase,
                    "appending Rz to equalize per-qubit phases"
                );
                replacement.push(catalog::rz(operands[0], -relative_phase));
            }
        }
    }

    Ok(replacement)
}

/// Apply `decomposer` to every gate of the circuit, splicing each verified
/// replacement into the statement list.
pub fn decompose(
    ir: &mut Ir,
    phase_map: &mut PhaseMap,
    decomposer: &dyn Decomposer,
) -> CompileResult<()> {
    let mut index = 0;
    while index < ir.statements.len() {
        let Statement::Gate(gate) = &ir.statements[index] else {
            index += 1;
            continue;
        };

        let replacement = decomposer.decompose(gate);
        let replacement = check_gate_replacement(gate, replacement, phase_map)?;
        let replacement_len = replacement.len();
        ir.statements
            .splice(index..=index, replacement.into_iter().map(Statement::Gate));
        index += replacement_len;
    }
    Ok(())
}

struct NamedReplacer<'a> {
    name: &'a str,
    replacement: &'a dyn Fn(&Gate) -> Vec<Gate>,
}

impl Decomposer for NamedReplacer<'_> {
    fn decompose(&self, gate: &Gate) -> Vec<Gate> {
        if gate.is_anonymous() || gate.name() != self.name {
            return vec![gate.clone()];
        }
        (self.replacement)(gate)
    }
}

/// Like [`decompose`], but only rewrites gates with the given catalog name.
pub fn replace_named(
    ir: &mut Ir,
    phase_map: &mut PhaseMap,
    name: &str,
    replacement: &dyn Fn(&Gate) -> Vec<Gate>,
) -> CompileResult<()> {
    decompose(ir, phase_map, &NamedReplacer { name, replacement })
}
