//! Initial-placement mappers and the qubit remapper.

mod mip;
mod simple;

pub use mip::MipMapper;
pub use simple::{HardcodedMapper, IdentityMapper, RandomMapper};

use alsvid_ir::{Ir, Qubit};
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// A bijection from virtual qubit indices to physical qubit indices,
/// presented as the sequence of physical indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping(Vec<u32>);

impl Mapping {
    /// Create a mapping from the physical index of every virtual qubit.
    ///
    /// The sequence must be a permutation of `0..len`.
    pub fn new(physical_qubit_register: Vec<u32>) -> CompileResult<Self> {
        let mut sorted = physical_qubit_register.clone();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(i, &v)| i as u32 != v) {
            return Err(CompileError::InvalidConfig(
                "mapping is not a bijection onto 0..len".to_string(),
            ));
        }
        Ok(Self(physical_qubit_register))
    }

    /// The identity mapping of the given size.
    pub fn identity(size: u32) -> Self {
        Self((0..size).collect())
    }

    /// The physical index of a virtual qubit.
    pub fn physical(&self, virtual_index: u32) -> Option<u32> {
        self.0.get(virtual_index as usize).copied()
    }

    /// The mapping size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The physical indices, in virtual-index order.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Rewrite every qubit index in the IR through the mapping.
pub fn remap_ir(ir: &mut Ir, mapping: &Mapping) -> CompileResult<()> {
    for statement in &ir.statements {
        for qubit in statement.qubit_operands() {
            if mapping.physical(qubit.0).is_none() {
                return Err(CompileError::InvalidConfig(format!(
                    "qubit {} is outside the mapping of size {}",
                    qubit.0,
                    mapping.len()
                )));
            }
        }
    }
    for statement in &mut ir.statements {
        statement.map_qubits(&mut |q| {
            Qubit(mapping.physical(q.0).unwrap_or(q.0))
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::catalog;

    #[test]
    fn mapping_must_be_a_bijection() {
        assert!(Mapping::new(vec![3, 1, 0, 2]).is_ok());
        assert!(Mapping::new(vec![0, 0, 1]).is_err());
        assert!(Mapping::new(vec![1, 2, 3]).is_err());
    }

    #[test]
    fn remap_rewrites_all_indices() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(0)));
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
        let mapping = Mapping::new(vec![1, 0]).unwrap();
        remap_ir(&mut ir, &mapping).unwrap();
        assert_eq!(ir.statements[0].qubit_operands(), vec![Qubit(1)]);
        assert_eq!(
            ir.statements[1].qubit_operands(),
            vec![Qubit(1), Qubit(0)]
        );
    }

    #[test]
    fn remap_rejects_out_of_range_qubits() {
        let mut ir = Ir::new();
        ir.add_gate(catalog::h(Qubit(5)));
        let mapping = Mapping::identity(2);
        assert!(remap_ir(&mut ir, &mapping).is_err());
        // The IR is untouched on failure.
        assert_eq!(ir.statements[0].qubit_operands(), vec![Qubit(5)]);
    }
}
