//! Qubit and bit register layout.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::{Bit, Qubit};

/// The kind of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterKind {
    /// A quantum register.
    Qubit,
    /// A classical bit register.
    Bit,
}

/// A named register with a flat base offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Register {
    name: String,
    size: u32,
    offset: u32,
}

impl Register {
    /// The register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The register size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The base offset in the flat index space.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Holds the qubit and bit register layout of a circuit.
///
/// Each register maps a `(name, local_index)` pair to a flat physical index;
/// registers of the same kind are laid out back to back in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterManager {
    qubit_registers: Vec<Register>,
    bit_registers: Vec<Register>,
}

impl RegisterManager {
    /// The default qubit register name.
    pub const DEFAULT_QUBIT_REGISTER_NAME: &'static str = "q";
    /// The default bit register name.
    pub const DEFAULT_BIT_REGISTER_NAME: &'static str = "b";

    /// Create an empty register manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with the default register names and the given sizes.
    ///
    /// A bit register is only created when `bit_register_size > 0`.
    pub fn with_sizes(qubit_register_size: u32, bit_register_size: u32) -> Self {
        let mut manager = Self::new();
        // Infallible on a fresh manager.
        let _ = manager.add_register(
            RegisterKind::Qubit,
            Self::DEFAULT_QUBIT_REGISTER_NAME,
            qubit_register_size,
        );
        if bit_register_size > 0 {
            let _ = manager.add_register(
                RegisterKind::Bit,
                Self::DEFAULT_BIT_REGISTER_NAME,
                bit_register_size,
            );
        }
        manager
    }

    /// Declare a new register. Names must be unique per kind.
    pub fn add_register(
        &mut self,
        kind: RegisterKind,
        name: impl Into<String>,
        size: u32,
    ) -> IrResult<()> {
        let name = name.into();
        let registers = match kind {
            RegisterKind::Qubit => &mut self.qubit_registers,
            RegisterKind::Bit => &mut self.bit_registers,
        };
        if registers.iter().any(|r| r.name == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let offset = registers.iter().map(|r| r.size).sum();
        registers.push(Register { name, size, offset });
        Ok(())
    }

    /// Resolve `(register_name, local_index)` to a flat qubit index.
    pub fn qubit_index(&self, register_name: &str, local_index: u32) -> IrResult<Qubit> {
        let register = self
            .qubit_registers
            .iter()
            .find(|r| r.name == register_name)
            .ok_or_else(|| IrError::UnknownRegister(register_name.to_string()))?;
        if local_index >= register.size {
            return Err(IrError::IndexOutOfBounds {
                register: register.name.clone(),
                index: local_index,
                size: register.size,
            });
        }
        Ok(Qubit(register.offset + local_index))
    }

    /// Resolve `(register_name, local_index)` to a flat bit index.
    pub fn bit_index(&self, register_name: &str, local_index: u32) -> IrResult<Bit> {
        let register = self
            .bit_registers
            .iter()
            .find(|r| r.name == register_name)
            .ok_or_else(|| IrError::UnknownRegister(register_name.to_string()))?;
        if local_index >= register.size {
            return Err(IrError::IndexOutOfBounds {
                register: register.name.clone(),
                index: local_index,
                size: register.size,
            });
        }
        Ok(Bit(register.offset + local_index))
    }

    /// Resolve a flat qubit back to `(register, local_index)`.
    pub fn resolve_qubit(&self, qubit: Qubit) -> IrResult<(&Register, u32)> {
        Self::resolve(&self.qubit_registers, qubit.0).ok_or(IrError::QubitOutOfBounds {
            qubit,
            size: self.qubit_register_size(),
        })
    }

    /// Resolve a flat bit back to `(register, local_index)`.
    pub fn resolve_bit(&self, bit: Bit) -> IrResult<(&Register, u32)> {
        Self::resolve(&self.bit_registers, bit.0).ok_or(IrError::BitOutOfBounds {
            bit,
            size: self.bit_register_size(),
        })
    }

    fn resolve(registers: &[Register], index: u32) -> Option<(&Register, u32)> {
        registers
            .iter()
            .find(|r| index >= r.offset && index < r.offset + r.size)
            .map(|r| (r, index - r.offset))
    }

    /// Total number of qubits across all registers.
    pub fn qubit_register_size(&self) -> u32 {
        self.qubit_registers.iter().map(|r| r.size).sum()
    }

    /// Total number of bits across all registers.
    pub fn bit_register_size(&self) -> u32 {
        self.bit_registers.iter().map(|r| r.size).sum()
    }

    /// The name of the (first) qubit register.
    pub fn qubit_register_name(&self) -> &str {
        self.qubit_registers
            .first()
            .map(|r| r.name.as_str())
            .unwrap_or(Self::DEFAULT_QUBIT_REGISTER_NAME)
    }

    /// The name of the (first) bit register.
    pub fn bit_register_name(&self) -> &str {
        self.bit_registers
            .first()
            .map(|r| r.name.as_str())
            .unwrap_or(Self::DEFAULT_BIT_REGISTER_NAME)
    }

    /// The declared qubit registers, in declaration order.
    pub fn qubit_registers(&self) -> &[Register] {
        &self.qubit_registers
    }

    /// The declared bit registers, in declaration order.
    pub fn bit_registers(&self) -> &[Register] {
        &self.bit_registers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_indexing_with_offsets() {
        let mut manager = RegisterManager::new();
        manager
            .add_register(RegisterKind::Qubit, "q0", 2)
            .unwrap();
        manager
            .add_register(RegisterKind::Qubit, "q1", 3)
            .unwrap();

        assert_eq!(manager.qubit_index("q0", 1).unwrap(), Qubit(1));
        assert_eq!(manager.qubit_index("q1", 0).unwrap(), Qubit(2));
        assert_eq!(manager.qubit_register_size(), 5);

        let (register, local) = manager.resolve_qubit(Qubit(4)).unwrap();
        assert_eq!(register.name(), "q1");
        assert_eq!(local, 2);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut manager = RegisterManager::new();
        manager.add_register(RegisterKind::Qubit, "q", 2).unwrap();
        assert!(matches!(
            manager.add_register(RegisterKind::Qubit, "q", 1),
            Err(IrError::DuplicateRegister(_))
        ));
        // The same name is fine for a different kind.
        assert!(manager.add_register(RegisterKind::Bit, "q", 2).is_ok());
    }

    #[test]
    fn bounds_checked() {
        let manager = RegisterManager::with_sizes(2, 1);
        assert!(manager.qubit_index("q", 2).is_err());
        assert!(manager.qubit_index("nope", 0).is_err());
        assert!(manager.bit_index("b", 0).is_ok());
        assert!(manager.resolve_qubit(Qubit(7)).is_err());
    }
}
