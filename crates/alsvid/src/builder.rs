//! Fluent circuit construction.

use alsvid_ir::{
    Barrier, Bit, Gate, Init, Ir, IrError, IrResult, Measure, NonUnitary, Qubit,
    RegisterManager, Reset, Wait, catalog,
};

use crate::circuit::Circuit;

/// Builder-pattern construction of circuits over the default catalog.
///
/// Every gate method checks its operands against the register sizes, so a
/// finished builder always yields a well-formed circuit.
///
/// # Example
///
/// ```rust
/// use alsvid::CircuitBuilder;
///
/// let mut builder = CircuitBuilder::new(3);
/// builder.h(0).unwrap().cnot(0, 1).unwrap().cnot(0, 2).unwrap();
/// let circuit = builder.to_circuit();
/// assert_eq!(circuit.qubit_register_size(), 3);
/// ```
#[derive(Debug)]
pub struct CircuitBuilder {
    register_manager: RegisterManager,
    ir: Ir,
}

impl CircuitBuilder {
    /// Create a builder for a circuit with the given qubit count and no
    /// classical bits.
    pub fn new(qubit_register_size: u32) -> Self {
        Self::with_bits(qubit_register_size, 0)
    }

    /// Create a builder with both qubit and bit registers.
    pub fn with_bits(qubit_register_size: u32, bit_register_size: u32) -> Self {
        Self {
            register_manager: RegisterManager::with_sizes(
                qubit_register_size,
                bit_register_size,
            ),
            ir: Ir::new(),
        }
    }

    fn qubit(&self, index: u32) -> IrResult<Qubit> {
        let size = self.register_manager.qubit_register_size();
        if index >= size {
            return Err(IrError::QubitOutOfBounds {
                qubit: Qubit(index),
                size,
            });
        }
        Ok(Qubit(index))
    }

    fn bit(&self, index: u32) -> IrResult<Bit> {
        let size = self.register_manager.bit_register_size();
        if index >= size {
            return Err(IrError::BitOutOfBounds {
                bit: Bit(index),
                size,
            });
        }
        Ok(Bit(index))
    }

    fn push(&mut self, gate: Gate) -> &mut Self {
        self.ir.add_gate(gate);
        self
    }

    /// Append an arbitrary gate, checking its operands.
    pub fn gate(&mut self, gate: Gate) -> IrResult<&mut Self> {
        for qubit in gate.qubit_operands() {
            self.qubit(qubit.0)?;
        }
        Ok(self.push(gate))
    }

    /// Identity gate.
    pub fn i(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::i(self.qubit(qubit)?)))
    }

    /// Hadamard gate.
    pub fn h(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::h(self.qubit(qubit)?)))
    }

    /// Pauli-X gate.
    pub fn x(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::x(self.qubit(qubit)?)))
    }

    /// Pauli-Y gate.
    pub fn y(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::y(self.qubit(qubit)?)))
    }

    /// Pauli-Z gate.
    pub fn z(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::z(self.qubit(qubit)?)))
    }

    /// S gate.
    pub fn s(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::s(self.qubit(qubit)?)))
    }

    /// S-dagger gate.
    pub fn sdag(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::sdag(self.qubit(qubit)?)))
    }

    /// T gate.
    pub fn t(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::t(self.qubit(qubit)?)))
    }

    /// T-dagger gate.
    pub fn tdag(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::tdag(self.qubit(qubit)?)))
    }

    /// +90° X rotation.
    pub fn x90(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::x90(self.qubit(qubit)?)))
    }

    /// −90° X rotation.
    pub fn mx90(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::mx90(self.qubit(qubit)?)))
    }

    /// +90° Y rotation.
    pub fn y90(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::y90(self.qubit(qubit)?)))
    }

    /// −90° Y rotation.
    pub fn my90(&mut self, qubit: u32) -> IrResult<&mut Self> {
        Ok(self.push(catalog::my90(self.qubit(qubit)?)))
    }

    /// X rotation.
    pub fn rx(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        Ok(self.push(catalog::rx(self.qubit(qubit)?, theta)))
    }

    /// Y rotation.
    pub fn ry(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        Ok(self.push(catalog::ry(self.qubit(qubit)?, theta)))
    }

    /// Z rotation.
    pub fn rz(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        Ok(self.push(catalog::rz(self.qubit(qubit)?, theta)))
    }

    /// Arbitrary-axis rotation.
    pub fn rn(
        &mut self,
        qubit: u32,
        nx: f64,
        ny: f64,
        nz: f64,
        theta: f64,
        phi: f64,
    ) -> IrResult<&mut Self> {
        let gate = catalog::rn(self.qubit(qubit)?, nx, ny, nz, theta, phi)?;
        Ok(self.push(gate))
    }

    /// Controlled-X gate.
    pub fn cnot(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        let gate = catalog::cnot(self.qubit(control)?, self.qubit(target)?)?;
        Ok(self.push(gate))
    }

    /// Controlled-Z gate.
    pub fn cz(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        let gate = catalog::cz(self.qubit(control)?, self.qubit(target)?)?;
        Ok(self.push(gate))
    }

    /// Controlled phase rotation.
    pub fn cr(&mut self, control: u32, target: u32, theta: f64) -> IrResult<&mut Self> {
        let gate = catalog::cr(self.qubit(control)?, self.qubit(target)?, theta)?;
        Ok(self.push(gate))
    }

    /// Controlled phase rotation by `2π/2^k`.
    pub fn crk(&mut self, control: u32, target: u32, k: i64) -> IrResult<&mut Self> {
        let gate = catalog::crk(self.qubit(control)?, self.qubit(target)?, k)?;
        Ok(self.push(gate))
    }

    /// SWAP gate.
    pub fn swap(&mut self, qubit_0: u32, qubit_1: u32) -> IrResult<&mut Self> {
        let gate = catalog::swap(self.qubit(qubit_0)?, self.qubit(qubit_1)?)?;
        Ok(self.push(gate))
    }

    /// Z-basis measurement.
    pub fn measure(&mut self, qubit: u32, bit: u32) -> IrResult<&mut Self> {
        let measure = Measure::new(self.qubit(qubit)?, self.bit(bit)?);
        self.ir.add_non_unitary(NonUnitary::Measure(measure));
        Ok(self)
    }

    /// Qubit initialization.
    pub fn init(&mut self, qubit: u32) -> IrResult<&mut Self> {
        let init = Init {
            qubit: self.qubit(qubit)?,
        };
        self.ir.add_non_unitary(NonUnitary::Init(init));
        Ok(self)
    }

    /// Qubit reset.
    pub fn reset(&mut self, qubit: u32) -> IrResult<&mut Self> {
        let reset = Reset {
            qubit: self.qubit(qubit)?,
        };
        self.ir.add_non_unitary(NonUnitary::Reset(reset));
        Ok(self)
    }

    /// Scheduling barrier.
    pub fn barrier(&mut self, qubit: u32) -> IrResult<&mut Self> {
        let barrier = Barrier {
            qubit: self.qubit(qubit)?,
        };
        self.ir.add_non_unitary(NonUnitary::Barrier(barrier));
        Ok(self)
    }

    /// Idle wait.
    pub fn wait(&mut self, qubit: u32, time: i64) -> IrResult<&mut Self> {
        let wait = Wait {
            qubit: self.qubit(qubit)?,
            time,
        };
        self.ir.add_non_unitary(NonUnitary::Wait(wait));
        Ok(self)
    }

    /// Finish building.
    pub fn to_circuit(self) -> Circuit {
        Circuit::new(self.register_manager, self.ir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_ghz_circuit() {
        let mut builder = CircuitBuilder::with_bits(3, 3);
        builder.h(0).unwrap().cnot(0, 1).unwrap().cnot(1, 2).unwrap();
        builder
            .measure(0, 0)
            .unwrap()
            .measure(1, 1)
            .unwrap()
            .measure(2, 2)
            .unwrap();
        let circuit = builder.to_circuit();

        assert_eq!(circuit.instruction_count(), 6);
        assert_eq!(
            circuit.to_string(),
            "version 3.0\n\nqubit[3] q\nbit[3] b\n\nH q[0]\nCNOT q[0], q[1]\nCNOT q[1], q[2]\n\
             b[0] = measure q[0]\nb[1] = measure q[1]\nb[2] = measure q[2]\n"
        );
    }

    #[test]
    fn rejects_out_of_bounds_operands() {
        let mut builder = CircuitBuilder::new(2);
        assert!(builder.h(2).is_err());
        assert!(builder.measure(0, 0).is_err());
    }

    #[test]
    fn rejects_coinciding_control_and_target() {
        let mut builder = CircuitBuilder::new(2);
        assert!(builder.cnot(0, 0).is_err());
    }
}
