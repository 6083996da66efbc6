//! Simple mappers: identity, hardcoded, random.

use alsvid_ir::Ir;
use rand::SeedableRng;
use rand::seq::SliceRandom;

use super::Mapping;
use crate::error::{CompileError, CompileResult};
use crate::pass::Mapper;

/// Maps each virtual qubit to the same physical qubit.
pub struct IdentityMapper;

impl Mapper for IdentityMapper {
    fn map(&self, _ir: &Ir, qubit_register_size: u32) -> CompileResult<Mapping> {
        Ok(Mapping::identity(qubit_register_size))
    }
}

/// Maps each virtual qubit to a user-supplied physical qubit.
pub struct HardcodedMapper {
    mapping: Mapping,
}

impl HardcodedMapper {
    /// Create a mapper from an already-validated mapping.
    pub fn new(mapping: Mapping) -> Self {
        Self { mapping }
    }
}

impl Mapper for HardcodedMapper {
    fn map(&self, _ir: &Ir, qubit_register_size: u32) -> CompileResult<Mapping> {
        if self.mapping.len() != qubit_register_size as usize {
            return Err(CompileError::InvalidConfig(format!(
                "hardcoded mapping of size {} does not fit register of size {qubit_register_size}",
                self.mapping.len()
            )));
        }
        Ok(self.mapping.clone())
    }
}

/// Maps each virtual qubit to a uniformly random physical qubit.
///
/// A fresh permutation is drawn per call; construct with a seed for
/// reproducible placements.
pub struct RandomMapper {
    seed: Option<u64>,
}

impl RandomMapper {
    /// Create a mapper drawing from OS entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create a deterministic mapper with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Default for RandomMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper for RandomMapper {
    fn map(&self, _ir: &Ir, qubit_register_size: u32) -> CompileResult<Mapping> {
        let mut physical: Vec<u32> = (0..qubit_register_size).collect();
        match self.seed {
            Some(seed) => {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                physical.shuffle(&mut rng);
            }
            None => physical.shuffle(&mut rand::thread_rng()),
        }
        Mapping::new(physical)
    }
}
