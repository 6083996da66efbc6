//! Qubit and classical bit references.

use serde::{Deserialize, Serialize};

/// A reference to a qubit by flat physical index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Qubit(pub u32);

impl Qubit {
    /// Get the index as usize for bit manipulation.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Qubit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Qubit[{}]", self.0)
    }
}

impl From<u32> for Qubit {
    fn from(index: u32) -> Self {
        Qubit(index)
    }
}

/// A reference to a classical bit by flat index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Bit(pub u32);

impl Bit {
    /// Get the index as usize.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bit[{}]", self.0)
    }
}

impl From<u32> for Bit {
    fn from(index: u32) -> Self {
        Bit(index)
    }
}
