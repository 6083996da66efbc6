//! Gate decomposition passes.

mod aba;
mod cnot;
mod cnot2cz;
mod cz;
mod mckay;
mod swap;

pub use aba::{
    XyxDecomposer, XzxDecomposer, YxyDecomposer, YzyDecomposer, ZxzDecomposer, ZyzDecomposer,
};
pub use cnot::CnotDecomposer;
pub use cnot2cz::Cnot2CzDecomposer;
pub use cz::CzDecomposer;
pub use mckay::McKayDecomposer;
pub use swap::{Swap2CnotDecomposer, Swap2CzDecomposer};
