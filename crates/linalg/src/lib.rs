//! Dense complex linear algebra for small multi-qubit density matrices.
//!
//! Qubit 0 is the least significant factor of every basis index: an operator
//! acting on qubit 0 of a 3-qubit register is `I ⊗ I ⊗ op`.

pub mod density;
pub mod embed;
pub mod error;
pub mod evolve;
pub mod kraus;
pub mod matrix;
pub mod partial_trace;
pub mod validate;

pub use density::DensityMatrix;
pub use error::{Error, Result, Violation};
pub use kraus::KrausChannel;
pub use matrix::{Op, C64};
