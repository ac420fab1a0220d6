use std::fmt;

use num_complex::Complex64;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the kernel and everything built on top of it.
///
/// None of these are transient: they mean either bad input or a broken
/// invariant, and the current run must be abandoned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An argument is outside its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An evolution operator failed the U†U = I check.
    #[error("operator is not unitary: max |U†U - I| = {deviation:.3e} (dim {dim})")]
    NonUnitaryOperator { dim: usize, deviation: f64 },

    /// A state failed one of the density-matrix invariants.
    #[error("invalid density matrix: {violation} (dim {dim}, trace {trace})")]
    InvalidDensityMatrix {
        violation: Violation,
        dim: usize,
        trace: Complex64,
    },

    /// Operand dimensions are incompatible with each other or with the qubit count.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// The density-matrix invariant that did not hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    NotSquare,
    TraceNotUnity,
    NotHermitian { deviation: f64 },
    NotPositive { min_eigenvalue: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotSquare => write!(f, "matrix is not square"),
            Violation::TraceNotUnity => write!(f, "trace is not unity"),
            Violation::NotHermitian { deviation } => {
                write!(f, "not Hermitian (max |A - A†| = {:.3e})", deviation)
            }
            Violation::NotPositive { min_eigenvalue } => {
                write!(f, "not positive semi-definite (min eigenvalue {:.3e})", min_eigenvalue)
            }
        }
    }
}
