use crate::error::{Error, Result};
use crate::matrix::{self, Op};

/// An ordered set of Kraus operators {K_i} with Σ K_i†K_i = I.
///
/// Immutable once built; borrowed by [`crate::evolve::apply_channel`].
#[derive(Clone, Debug)]
pub struct KrausChannel {
    operators: Vec<Op>,
    num_qubits: usize,
}

impl KrausChannel {
    /// Checks shape and completeness before accepting the operators.
    pub fn new(operators: Vec<Op>, tolerance: f64) -> Result<Self> {
        let first = operators.first().ok_or_else(|| {
            Error::InvalidParameter("a channel needs at least one Kraus operator".into())
        })?;
        let dim = first.nrows();
        let num_qubits = matrix::qubits_for_dim(dim).ok_or_else(|| {
            Error::InvalidParameter(format!("Kraus dimension {} is not a power of two", dim))
        })?;

        for k in &operators {
            if k.nrows() != dim || k.ncols() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: k.nrows().max(k.ncols()),
                });
            }
        }

        let channel = Self {
            operators,
            num_qubits,
        };
        let deviation = channel.completeness_deviation()?;
        if deviation > tolerance {
            return Err(Error::InvalidParameter(format!(
                "Kraus operators violate completeness: max |ΣK†K - I| = {:.3e}",
                deviation
            )));
        }
        Ok(channel)
    }

    pub fn operators(&self) -> &[Op] {
        &self.operators
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Σ K_i†K_i.
    pub fn completeness(&self) -> Result<Op> {
        let dim = 1usize << self.num_qubits;
        let mut acc = matrix::zeros(dim, dim);
        for k in &self.operators {
            let kk = matrix::matmul(&matrix::adjoint(k), k)?;
            matrix::add_assign(&mut acc, &kk)?;
        }
        Ok(acc)
    }

    /// Max entry of |Σ K_i†K_i − I|.
    pub fn completeness_deviation(&self) -> Result<f64> {
        let sum = self.completeness()?;
        Ok(matrix::max_abs_diff(&sum, &matrix::identity(1 << self.num_qubits)))
    }
}
