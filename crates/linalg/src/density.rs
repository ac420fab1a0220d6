use crate::embed::check_register;
use crate::error::{Error, Result};
use crate::matrix::{self, zeros, Op, C64, ZERO};

/// A 2^k × 2^k density matrix over `k` qubits.
///
/// Construction only checks the shape; the physical invariants are checked by
/// [`crate::validate::check_density_matrix`].
#[derive(Clone, Debug)]
pub struct DensityMatrix {
    num_qubits: usize,
    data: Op,
}

impl DensityMatrix {
    pub fn from_matrix(data: Op) -> Result<Self> {
        if data.nrows() != data.ncols() {
            return Err(Error::DimensionMismatch {
                expected: data.nrows(),
                got: data.ncols(),
            });
        }
        let num_qubits = matrix::qubits_for_dim(data.nrows()).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "density matrix dimension {} is not a power of two",
                data.nrows()
            ))
        })?;
        Ok(Self { num_qubits, data })
    }

    /// ρ = |ψ⟩⟨ψ| for a column vector ψ.
    pub fn from_ket(ket: &Op) -> Result<Self> {
        if ket.ncols() != 1 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                got: ket.ncols(),
            });
        }
        let dim = ket.nrows();
        let mut data = zeros(dim, dim);
        for i in 0..dim {
            for j in 0..dim {
                data.write(i, j, ket.read(i, 0) * ket.read(j, 0).conj());
            }
        }
        Self::from_matrix(data)
    }

    /// ρ = I / 2^k.
    pub fn maximally_mixed(num_qubits: usize) -> Result<Self> {
        check_register(num_qubits)?;
        let dim = 1usize << num_qubits;
        let data = matrix::scale(&matrix::identity(dim), C64::new(1.0 / dim as f64, 0.0));
        Ok(Self { num_qubits, data })
    }

    /// Uniform mixture of equally sized states.
    pub fn average(states: &[DensityMatrix]) -> Result<Self> {
        let first = states.first().ok_or_else(|| {
            Error::InvalidParameter("cannot average an empty set of states".into())
        })?;
        let dim = first.dim();
        let mut acc = zeros(dim, dim);
        for s in states {
            if s.dim() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: s.dim(),
                });
            }
            matrix::add_assign(&mut acc, &s.data)?;
        }
        let w = C64::new(1.0 / states.len() as f64, 0.0);
        Ok(Self {
            num_qubits: first.num_qubits,
            data: matrix::scale(&acc, w),
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> C64 {
        self.data.read(row, col)
    }

    pub fn matrix(&self) -> &Op {
        &self.data
    }

    pub fn trace(&self) -> C64 {
        matrix::trace(&self.data)
    }

    /// Tr(ρ²) = Σ_ij ρ_ij ρ_ji, without forming ρ².
    pub fn purity(&self) -> f64 {
        let mut acc = ZERO;
        for i in 0..self.dim() {
            for j in 0..self.dim() {
                acc += self.data.read(i, j) * self.data.read(j, i);
            }
        }
        acc.re
    }
}
