use crate::density::DensityMatrix;
use crate::embed::{check_register, embed};
use crate::error::{Error, Result};
use crate::kraus::KrausChannel;
use crate::matrix::{self, Op};
use crate::validate::check_unitary;

fn check_dims(rho: &DensityMatrix, op: &Op) -> Result<()> {
    if op.nrows() != rho.dim() || op.ncols() != rho.dim() {
        return Err(Error::DimensionMismatch {
            expected: rho.dim(),
            got: op.nrows().max(op.ncols()),
        });
    }
    Ok(())
}

/// ρ' = U ρ U†. Unitarity of `u` is the caller's responsibility.
pub fn apply_unitary(rho: &DensityMatrix, u: &Op) -> Result<DensityMatrix> {
    check_dims(rho, u)?;
    DensityMatrix::from_matrix(matrix::conjugate_by(u, rho.matrix())?)
}

/// Like [`apply_unitary`], but rejects `u` unless U†U = I within `tolerance`.
pub fn apply_unitary_checked(rho: &DensityMatrix, u: &Op, tolerance: f64) -> Result<DensityMatrix> {
    check_dims(rho, u)?;
    check_unitary(u, tolerance)?;
    apply_unitary(rho, u)
}

/// ρ' = Σ_i E_i ρ E_i†, with E_i the Kraus operator K_i lifted onto `target`.
pub fn apply_channel(
    rho: &DensityMatrix,
    channel: &KrausChannel,
    target: usize,
    total_qubits: usize,
) -> Result<DensityMatrix> {
    check_register(total_qubits)?;
    if rho.num_qubits() != total_qubits {
        return Err(Error::DimensionMismatch {
            expected: 1 << total_qubits,
            got: rho.dim(),
        });
    }
    if channel.num_qubits() != 1 {
        return Err(Error::DimensionMismatch {
            expected: 2,
            got: 1 << channel.num_qubits(),
        });
    }

    let dim = rho.dim();
    let mut acc = matrix::zeros(dim, dim);
    for k in channel.operators() {
        let e = embed(k, &[target], total_qubits)?;
        let term = matrix::conjugate_by(&e, rho.matrix())?;
        matrix::add_assign(&mut acc, &term)?;
    }
    DensityMatrix::from_matrix(acc)
}
