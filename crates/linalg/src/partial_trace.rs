use crate::density::DensityMatrix;
use crate::embed::{check_qubits, check_register};
use crate::error::{Error, Result};
use crate::matrix::{zeros, ZERO};

/// Scatters the low bits of `bits` onto the positions listed in `qubits`.
fn spread(bits: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0usize, |acc, (j, &q)| acc | (((bits >> j) & 1) << q))
}

/// Sums out the qubits in `traced_out`.
///
/// The remaining qubits keep their relative order: the lowest surviving qubit
/// becomes qubit 0 of the result.
pub fn partial_trace(
    rho: &DensityMatrix,
    traced_out: &[usize],
    total_qubits: usize,
) -> Result<DensityMatrix> {
    check_register(total_qubits)?;
    if rho.num_qubits() != total_qubits {
        return Err(Error::DimensionMismatch {
            expected: 1 << total_qubits,
            got: rho.dim(),
        });
    }
    check_qubits(traced_out, total_qubits)?;

    let kept: Vec<usize> = (0..total_qubits)
        .filter(|q| !traced_out.contains(q))
        .collect();
    let kept_dim = 1usize << kept.len();
    let traced_dim = 1usize << traced_out.len();
    let env: Vec<usize> = (0..traced_dim).map(|t| spread(t, traced_out)).collect();

    let mut out = zeros(kept_dim, kept_dim);
    for r in 0..kept_dim {
        let rf = spread(r, &kept);
        for c in 0..kept_dim {
            let cf = spread(c, &kept);
            let mut acc = ZERO;
            for &e in &env {
                acc += rho.get(rf | e, cf | e);
            }
            out.write(r, c, acc);
        }
    }
    DensityMatrix::from_matrix(out)
}
