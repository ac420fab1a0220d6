use crate::error::{Error, Result};
use crate::matrix::{zeros, Op, ZERO};

/// Largest register the dense kernel accepts.
pub const MAX_QUBITS: usize = 12;

pub(crate) fn check_register(total_qubits: usize) -> Result<()> {
    if total_qubits == 0 || total_qubits > MAX_QUBITS {
        return Err(Error::InvalidParameter(format!(
            "register size {} outside 1..={}",
            total_qubits, MAX_QUBITS
        )));
    }
    Ok(())
}

pub(crate) fn check_qubits(qubits: &[usize], total_qubits: usize) -> Result<()> {
    check_register(total_qubits)?;
    for (i, &q) in qubits.iter().enumerate() {
        if q >= total_qubits {
            return Err(Error::InvalidParameter(format!(
                "qubit {} out of range for {} qubits",
                q, total_qubits
            )));
        }
        if qubits[..i].contains(&q) {
            return Err(Error::InvalidParameter(format!("duplicate qubit index {}", q)));
        }
    }
    Ok(())
}

/// Lifts `op` acting on `targets` to the full `total_qubits` register,
/// with identity on every other qubit.
///
/// `targets[0]` is the most significant factor of `op`, so
/// `embed(cnot, &[control, target], n)` uses the textbook CNOT matrix.
pub fn embed(op: &Op, targets: &[usize], total_qubits: usize) -> Result<Op> {
    if targets.is_empty() {
        return Err(Error::InvalidParameter("no target qubits".into()));
    }
    check_qubits(targets, total_qubits)?;

    let k = targets.len();
    let op_dim = 1usize << k;
    if op.nrows() != op_dim || op.ncols() != op_dim {
        return Err(Error::DimensionMismatch {
            expected: op_dim,
            got: op.nrows().max(op.ncols()),
        });
    }

    let mask = targets.iter().fold(0usize, |m, &t| m | (1 << t));
    let sub = |x: usize| {
        targets
            .iter()
            .enumerate()
            .fold(0usize, |acc, (pos, &t)| acc | (((x >> t) & 1) << (k - 1 - pos)))
    };

    let dim = 1usize << total_qubits;
    let mut out = zeros(dim, dim);
    for r in 0..dim {
        for c in 0..dim {
            if r & !mask != c & !mask {
                continue;
            }
            let v = op.read(sub(r), sub(c));
            if v != ZERO {
                out.write(r, c, v);
            }
        }
    }
    Ok(out)
}
