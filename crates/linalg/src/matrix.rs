use crate::error::{Error, Result};
use faer::Mat;
use num_complex::Complex64;

pub type C64 = Complex64;

/// Dense row/column indexed complex matrix.
pub type Op = Mat<C64>;

pub const ZERO: C64 = C64::new(0.0, 0.0);
pub const ONE: C64 = C64::new(1.0, 0.0);

pub fn zeros(rows: usize, cols: usize) -> Op {
    Mat::<C64>::zeros(rows, cols)
}

pub fn identity(dim: usize) -> Op {
    let mut out = zeros(dim, dim);
    for i in 0..dim {
        out.write(i, i, ONE);
    }
    out
}

/// Builds a square matrix from row-major literals.
pub fn from_rows<const N: usize>(rows: [[C64; N]; N]) -> Op {
    let mut out = zeros(N, N);
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            out.write(i, j, v);
        }
    }
    out
}

/// Builds a column vector.
pub fn column(entries: &[C64]) -> Op {
    let mut out = zeros(entries.len(), 1);
    for (i, &v) in entries.iter().enumerate() {
        out.write(i, 0, v);
    }
    out
}

/// Returns `k` when `dim == 2^k`.
pub fn qubits_for_dim(dim: usize) -> Option<usize> {
    if dim.is_power_of_two() {
        Some(dim.trailing_zeros() as usize)
    } else {
        None
    }
}

/// Tensor (Kronecker) product `a ⊗ b`; `a` is the more significant factor.
pub fn kron(a: &Op, b: &Op) -> Op {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = zeros(ar * br, ac * bc);

    for i in 0..ar {
        for j in 0..ac {
            let aij = a.read(i, j);
            if aij == ZERO {
                continue;
            }
            for k in 0..br {
                for l in 0..bc {
                    out.write(i * br + k, j * bc + l, aij * b.read(k, l));
                }
            }
        }
    }
    out
}

pub fn matmul(a: &Op, b: &Op) -> Result<Op> {
    if a.ncols() != b.nrows() {
        return Err(Error::DimensionMismatch {
            expected: a.ncols(),
            got: b.nrows(),
        });
    }

    let mut out = zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for k in 0..a.ncols() {
            let aik = a.read(i, k);
            if aik == ZERO {
                continue;
            }
            for j in 0..b.ncols() {
                let cur = out.read(i, j);
                out.write(i, j, cur + aik * b.read(k, j));
            }
        }
    }
    Ok(out)
}

/// Conjugate transpose A†.
pub fn adjoint(a: &Op) -> Op {
    let mut out = zeros(a.ncols(), a.nrows());
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            out.write(j, i, a.read(i, j).conj());
        }
    }
    out
}

pub fn trace(a: &Op) -> C64 {
    let n = a.nrows().min(a.ncols());
    let mut acc = ZERO;
    for i in 0..n {
        acc += a.read(i, i);
    }
    acc
}

/// `U · A · U†`.
pub fn conjugate_by(u: &Op, a: &Op) -> Result<Op> {
    let ua = matmul(u, a)?;
    matmul(&ua, &adjoint(u))
}

/// Adds `b` into `acc` element-wise.
pub fn add_assign(acc: &mut Op, b: &Op) -> Result<()> {
    if acc.nrows() != b.nrows() || acc.ncols() != b.ncols() {
        return Err(Error::DimensionMismatch {
            expected: acc.nrows() * acc.ncols(),
            got: b.nrows() * b.ncols(),
        });
    }
    for i in 0..acc.nrows() {
        for j in 0..acc.ncols() {
            let cur = acc.read(i, j);
            acc.write(i, j, cur + b.read(i, j));
        }
    }
    Ok(())
}

pub fn scale(a: &Op, s: C64) -> Op {
    let mut out = a.clone();
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            out.write(i, j, a.read(i, j) * s);
        }
    }
    out
}

/// Largest entry-wise modulus of `a - b`; infinite when the shapes differ.
pub fn max_abs_diff(a: &Op, b: &Op) -> f64 {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return f64::INFINITY;
    }
    let mut worst = 0.0f64;
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            worst = worst.max((a.read(i, j) - b.read(i, j)).norm());
        }
    }
    worst
}
