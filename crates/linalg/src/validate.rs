use crate::density::DensityMatrix;
use crate::error::{Error, Result, Violation};
use crate::matrix::{self, Op, C64};
use faer::Side;

/// Tolerance used by every validity check unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Max entry of |A − A†|; infinite for non-square input.
pub fn hermitian_deviation(a: &Op) -> f64 {
    if a.nrows() != a.ncols() {
        return f64::INFINITY;
    }
    let mut worst = 0.0f64;
    for i in 0..a.nrows() {
        for j in i..a.ncols() {
            worst = worst.max((a.read(i, j) - a.read(j, i).conj()).norm());
        }
    }
    worst
}

pub fn is_hermitian(a: &Op, tolerance: f64) -> bool {
    hermitian_deviation(a) <= tolerance
}

/// Max entry of |U†U − I|; infinite for non-square input.
pub fn unitarity_deviation(u: &Op) -> f64 {
    if u.nrows() != u.ncols() {
        return f64::INFINITY;
    }
    match matrix::matmul(&matrix::adjoint(u), u) {
        Ok(uu) => matrix::max_abs_diff(&uu, &matrix::identity(u.nrows())),
        Err(_) => f64::INFINITY,
    }
}

pub fn is_unitary(u: &Op, tolerance: f64) -> bool {
    unitarity_deviation(u) <= tolerance
}

pub fn check_unitary(u: &Op, tolerance: f64) -> Result<()> {
    let deviation = unitarity_deviation(u);
    if deviation > tolerance {
        return Err(Error::NonUnitaryOperator {
            dim: u.nrows(),
            deviation,
        });
    }
    Ok(())
}

/// Smallest eigenvalue of the Hermitian part of `a`; -∞ for non-square input.
pub fn min_eigenvalue(a: &Op) -> f64 {
    let n = a.nrows();
    if n != a.ncols() {
        return f64::NEG_INFINITY;
    }
    let mut herm = matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            herm.write(i, j, (a.read(i, j) + a.read(j, i).conj()) * 0.5);
        }
    }
    herm.selfadjoint_eigenvalues(Side::Lower)
        .into_iter()
        .fold(f64::INFINITY, f64::min)
}

/// Checks square shape, unit trace, Hermiticity and positivity, in that order.
pub fn check_matrix(a: &Op, tolerance: f64) -> Result<()> {
    let dim = a.nrows();
    let trace = matrix::trace(a);
    let fail = |violation| Error::InvalidDensityMatrix {
        violation,
        dim,
        trace,
    };

    if a.nrows() != a.ncols() {
        return Err(fail(Violation::NotSquare));
    }
    if (trace - C64::new(1.0, 0.0)).norm() > tolerance {
        return Err(fail(Violation::TraceNotUnity));
    }
    let deviation = hermitian_deviation(a);
    if deviation > tolerance {
        return Err(fail(Violation::NotHermitian { deviation }));
    }
    let min_eigenvalue = min_eigenvalue(a);
    if min_eigenvalue < -tolerance {
        return Err(fail(Violation::NotPositive { min_eigenvalue }));
    }
    Ok(())
}

pub fn is_valid_density_matrix(a: &Op, tolerance: f64) -> bool {
    check_matrix(a, tolerance).is_ok()
}

pub fn check_density_matrix(rho: &DensityMatrix, tolerance: f64) -> Result<()> {
    check_matrix(rho.matrix(), tolerance)
}
