use crate::gates::{pauli_x, pauli_y, pauli_z};
use linalg::matrix::{matmul, trace};
use linalg::{DensityMatrix, Error, Op, Result};

fn require_single_qubit(rho: &DensityMatrix) -> Result<()> {
    if rho.num_qubits() != 1 {
        return Err(Error::DimensionMismatch {
            expected: 2,
            got: rho.dim(),
        });
    }
    Ok(())
}

/// Re Tr(ρ·op).
pub fn expectation(rho: &DensityMatrix, op: &Op) -> Result<f64> {
    Ok(trace(&matmul(rho.matrix(), op)?).re)
}

/// Expectation value ⟨X⟩ of a single qubit.
pub fn expect_x(rho: &DensityMatrix) -> Result<f64> {
    require_single_qubit(rho)?;
    expectation(rho, &pauli_x())
}

/// Expectation value ⟨Y⟩ of a single qubit.
pub fn expect_y(rho: &DensityMatrix) -> Result<f64> {
    require_single_qubit(rho)?;
    expectation(rho, &pauli_y())
}

/// Expectation value ⟨Z⟩ of a single qubit.
pub fn expect_z(rho: &DensityMatrix) -> Result<f64> {
    require_single_qubit(rho)?;
    expectation(rho, &pauli_z())
}

/// [⟨X⟩, ⟨Y⟩, ⟨Z⟩].
pub fn bloch_vector(rho: &DensityMatrix) -> Result<[f64; 3]> {
    Ok([expect_x(rho)?, expect_y(rho)?, expect_z(rho)?])
}

/// Tr(ρ²): 1 for pure states, down to 1/dim when maximally mixed.
pub fn purity(rho: &DensityMatrix) -> f64 {
    rho.purity()
}

/// Computational-basis populations [p0, p1].
pub fn probabilities(rho: &DensityMatrix) -> Result<[f64; 2]> {
    require_single_qubit(rho)?;
    Ok([rho.get(0, 0).re, rho.get(1, 1).re])
}

pub fn bloch_norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
