use std::fmt;

use linalg::{
    partial_trace::partial_trace,
    validate::{check_density_matrix, DEFAULT_TOLERANCE},
    DensityMatrix, Error, Result,
};
use quantum::{
    observables::{bloch_vector, probabilities, purity},
    register::{Qubit, QubitRegister},
};

/// |purity − 1| at or below this counts as a pure state.
pub const PURE_TOLERANCE: f64 = 0.05;

/// Single-qubit summary handed to a presentation sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpretationRecord {
    pub index: usize,
    pub bloch_vector: [f64; 3],
    pub probabilities: [f64; 2],
    pub purity: f64,
    pub is_pure: bool,
}

impl InterpretationRecord {
    pub fn nature(&self) -> &'static str {
        if self.is_pure {
            "Pure"
        } else {
            "Mixed"
        }
    }

    /// Multi-line human-readable summary.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InterpretationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [p0, p1] = self.probabilities;
        let [x, y, z] = self.bloch_vector;
        writeln!(f, "Qubit {} Interpretation:", self.index)?;
        writeln!(f, "  • Prob(|0⟩) ≈ {:.2}", p0)?;
        writeln!(f, "  • Prob(|1⟩) ≈ {:.2}", p1)?;
        writeln!(f, "  • X-component: {:.2}", x)?;
        writeln!(f, "  • Y-component: {:.2}", y)?;
        writeln!(f, "  • Z-component: {:.2}", z)?;
        writeln!(f, "  • Purity: {:.2}", self.purity)?;
        write!(f, "  • Nature: {}", self.nature())
    }
}

/// Traces out the ancilla, then each system qubit in turn.
///
/// Returns (ρ_A, ρ_B) for system qubits 0 and 1.
pub fn reduce_to_system_qubits(rho3: &DensityMatrix) -> Result<(DensityMatrix, DensityMatrix)> {
    let system = partial_trace(rho3, &[Qubit::Ancilla.index()], QubitRegister::NUM_QUBITS)?;
    let a = partial_trace(&system, &[Qubit::SystemB.index()], 2)?;
    let b = partial_trace(&system, &[Qubit::SystemA.index()], 2)?;
    Ok((a, b))
}

pub fn interpret(rho: &DensityMatrix, index: usize) -> Result<InterpretationRecord> {
    if rho.num_qubits() != 1 {
        return Err(Error::DimensionMismatch {
            expected: 2,
            got: rho.dim(),
        });
    }
    check_density_matrix(rho, DEFAULT_TOLERANCE)?;

    let p = purity(rho);
    Ok(InterpretationRecord {
        index,
        bloch_vector: bloch_vector(rho)?,
        probabilities: probabilities(rho)?,
        purity: p,
        is_pure: (p - 1.0).abs() <= PURE_TOLERANCE,
    })
}

/// Reduces a final register state and interprets both system qubits.
pub fn analyze(rho3: &DensityMatrix) -> Result<[InterpretationRecord; 2]> {
    let (a, b) = reduce_to_system_qubits(rho3)?;
    Ok([interpret(&a, 0)?, interpret(&b, 1)?])
}
