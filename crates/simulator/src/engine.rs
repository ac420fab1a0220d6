//! Feedback protocol over the 3-qubit register.
//!
//! Each iteration draws one hidden bit, applies the matching unitary branch,
//! then the amplitude-damping reset on the ancilla:
//!
//! | bit | unitary                       |
//! |-----|-------------------------------|
//! | 0   | H(q1) · CNOT(q0 → ancilla)    |
//! | 1   | RX(π)(q0) · CNOT(q1 → ancilla)|
//!
//! No projective measurement is performed; the bit only selects the branch.

use std::f64::consts::PI;
use std::fmt;

use linalg::{
    evolve::{apply_channel, apply_unitary, apply_unitary_checked},
    matrix::{kron, matmul},
    validate::{check_density_matrix, DEFAULT_TOLERANCE},
    DensityMatrix, Error, KrausChannel, Op, Result,
};
use quantum::{
    gates::{cnot, hadamard, rx},
    noise::amplitude_damping_reset,
    register::{Qubit, QubitRegister},
    states,
};
use rng::BitSource;
use tracing::{debug, warn};

pub const MIN_ITERATIONS: usize = 1;
pub const MAX_ITERATIONS: usize = 10;
pub const DEFAULT_GAMMA: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Damping strength of the ancilla reset, in [0, 1].
    pub gamma: f64,
    /// Tolerance for unitarity and density-matrix checks.
    pub tolerance: f64,
    /// Check every branch unitary and every intermediate state.
    pub validate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            tolerance: DEFAULT_TOLERANCE,
            validate: true,
        }
    }
}

/// Rejects iteration counts outside `MIN_ITERATIONS..=MAX_ITERATIONS`.
pub fn check_iterations(n: usize) -> Result<()> {
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&n) {
        return Err(Error::InvalidParameter(format!(
            "iteration count must lie in {}..={}, got {}",
            MIN_ITERATIONS, MAX_ITERATIONS, n
        )));
    }
    Ok(())
}

/// The hidden bit that selects one iteration's unitary branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackDecision {
    Zero,
    One,
}

impl FeedbackDecision {
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            FeedbackDecision::Zero
        } else {
            FeedbackDecision::One
        }
    }

    pub fn bit(self) -> u8 {
        match self {
            FeedbackDecision::Zero => 0,
            FeedbackDecision::One => 1,
        }
    }

    pub fn draw<B: BitSource + ?Sized>(bits: &mut B) -> Self {
        Self::from_bit(bits.next_bit())
    }
}

impl fmt::Display for FeedbackDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// Final state of a run together with the bits that produced it.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub rho: DensityMatrix,
    pub decisions: Vec<FeedbackDecision>,
}

impl RunOutcome {
    /// Decisions as a bit string, first iteration first.
    pub fn decision_string(&self) -> String {
        self.decisions.iter().map(|d| d.to_string()).collect()
    }
}

pub struct FeedbackEngine {
    config: EngineConfig,
    reset: KrausChannel,
    branch_zero: Op,
    branch_one: Op,
}

impl FeedbackEngine {
    /// Builds the reset channel and both branch unitaries once.
    pub fn new(config: EngineConfig) -> Result<Self> {
        if !(config.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                config.tolerance
            )));
        }
        let reset = amplitude_damping_reset(config.gamma)?;

        let reg = QubitRegister;
        let branch_zero = matmul(
            &reg.lift(&hadamard(), Qubit::SystemB)?,
            &reg.lift_pair(&cnot(), Qubit::SystemA, Qubit::Ancilla)?,
        )?;
        let branch_one = matmul(
            &reg.lift(&rx(PI), Qubit::SystemA)?,
            &reg.lift_pair(&cnot(), Qubit::SystemB, Qubit::Ancilla)?,
        )?;

        if !config.validate {
            warn!(gamma = config.gamma, "feedback engine running without state validation");
        }

        Ok(Self {
            config,
            reset,
            branch_zero,
            branch_one,
        })
    }

    pub fn reset_channel(&self) -> &KrausChannel {
        &self.reset
    }

    /// Full-register unitary applied for `decision`.
    pub fn branch_unitary(&self, decision: FeedbackDecision) -> &Op {
        match decision {
            FeedbackDecision::Zero => &self.branch_zero,
            FeedbackDecision::One => &self.branch_one,
        }
    }

    /// |+⟩|+⟩|0⟩ on (system A, system B, ancilla).
    pub fn initialize(&self) -> Result<DensityMatrix> {
        let ket = kron(&states::zero(), &kron(&states::plus(), &states::plus()));
        DensityMatrix::from_ket(&ket)
    }

    /// One feedback iteration: the selected branch, then the ancilla reset.
    pub fn step(&self, rho: DensityMatrix, decision: FeedbackDecision) -> Result<DensityMatrix> {
        let u = self.branch_unitary(decision);
        let rho = if self.config.validate {
            apply_unitary_checked(&rho, u, self.config.tolerance)?
        } else {
            apply_unitary(&rho, u)?
        };

        let rho = apply_channel(
            &rho,
            &self.reset,
            Qubit::Ancilla.index(),
            QubitRegister::NUM_QUBITS,
        )?;

        if self.config.validate {
            check_density_matrix(&rho, self.config.tolerance)?;
        }
        Ok(rho)
    }

    /// Starts a trajectory of exactly `iterations` steps.
    pub fn trajectory(&self, iterations: usize) -> Result<Trajectory<'_>> {
        check_iterations(iterations)?;
        Ok(Trajectory {
            engine: self,
            iterations,
            phase: Phase::Initialized,
            rho: Some(self.initialize()?),
            decisions: Vec::with_capacity(iterations),
        })
    }

    pub fn run<B: BitSource + ?Sized>(&self, iterations: usize, bits: &mut B) -> Result<DensityMatrix> {
        Ok(self.run_recorded(iterations, bits)?.rho)
    }

    pub fn run_recorded<B: BitSource + ?Sized>(
        &self,
        iterations: usize,
        bits: &mut B,
    ) -> Result<RunOutcome> {
        let mut traj = self.trajectory(iterations)?;
        for _ in 0..iterations {
            traj.draw_and_advance(bits)?;
        }
        let outcome = traj.finalize()?;
        debug!(
            iterations,
            gamma = self.config.gamma,
            decisions = %outcome.decision_string(),
            "feedback run finished"
        );
        Ok(outcome)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Iterating { completed: usize },
    Finalized,
}

/// A single run in progress. Owns the evolving state exclusively.
pub struct Trajectory<'e> {
    engine: &'e FeedbackEngine,
    iterations: usize,
    phase: Phase,
    rho: Option<DensityMatrix>,
    decisions: Vec<FeedbackDecision>,
}

impl<'e> Trajectory<'e> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn decisions(&self) -> &[FeedbackDecision] {
        &self.decisions
    }

    /// Current state; `None` once finalized or after a failed step.
    pub fn state(&self) -> Option<&DensityMatrix> {
        self.rho.as_ref()
    }

    pub fn advance(&mut self, decision: FeedbackDecision) -> Result<()> {
        let completed = match self.phase {
            Phase::Initialized => 0,
            Phase::Iterating { completed } => completed,
            Phase::Finalized => {
                return Err(Error::InvalidParameter("trajectory already finalized".into()));
            }
        };
        if completed >= self.iterations {
            return Err(Error::InvalidParameter(format!(
                "all {} iterations already applied",
                self.iterations
            )));
        }

        let rho = self.rho.take().ok_or_else(|| {
            Error::InvalidParameter("trajectory abandoned after a failed step".into())
        })?;
        let next = self.engine.step(rho, decision)?;

        debug!(
            iteration = completed + 1,
            decision = decision.bit(),
            trace = next.trace().re,
            "feedback step"
        );

        self.rho = Some(next);
        self.decisions.push(decision);
        self.phase = Phase::Iterating {
            completed: completed + 1,
        };
        Ok(())
    }

    pub fn draw_and_advance<B: BitSource + ?Sized>(&mut self, bits: &mut B) -> Result<FeedbackDecision> {
        let decision = FeedbackDecision::draw(bits);
        self.advance(decision)?;
        Ok(decision)
    }

    /// Hands out the final state. Only valid after exactly `iterations` steps.
    pub fn finalize(&mut self) -> Result<RunOutcome> {
        match self.phase {
            Phase::Iterating { completed } if completed == self.iterations => {}
            Phase::Finalized => {
                return Err(Error::InvalidParameter("trajectory already finalized".into()));
            }
            Phase::Initialized | Phase::Iterating { .. } => {
                return Err(Error::InvalidParameter(format!(
                    "trajectory finalized before all {} iterations ran",
                    self.iterations
                )));
            }
        }

        let rho = self.rho.take().ok_or_else(|| {
            Error::InvalidParameter("trajectory abandoned after a failed step".into())
        })?;
        self.phase = Phase::Finalized;
        Ok(RunOutcome {
            rho,
            decisions: std::mem::take(&mut self.decisions),
        })
    }
}
