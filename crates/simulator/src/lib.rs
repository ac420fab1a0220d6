//! Feedback-driven evolution of two system qubits coupled to a noisy ancilla.

pub mod analyzer;
pub mod engine;
pub mod output;
pub mod report;
pub mod sweep;

pub use analyzer::{analyze, interpret, reduce_to_system_qubits, InterpretationRecord};
pub use engine::{
    EngineConfig, FeedbackDecision, FeedbackEngine, Phase, RunOutcome, Trajectory, MAX_ITERATIONS,
    MIN_ITERATIONS,
};
pub use linalg::{Error, Result};
pub use report::{ReportSink, TextSink};
pub use sweep::{ensemble_records, gamma_sweep, SweepPoint};
