use rayon::prelude::*;
use rng::ONDRng;
use tracing::info;

use crate::analyzer::{interpret, reduce_to_system_qubits, InterpretationRecord};
use crate::engine::{check_iterations, EngineConfig, FeedbackEngine};
use linalg::{DensityMatrix, Error, Result};

/// Ensemble-averaged records for one damping strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    pub gamma: f64,
    pub records: [InterpretationRecord; 2],
}

/// Averages the reduced system states over `trajectories` independently
/// seeded runs and interprets the averages.
///
/// Trajectory `t` draws its bits from `"{seed}-gamma-{step}-traj-{t}"`, so the
/// result does not depend on how rayon schedules the runs.
pub fn ensemble_records(
    config: EngineConfig,
    iterations: usize,
    trajectories: usize,
    seed: &str,
    step: usize,
) -> Result<[InterpretationRecord; 2]> {
    if trajectories == 0 {
        return Err(Error::InvalidParameter("trajectories must be positive".into()));
    }
    check_iterations(iterations)?;
    let engine = FeedbackEngine::new(config)?;

    let reduced: Vec<(DensityMatrix, DensityMatrix)> = (0..trajectories)
        .into_par_iter()
        .map(|t| {
            let seed_str = format!("{}-gamma-{}-traj-{}", seed, step, t);
            let mut rng = ONDRng::new(seed_str.as_bytes());
            let rho = engine.run(iterations, &mut rng)?;
            reduce_to_system_qubits(&rho)
        })
        .collect::<Result<Vec<_>>>()?;

    let (a, b): (Vec<_>, Vec<_>) = reduced.into_iter().unzip();
    Ok([
        interpret(&DensityMatrix::average(&a)?, 0)?,
        interpret(&DensityMatrix::average(&b)?, 1)?,
    ])
}

/// Evaluates gamma on the grid `i / gamma_steps`, `i = 0..=gamma_steps`.
/// Every other setting comes from `base`.
pub fn gamma_sweep(
    base: EngineConfig,
    iterations: usize,
    trajectories: usize,
    gamma_steps: usize,
    seed: &str,
) -> Result<Vec<SweepPoint>> {
    if gamma_steps == 0 {
        return Err(Error::InvalidParameter("gamma_steps must be positive".into()));
    }

    let mut points = Vec::with_capacity(gamma_steps + 1);
    for i in 0..=gamma_steps {
        let gamma = i as f64 / gamma_steps as f64;
        let config = EngineConfig { gamma, ..base };
        let records = ensemble_records(config, iterations, trajectories, seed, i)?;

        info!(
            gamma,
            q0_purity = records[0].purity,
            q1_purity = records[1].purity,
            trajectories,
            "sweep point"
        );
        points.push(SweepPoint { gamma, records });
    }
    Ok(points)
}
