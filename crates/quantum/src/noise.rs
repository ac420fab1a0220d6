use linalg::matrix::{from_rows, C64};
use linalg::validate::DEFAULT_TOLERANCE;
use linalg::{Error, KrausChannel, Result};

/// Amplitude-damping reset on one qubit:
///
///   K0 = [[1, 0], [0, √(1−γ)]]   (no decay)
///   K1 = [[0, √γ], [0, 0]]       (|1⟩ → |0⟩)
///
/// γ = 1 is a perfect reset to |0⟩, γ = 0 is the identity channel.
pub fn amplitude_damping_reset(gamma: f64) -> Result<KrausChannel> {
    if !(0.0..=1.0).contains(&gamma) {
        return Err(Error::InvalidParameter(format!(
            "damping gamma must lie in [0, 1], got {}",
            gamma
        )));
    }

    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let k0 = from_rows([[o, z], [z, C64::new((1.0 - gamma).sqrt(), 0.0)]]);
    let k1 = from_rows([[z, C64::new(gamma.sqrt(), 0.0)], [z, z]]);

    KrausChannel::new(vec![k0, k1], DEFAULT_TOLERANCE)
}
