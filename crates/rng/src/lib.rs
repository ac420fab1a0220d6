use sha3::{digest::{ExtendableOutput, Update, XofReader}, Shake256};

pub struct ONDRng {
    state: [u8; 32],
    step: u64,
}

impl ONDRng {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, b"OND_INIT"], &mut state);
        Self { state, step: 0 }
    }

    pub fn next_f64(&mut self, ctx: &[u8]) -> f64 {
        self.step += 1;

        let state = self.state;
        let step_bytes = self.step.to_be_bytes();
        let mut next_state = self.state;
        shake(&[&state, &step_bytes, b"QSIM"], &mut next_state);
        self.state = next_state;

        let mut out = [0u8; 8];
        shake(&[&self.state, ctx], &mut out);

        if self.state[0] < 16 {
            let state = self.state;
            let mut next_state = self.state;
            shake(&[&state, b"SKIP"], &mut next_state);
            self.state = next_state;
        }

        (u64::from_be_bytes(out) as f64) / (u64::MAX as f64)
    }

    /// Number of draws taken since construction.
    pub fn steps(&self) -> u64 {
        self.step
    }
}

/// A source of independent, uniformly distributed feedback bits.
pub trait BitSource {
    /// Returns 0 or 1.
    fn next_bit(&mut self) -> u8;
}

impl BitSource for ONDRng {
    fn next_bit(&mut self) -> u8 {
        if self.next_f64(b"FEEDBACK_BIT") < 0.5 {
            0
        } else {
            1
        }
    }
}

/// Replays a fixed bit script, starting over once the script is exhausted.
///
/// An empty script yields zeros.
#[derive(Clone, Debug)]
pub struct ScriptedBits {
    bits: Vec<u8>,
    pos: usize,
}

impl ScriptedBits {
    pub fn new(bits: &[u8]) -> Self {
        Self {
            bits: bits.iter().map(|&b| u8::from(b != 0)).collect(),
            pos: 0,
        }
    }
}

impl BitSource for ScriptedBits {
    fn next_bit(&mut self) -> u8 {
        if self.bits.is_empty() {
            return 0;
        }
        let b = self.bits[self.pos % self.bits.len()];
        self.pos += 1;
        b
    }
}

fn shake(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for p in parts {
        h.update(p);
    }
    let mut r = h.finalize_xof();
    r.read(out);
}
