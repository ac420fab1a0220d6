//! Single-qubit reference kets as column vectors.

use linalg::matrix::{column, C64};
use linalg::Op;

pub fn zero() -> Op {
    column(&[C64::new(1.0, 0.0), C64::new(0.0, 0.0)])
}

pub fn one() -> Op {
    column(&[C64::new(0.0, 0.0), C64::new(1.0, 0.0)])
}

/// (|0⟩ + |1⟩)/√2, i.e. H|0⟩.
pub fn plus() -> Op {
    let s = 1.0 / 2.0_f64.sqrt();
    column(&[C64::new(s, 0.0), C64::new(s, 0.0)])
}

/// (|0⟩ + i|1⟩)/√2.
pub fn plus_i() -> Op {
    let s = 1.0 / 2.0_f64.sqrt();
    column(&[C64::new(s, 0.0), C64::new(0.0, s)])
}
