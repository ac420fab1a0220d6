use linalg::embed::embed;
use linalg::{Op, Result};

/// Logical qubits of the feedback register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Qubit {
    SystemA,
    SystemB,
    Ancilla,
}

impl Qubit {
    /// Position in the tensor product; qubit 0 is the least significant factor.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Qubit::SystemA => 0,
            Qubit::SystemB => 1,
            Qubit::Ancilla => 2,
        }
    }
}

/// Fixed 3-qubit register: two system qubits plus one ancilla.
#[derive(Clone, Copy, Debug, Default)]
pub struct QubitRegister;

impl QubitRegister {
    pub const NUM_QUBITS: usize = 3;

    /// Lifts a single-qubit operator onto `q`.
    pub fn lift(self, op: &Op, q: Qubit) -> Result<Op> {
        embed(op, &[q.index()], Self::NUM_QUBITS)
    }

    /// Lifts a two-qubit operator; `first` is the operator's high factor.
    pub fn lift_pair(self, op: &Op, first: Qubit, second: Qubit) -> Result<Op> {
        embed(op, &[first.index(), second.index()], Self::NUM_QUBITS)
    }
}
