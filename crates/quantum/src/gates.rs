use linalg::matrix::from_rows;
use linalg::Op;
use num_complex::Complex64;

pub type C64 = Complex64;

pub fn hadamard() -> Op {
    let s = 1.0 / 2.0_f64.sqrt();
    from_rows([
        [C64::new(s, 0.0), C64::new(s, 0.0)],
        [C64::new(s, 0.0), C64::new(-s, 0.0)],
    ])
}

pub fn pauli_x() -> Op {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    from_rows([[z, o], [o, z]])
}

pub fn pauli_y() -> Op {
    let z = C64::new(0.0, 0.0);
    let i = C64::new(0.0, 1.0);
    let ni = C64::new(0.0, -1.0);
    from_rows([[z, ni], [i, z]])
}

pub fn pauli_z() -> Op {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let m = C64::new(-1.0, 0.0);
    from_rows([[o, z], [z, m]])
}

pub fn rx(theta: f64) -> Op {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    from_rows([
        [C64::new(c, 0.0), C64::new(0.0, -s)],
        [C64::new(0.0, -s), C64::new(c, 0.0)],
    ])
}

/// |00>→|00>, |01>→|01>, |10>→|11>, |11>→|10> (control is the high bit)
pub fn cnot() -> Op {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    from_rows([
        [o, z, z, z],
        [z, o, z, z],
        [z, z, z, o],
        [z, z, o, z],
    ])
}
