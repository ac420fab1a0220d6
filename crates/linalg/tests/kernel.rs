use approx::assert_relative_eq;
use linalg::{
    embed::embed,
    evolve::{apply_channel, apply_unitary, apply_unitary_checked},
    matrix::{self, column, from_rows, identity, kron, C64, ONE, ZERO},
    partial_trace::partial_trace,
    validate::{check_density_matrix, is_hermitian, is_unitary, is_valid_density_matrix, DEFAULT_TOLERANCE},
    DensityMatrix, Error, KrausChannel, Op, Violation,
};

fn c(re: f64) -> C64 {
    C64::new(re, 0.0)
}

fn x_gate() -> Op {
    from_rows([[ZERO, ONE], [ONE, ZERO]])
}

fn h_gate() -> Op {
    let s = 1.0 / 2.0_f64.sqrt();
    from_rows([[c(s), c(s)], [c(s), c(-s)]])
}

fn cnot() -> Op {
    from_rows([
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
        [ZERO, ZERO, ONE, ZERO],
    ])
}

fn basis(dim: usize, k: usize) -> Op {
    let mut v = vec![ZERO; dim];
    v[k] = ONE;
    column(&v)
}

/// A mixed, entangled 3-qubit test state.
fn mixed_state() -> DensityMatrix {
    let s = 1.0 / 2.0_f64.sqrt();
    let ghz = column(&[c(s), ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, c(s)]);
    let a = DensityMatrix::from_ket(&ghz).unwrap();
    let b = DensityMatrix::from_ket(&basis(8, 3)).unwrap();
    let plus = column(&[c(0.5), C64::new(0.0, 0.5), c(0.5), C64::new(0.0, -0.5)]);
    let d = DensityMatrix::from_ket(&kron(&plus, &basis(2, 1))).unwrap();
    DensityMatrix::average(&[a, b, d]).unwrap()
}

fn damping(gamma: f64) -> KrausChannel {
    let k0 = from_rows([[ONE, ZERO], [ZERO, c((1.0 - gamma).sqrt())]]);
    let k1 = from_rows([[ZERO, c(gamma.sqrt())], [ZERO, ZERO]]);
    KrausChannel::new(vec![k0, k1], DEFAULT_TOLERANCE).unwrap()
}

#[test]
fn kron_dimension_and_entries() {
    let a = from_rows([[c(1.0), c(2.0)], [c(3.0), c(4.0)]]);
    let k = kron(&a, &identity(2));
    assert_eq!(k.nrows(), 4);
    assert_eq!(k.ncols(), 4);
    assert_eq!(k.read(0, 2), c(2.0));
    assert_eq!(k.read(3, 1), c(3.0));
    assert_eq!(k.read(0, 1), ZERO);
}

#[test]
fn single_qubit_embedding_matches_kron_order() {
    let x = x_gate();
    let on_q0 = embed(&x, &[0], 3).unwrap();
    let expected = kron(&identity(2), &kron(&identity(2), &x));
    assert_eq!(matrix::max_abs_diff(&on_q0, &expected), 0.0);

    let on_q2 = embed(&x, &[2], 3).unwrap();
    let expected = kron(&x, &identity(4));
    assert_eq!(matrix::max_abs_diff(&on_q2, &expected), 0.0);
}

#[test]
fn non_adjacent_cnot_flips_target_only_when_control_set() {
    // control = qubit 0, target = qubit 2
    let u = embed(&cnot(), &[0, 2], 3).unwrap();
    for i in 0..8 {
        let out = matrix::matmul(&u, &basis(8, i)).unwrap();
        let expected = if i & 1 == 1 { i ^ 0b100 } else { i };
        assert_eq!(out.read(expected, 0), ONE, "basis state {}", i);
    }
    assert!(is_unitary(&u, 1e-12));
}

#[test]
fn unitary_preserves_trace_and_hermiticity() {
    let rho = mixed_state();
    let u = matrix::matmul(&embed(&h_gate(), &[1], 3).unwrap(), &embed(&cnot(), &[1, 2], 3).unwrap())
        .unwrap();
    let out = apply_unitary(&rho, &u).unwrap();
    assert_relative_eq!(out.trace().re, 1.0, epsilon = 1e-12);
    assert!(is_hermitian(out.matrix(), 1e-12));
    assert_relative_eq!(out.purity(), rho.purity(), epsilon = 1e-12);
}

#[test]
fn checked_unitary_rejects_non_unitary() {
    let rho = mixed_state();
    let bad = matrix::scale(&identity(8), c(1.1));
    match apply_unitary_checked(&rho, &bad, DEFAULT_TOLERANCE) {
        Err(Error::NonUnitaryOperator { dim, deviation }) => {
            assert_eq!(dim, 8);
            assert!((deviation - 0.21).abs() < 1e-9, "deviation = {}", deviation);
        }
        other => panic!("expected NonUnitaryOperator, got {:?}", other),
    }
}

#[test]
fn unitary_dimension_mismatch() {
    let rho = mixed_state();
    let err = apply_unitary(&rho, &identity(4)).unwrap_err();
    assert_eq!(err, Error::DimensionMismatch { expected: 8, got: 4 });
}

#[test]
fn channel_preserves_trace_on_every_target() {
    let rho = mixed_state();
    for &gamma in &[0.0, 0.1, 0.5, 1.0] {
        for target in 0..3 {
            let out = apply_channel(&rho, &damping(gamma), target, 3).unwrap();
            assert_relative_eq!(out.trace().re, 1.0, epsilon = 1e-12);
            assert!(out.trace().im.abs() < 1e-12);
            assert!(
                is_valid_density_matrix(out.matrix(), DEFAULT_TOLERANCE),
                "gamma = {}, target = {}",
                gamma,
                target
            );
        }
    }
}

#[test]
fn full_damping_resets_target_to_zero() {
    let one = DensityMatrix::from_ket(&basis(8, 0b100)).unwrap();
    let out = apply_channel(&one, &damping(1.0), 2, 3).unwrap();
    assert_relative_eq!(out.get(0, 0).re, 1.0, epsilon = 1e-12);
    assert_relative_eq!(out.get(4, 4).re, 0.0, epsilon = 1e-12);
}

#[test]
fn channel_register_size_must_match_state() {
    let rho = mixed_state();
    let err = apply_channel(&rho, &damping(0.1), 0, 2).unwrap_err();
    assert_eq!(err, Error::DimensionMismatch { expected: 4, got: 8 });
}

#[test]
fn oversized_register_is_an_error() {
    let rho = DensityMatrix::from_ket(&basis(2, 0)).unwrap();
    for &n in &[0, 13, 64, usize::MAX] {
        assert!(matches!(
            apply_channel(&rho, &damping(0.1), 0, n),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            partial_trace(&rho, &[0], n),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            DensityMatrix::maximally_mixed(n),
            Err(Error::InvalidParameter(_))
        ));
    }
}

#[test]
fn depolarizing_channel_preserves_trace() {
    let p: f64 = 0.3;
    let i = C64::new(0.0, 1.0);
    let w = c((p / 4.0).sqrt());
    let ops = vec![
        matrix::scale(&identity(2), c((1.0 - 3.0 * p / 4.0).sqrt())),
        matrix::scale(&x_gate(), w),
        matrix::scale(&from_rows([[ZERO, -i], [i, ZERO]]), w),
        matrix::scale(&from_rows([[ONE, ZERO], [ZERO, -ONE]]), w),
    ];
    let depol = KrausChannel::new(ops, DEFAULT_TOLERANCE).unwrap();
    assert_eq!(depol.operators().len(), 4);

    let rho = mixed_state();
    for target in 0..3 {
        let out = apply_channel(&rho, &depol, target, 3).unwrap();
        assert_relative_eq!(out.trace().re, 1.0, epsilon = 1e-12);
        assert!(out.trace().im.abs() < 1e-12);
        assert!(is_valid_density_matrix(out.matrix(), DEFAULT_TOLERANCE));
        assert!(out.purity() <= rho.purity() + 1e-12);
    }

    // Full depolarization of a pure qubit leaves I/2.
    let full = vec![
        matrix::scale(&identity(2), c(0.5)),
        matrix::scale(&x_gate(), c(0.5)),
        matrix::scale(&from_rows([[ZERO, -i], [i, ZERO]]), c(0.5)),
        matrix::scale(&from_rows([[ONE, ZERO], [ZERO, -ONE]]), c(0.5)),
    ];
    let full = KrausChannel::new(full, DEFAULT_TOLERANCE).unwrap();
    let zero = DensityMatrix::from_ket(&basis(2, 0)).unwrap();
    let out = apply_channel(&zero, &full, 0, 1).unwrap();
    assert_relative_eq!(out.purity(), 0.5, epsilon = 1e-12);
}

#[test]
fn kraus_completeness_is_enforced() {
    let k0 = from_rows([[ONE, ZERO], [ZERO, c(0.5)]]);
    assert!(matches!(
        KrausChannel::new(vec![k0], DEFAULT_TOLERANCE),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        KrausChannel::new(vec![], DEFAULT_TOLERANCE),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn partial_trace_of_product_state() {
    // |q0 = 1⟩|q1 = +⟩|q2 = 0⟩
    let s = 1.0 / 2.0_f64.sqrt();
    let plus = column(&[c(s), c(s)]);
    let ket = kron(&basis(2, 0), &kron(&plus, &basis(2, 1)));
    let rho = DensityMatrix::from_ket(&ket).unwrap();

    let q0 = partial_trace(&rho, &[1, 2], 3).unwrap();
    assert_eq!(q0.num_qubits(), 1);
    assert_relative_eq!(q0.get(1, 1).re, 1.0, epsilon = 1e-12);

    let q1 = partial_trace(&rho, &[0, 2], 3).unwrap();
    assert_relative_eq!(q1.get(0, 1).re, 0.5, epsilon = 1e-12);

    let q01 = partial_trace(&rho, &[2], 3).unwrap();
    assert_eq!(q01.num_qubits(), 2);
    // q0 = 1 is the low bit of the reduced index
    assert_relative_eq!(q01.get(1, 1).re, 0.5, epsilon = 1e-12);
    assert_relative_eq!(q01.get(3, 3).re, 0.5, epsilon = 1e-12);
    assert_relative_eq!(q01.get(1, 3).re, 0.5, epsilon = 1e-12);
}

#[test]
fn partial_trace_preserves_trace_and_mixes_entangled_pairs() {
    let rho = mixed_state();
    let cases: [&[usize]; 5] = [&[0], &[1], &[2], &[0, 2], &[1, 2]];
    for traced in cases {
        let r = partial_trace(&rho, traced, 3).unwrap();
        assert_relative_eq!(r.trace().re, rho.trace().re, epsilon = 1e-12);
        check_density_matrix(&r, DEFAULT_TOLERANCE).unwrap();
    }

    let s = 1.0 / 2.0_f64.sqrt();
    let bell = DensityMatrix::from_ket(&column(&[c(s), ZERO, ZERO, c(s)])).unwrap();
    let half = partial_trace(&bell, &[1], 2).unwrap();
    assert_relative_eq!(half.purity(), 0.5, epsilon = 1e-12);
}

#[test]
fn density_checks_report_violations() {
    let not_unit = DensityMatrix::from_matrix(identity(2)).unwrap();
    match check_density_matrix(&not_unit, DEFAULT_TOLERANCE) {
        Err(Error::InvalidDensityMatrix { violation, dim, trace }) => {
            assert_eq!(violation, Violation::TraceNotUnity);
            assert_eq!(dim, 2);
            assert_eq!(trace, c(2.0));
        }
        other => panic!("expected InvalidDensityMatrix, got {:?}", other),
    }

    let skew = from_rows([[c(0.5), c(0.3)], [c(-0.3), c(0.5)]]);
    assert!(matches!(
        check_density_matrix(&DensityMatrix::from_matrix(skew).unwrap(), DEFAULT_TOLERANCE),
        Err(Error::InvalidDensityMatrix {
            violation: Violation::NotHermitian { .. },
            ..
        })
    ));

    let negative = from_rows([[c(1.5), ZERO], [ZERO, c(-0.5)]]);
    match check_density_matrix(&DensityMatrix::from_matrix(negative).unwrap(), DEFAULT_TOLERANCE) {
        Err(Error::InvalidDensityMatrix {
            violation: Violation::NotPositive { min_eigenvalue },
            ..
        }) => assert_relative_eq!(min_eigenvalue, -0.5, epsilon = 1e-9),
        other => panic!("expected NotPositive, got {:?}", other),
    }

    assert!(is_valid_density_matrix(DensityMatrix::maximally_mixed(2).unwrap().matrix(), DEFAULT_TOLERANCE));
}
