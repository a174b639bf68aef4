use approx::assert_relative_eq;
use nalgebra::DMatrix;

use crate::pauli::{PauliError, PauliOperator, PauliString, C128};

fn c(re: f64) -> C128 {
    C128::new(re, 0.0)
}

#[test]
fn test_pauli_operator_merges_duplicates() {
    let op = PauliOperator::from_labels(vec![
        ("ZI", c(0.5)),
        ("IX", c(0.25)),
        ("ZI", c(0.5)),
    ])
    .unwrap();
    assert_eq!(op.num_qubits(), 2);
    assert_eq!(op.len(), 2);
    assert_eq!(
        op.coefficient(&PauliString::from_label("ZI").unwrap()),
        Some(c(1.0))
    );
    let labels = op.paulis().map(|p| p.label()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["ZI", "IX"]);
}

#[test]
fn test_pauli_operator_dimension_mismatch() {
    let res = PauliOperator::from_labels(vec![("ZI", c(0.5)), ("IXI", c(0.25))]);
    assert_eq!(
        res.err(),
        Some(PauliError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_pauli_operator_cancellation_removes_terms() {
    let a = PauliOperator::from_labels(vec![("ZZ", c(0.3)), ("XX", c(0.7)), ("II", c(1.0))])
        .unwrap();
    let b = PauliOperator::from_labels(vec![("XX", c(-0.7)), ("YY", c(0.2)), ("ZZ", c(-0.3))])
        .unwrap();
    let mut sum = a.add(&b).unwrap();
    assert_eq!(sum.len(), 4);
    sum.simplify(1e-12);
    let labels = sum.paulis().map(|p| p.label()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["II", "YY"]);
    assert_eq!(sum.identity_coefficient(), c(1.0));
}

#[test]
fn test_pauli_operator_simplify_cleans_small_parts() {
    let mut op = PauliOperator::from_labels(vec![
        ("Z", C128::new(0.5, 1e-15)),
        ("X", C128::new(1e-14, 0.0)),
    ])
    .unwrap();
    op.simplify(1e-12);
    assert_eq!(op.len(), 1);
    assert_eq!(
        op.coefficient(&PauliString::from_label("Z").unwrap()),
        Some(c(0.5))
    );
}

#[test]
fn test_pauli_operator_compose_anticommuting_pair_squares_to_identity() {
    // U = (Z + X)/√2 is the Hadamard gate, so U² = I.
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let u = PauliOperator::from_labels(vec![("Z", c(s)), ("X", c(s))]).unwrap();
    let u2 = u.compose(&u).unwrap().simplified(1e-12);
    assert_eq!(u2.len(), 1);
    assert_relative_eq!(u2.identity_coefficient().re, 1.0, epsilon = 1e-12);

    // HZH = X
    let z = PauliOperator::from_labels(vec![("Z", c(1.0))]).unwrap();
    let x = u.compose(&z).unwrap().compose(&u).unwrap().simplified(1e-12);
    assert_eq!(x.len(), 1);
    assert_relative_eq!(
        x.coefficient(&PauliString::from_label("X").unwrap())
            .unwrap()
            .re,
        1.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_pauli_operator_to_matrix() {
    let y = PauliOperator::from_labels(vec![("Y", c(1.0))]).unwrap();
    let ymat = y.to_matrix().unwrap();
    let expected = DMatrix::from_row_slice(
        2,
        2,
        &[c(0.0), C128::new(0.0, -1.0), C128::new(0.0, 1.0), c(0.0)],
    );
    assert_eq!(ymat, expected);

    // Z on qubit 1 of two qubits: diag(1, 1, -1, -1) in little-endian ordering.
    let z1 = PauliOperator::from_labels(vec![("ZI", c(1.0))]).unwrap();
    let z1mat = z1.to_matrix().unwrap();
    let diag = (0..4).map(|i| z1mat[(i, i)].re).collect::<Vec<_>>();
    assert_eq!(diag, vec![1.0, 1.0, -1.0, -1.0]);

    // The matrix of a product is the product of the matrices.
    let a = PauliOperator::from_labels(vec![("XZ", c(0.3)), ("YI", c(-0.2)), ("ZY", c(0.9))])
        .unwrap();
    let b = PauliOperator::from_labels(vec![("XX", c(1.1)), ("IZ", c(0.4))]).unwrap();
    let ab = a.compose(&b).unwrap();
    let lhs = ab.to_matrix().unwrap();
    let rhs = a.to_matrix().unwrap() * b.to_matrix().unwrap();
    for (l, r) in lhs.iter().zip(rhs.iter()) {
        assert_relative_eq!(l.re, r.re, epsilon = 1e-12);
        assert_relative_eq!(l.im, r.im, epsilon = 1e-12);
    }
}

#[test]
fn test_pauli_operator_hermiticity_and_adjoint() {
    let op = PauliOperator::from_labels(vec![("XY", C128::new(0.5, 0.25)), ("ZZ", c(1.0))])
        .unwrap();
    assert!(!op.is_hermitian(1e-12));
    let herm = op.add(&op.adjoint()).unwrap();
    assert!(herm.is_hermitian(1e-12));
}

#[test]
fn test_pauli_operator_display_and_serde() {
    let op = PauliOperator::from_labels(vec![("ZIZI", c(-0.25)), ("XXII", C128::new(0.5, 1.0))])
        .unwrap();
    assert_eq!(op.to_string(), "ZIZI\t(-0.25+0j)\nXXII\t(0.5+1j)\n");

    let yaml = serde_yaml::to_string(&op).unwrap();
    let back: PauliOperator = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, op);

    let bad = "num_qubits: 3\nterms:\n  - pauli: ZZ\n    coefficient: [1.0, 0.0]\n";
    assert!(serde_yaml::from_str::<PauliOperator>(bad).is_err());
}
