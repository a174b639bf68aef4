use proptest::prelude::*;

use crate::gf2::BinaryMatrix;
use crate::io::pauli_text::read_pauli_text;
use crate::pauli::commutation::{commutes_with_all, is_abelian};
use crate::pauli::{PauliKind, PauliOperator, PauliString, C128};
use crate::tapering::symmetry_finder::{find_generators, to_symplectic_vector};
use crate::tapering::Z2Symmetries;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn labels(paulis: &[PauliString]) -> Vec<String> {
    paulis.iter().map(|pauli| pauli.label()).collect()
}

#[test]
fn test_symmetry_finder_parity8() {
    let op = read_pauli_text(format!("{ROOT}/tests/hamiltonians/parity8.txt")).unwrap();
    let z2 = Z2Symmetries::find(&op, 1e-12).unwrap();
    assert_eq!(z2.len(), 2);
    assert_eq!(labels(z2.symmetries()), vec!["ZIZIZIZI", "ZZIIZZII"]);
    assert_eq!(labels(z2.sq_paulis()), vec!["IIIIIIXI", "IIIIIXII"]);
    assert_eq!(z2.sq_list(), &[1, 2]);
    assert_eq!(z2.cliffords().len(), 2);
    assert_eq!(z2.cliffords()[0].len(), 2);
}

#[test]
fn test_symmetry_finder_h2() {
    let op = read_pauli_text(format!("{ROOT}/tests/hamiltonians/h2_jw.txt")).unwrap();
    let z2 = Z2Symmetries::find(&op, 1e-12).unwrap();
    assert_eq!(labels(z2.symmetries()), vec!["ZIIZ", "ZIZI", "ZZII"]);
    assert_eq!(labels(z2.sq_paulis()), vec!["IIIX", "IIXI", "IXII"]);
    assert_eq!(z2.sq_list(), &[0, 1, 2]);
}

#[test]
fn test_symmetry_finder_transverse_field_ising() {
    let op = PauliOperator::from_labels(vec![
        ("IIZZ", C128::new(-1.0, 0.0)),
        ("IZZI", C128::new(-1.0, 0.0)),
        ("ZZII", C128::new(-1.0, 0.0)),
        ("IIIX", C128::new(-0.7, 0.0)),
        ("IIXI", C128::new(-0.7, 0.0)),
        ("IXII", C128::new(-0.7, 0.0)),
        ("XIII", C128::new(-0.7, 0.0)),
    ])
    .unwrap();
    let z2 = Z2Symmetries::find(&op, 1e-12).unwrap();
    assert_eq!(labels(z2.symmetries()), vec!["XXXX"]);
    assert_eq!(labels(z2.sq_paulis()), vec!["IIIZ"]);
    assert_eq!(z2.sq_list(), &[0]);
}

#[test]
fn test_symmetry_finder_non_abelian_commutant() {
    // The commutant of ZZ contains Z0 and X0X1, which anticommute, so only a maximal abelian
    // subgroup of it can be tapered.
    let op = PauliOperator::from_labels(vec![("ZZ", C128::new(1.0, 0.0))]).unwrap();
    let generators = find_generators(&op, 1e-12).unwrap();
    assert_eq!(labels(&generators), vec!["IZ", "ZI"]);
    assert!(is_abelian(&generators).unwrap());

    let heisenberg = PauliOperator::from_labels(vec![
        ("XX", C128::new(1.0, 0.0)),
        ("YY", C128::new(1.0, 0.0)),
        ("ZZ", C128::new(1.0, 0.0)),
    ])
    .unwrap();
    let z2 = Z2Symmetries::find(&heisenberg, 1e-12).unwrap();
    assert_eq!(labels(z2.symmetries()), vec!["ZZ", "XX"]);
    assert_eq!(labels(z2.sq_paulis()), vec!["IX", "ZI"]);
}

#[test]
fn test_symmetry_finder_trivial_inputs() {
    let empty = PauliOperator::new(3);
    assert!(Z2Symmetries::find(&empty, 1e-12).unwrap().is_empty());

    let zero_qubits = PauliOperator::new(0);
    let z2 = Z2Symmetries::find(&zero_qubits, 1e-12).unwrap();
    assert!(z2.is_empty());
    assert_eq!(z2.num_qubits(), 0);

    // Terms below the threshold are ignored.
    let negligible = PauliOperator::from_labels(vec![("XY", C128::new(1e-14, 0.0))]).unwrap();
    assert!(Z2Symmetries::find(&negligible, 1e-12).unwrap().is_empty());
}

#[test]
fn test_symmetry_finder_no_symmetry() {
    // X and Z on every qubit leave nothing but the identity in the commutant.
    let op = PauliOperator::from_labels(vec![
        ("IX", C128::new(1.0, 0.0)),
        ("IZ", C128::new(1.0, 0.0)),
        ("XI", C128::new(1.0, 0.0)),
        ("ZI", C128::new(1.0, 0.0)),
    ])
    .unwrap();
    assert!(Z2Symmetries::find(&op, 1e-12).unwrap().is_empty());
}

#[test]
fn test_symmetry_finder_is_deterministic() {
    let op = read_pauli_text(format!("{ROOT}/tests/hamiltonians/parity8.txt")).unwrap();
    let mut terms = op.terms();
    terms.reverse();
    let reversed = PauliOperator::from_terms(
        op.num_qubits(),
        terms.into_iter().map(|term| (term.pauli, term.coefficient)),
    )
    .unwrap();
    let a = Z2Symmetries::find(&op, 1e-12).unwrap();
    let b = Z2Symmetries::find(&op, 1e-12).unwrap();
    let c = Z2Symmetries::find(&reversed, 1e-12).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

fn arb_kind() -> impl Strategy<Value = PauliKind> {
    prop_oneof![
        Just(PauliKind::I),
        Just(PauliKind::X),
        Just(PauliKind::Y),
        Just(PauliKind::Z),
    ]
}

fn arb_operator() -> impl Strategy<Value = PauliOperator> {
    (1usize..7).prop_flat_map(|n| {
        proptest::collection::vec(
            (proptest::collection::vec(arb_kind(), n), -1.0f64..1.0),
            1..8,
        )
        .prop_map(move |terms| {
            PauliOperator::from_terms(
                n,
                terms.into_iter().map(|(kinds, c)| {
                    (PauliString::from_kinds(kinds), C128::new(c + 2.0, 0.0))
                }),
            )
            .unwrap()
        })
    })
}

proptest! {
    #[test]
    fn prop_symmetry_generators_commute_and_are_independent(op in arb_operator()) {
        let generators = find_generators(&op, 1e-12).unwrap();
        prop_assert!(generators.len() <= op.num_qubits());
        prop_assert!(is_abelian(&generators).unwrap());
        for generator in generators.iter() {
            prop_assert!(!generator.is_identity());
            prop_assert!(commutes_with_all(generator, &op).unwrap());
        }
        let vectors = BinaryMatrix::from_rows(
            2 * op.num_qubits(),
            generators.iter().map(to_symplectic_vector).collect(),
        );
        prop_assert_eq!(vectors.rank(), generators.len());
    }
}
