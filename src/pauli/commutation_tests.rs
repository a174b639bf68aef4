use crate::pauli::commutation::{
    anticommutes, commutation_matrix, commutes, commutes_with_all, is_abelian,
    symplectic_product,
};
use crate::pauli::{PauliError, PauliOperator, PauliString, C128};

fn p(label: &str) -> PauliString {
    PauliString::from_label(label).unwrap()
}

#[test]
fn test_commutation_single_qubit() {
    for a in ["I", "X", "Y", "Z"] {
        for b in ["I", "X", "Y", "Z"] {
            let expected = a == "I" || b == "I" || a == b;
            assert_eq!(commutes(&p(a), &p(b)).unwrap(), expected, "{a} vs {b}");
            assert_eq!(anticommutes(&p(a), &p(b)).unwrap(), !expected);
        }
    }
}

#[test]
fn test_commutation_counts_differing_non_identity_positions() {
    // Two anticommuting positions.
    assert!(commutes(&p("XXI"), &p("ZZI")).unwrap());
    // Three anticommuting positions.
    assert!(anticommutes(&p("XYZ"), &p("ZZX")).unwrap());
    // Identity positions never contribute.
    assert!(commutes(&p("XIZ"), &p("IYI")).unwrap());
    assert!(!symplectic_product(&p("ZIZIZIZI"), &p("ZZIIZZII")).unwrap());
}

#[test]
fn test_commutation_dimension_mismatch() {
    assert_eq!(
        commutes(&p("XX"), &p("XXX")),
        Err(PauliError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_commutation_matrix() {
    let strings = vec![p("XI"), p("ZI"), p("IZ"), p("ZZ")];
    let table = commutation_matrix(&strings).unwrap();
    assert!(table[0][1] && table[1][0]);
    assert!(!table[0][2]);
    assert!(table[0][3]);
    assert!(!table[1][3]);
    assert!((0..4).all(|i| !table[i][i]));
    assert!(!is_abelian(&strings).unwrap());
    assert!(is_abelian(&strings[1..]).unwrap());
}

#[test]
fn test_commutation_with_operator() {
    let op = PauliOperator::from_labels(vec![
        ("ZZ", C128::new(1.0, 0.0)),
        ("XX", C128::new(0.5, 0.0)),
    ])
    .unwrap();
    assert!(commutes_with_all(&p("YY"), &op).unwrap());
    assert!(!commutes_with_all(&p("ZI"), &op).unwrap());
    assert!(op.commutes_with_string(&p("XX")).unwrap());
    assert!(commutes_with_all(&p("ZZZ"), &op).is_err());
}
