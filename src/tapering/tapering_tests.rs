use approx::assert_relative_eq;

use crate::pauli::{PauliOperator, PauliString, C128};
use crate::tapering::{Sector, TaperingParameters, Z2SymmetryError, Z2Symmetries};

fn p(label: &str) -> PauliString {
    PauliString::from_label(label).unwrap()
}

#[test]
fn test_z2_symmetries_new_builds_cliffords() {
    let z2 = Z2Symmetries::new(
        4,
        vec![p("ZIIZ"), p("ZIZI")],
        vec![p("IIIX"), p("IIXI")],
        vec![0, 1],
    )
    .unwrap();
    assert_eq!(z2.len(), 2);
    assert_eq!(z2.num_qubits(), 4);
    let clifford = &z2.cliffords()[0];
    assert_eq!(clifford.len(), 2);
    assert_relative_eq!(
        clifford.coefficient(&p("ZIIZ")).unwrap().re,
        std::f64::consts::FRAC_1_SQRT_2
    );
    // Each Clifford squares to the identity.
    let square = clifford.compose(clifford).unwrap().simplified(1e-12);
    assert_eq!(square.len(), 1);
    assert_relative_eq!(square.identity_coefficient().re, 1.0, epsilon = 1e-12);
}

#[test]
fn test_z2_symmetries_new_validation() {
    let res = Z2Symmetries::new(4, vec![p("ZIIZ")], vec![p("IIIX"), p("IIXI")], vec![0]);
    assert!(matches!(res, Err(Z2SymmetryError::DimensionMismatch { .. })));

    let res = Z2Symmetries::new(4, vec![p("ZIZ")], vec![p("IIIX")], vec![0]);
    assert!(matches!(res, Err(Z2SymmetryError::DimensionMismatch { .. })));

    // Witness on the wrong qubit.
    let res = Z2Symmetries::new(4, vec![p("ZIIZ")], vec![p("IIXI")], vec![0]);
    assert!(matches!(res, Err(Z2SymmetryError::InvalidSymmetries(_))));

    // Witness that commutes with its own generator.
    let res = Z2Symmetries::new(4, vec![p("ZIIZ")], vec![p("IIIZ")], vec![0]);
    assert!(matches!(res, Err(Z2SymmetryError::InvalidSymmetries(_))));

    // Witness that anticommutes with another generator.
    let res = Z2Symmetries::new(
        4,
        vec![p("ZIIZ"), p("IIZZ")],
        vec![p("IIIX"), p("IIXI")],
        vec![0, 1],
    );
    assert!(matches!(res, Err(Z2SymmetryError::InvalidSymmetries(_))));

    // Repeated qubits.
    let res = Z2Symmetries::new(
        4,
        vec![p("ZIIZ"), p("ZIIZ")],
        vec![p("IIIX"), p("IIIX")],
        vec![0, 0],
    );
    assert!(matches!(res, Err(Z2SymmetryError::InvalidSymmetries(_))));

    // Non-commuting generators.
    let res = Z2Symmetries::new(2, vec![p("ZI"), p("XI")], vec![p("IX"), p("IZ")], vec![0, 1]);
    assert!(matches!(res, Err(Z2SymmetryError::InvalidSymmetries(_))));
}

#[test]
fn test_z2_symmetries_display_and_serde() {
    let z2 = Z2Symmetries::new(
        4,
        vec![p("ZIIZ"), p("ZIZI")],
        vec![p("IIIX"), p("IIXI")],
        vec![0, 1],
    )
    .unwrap();
    let text = z2.to_string();
    assert!(text.contains("  ZIIZ\n"));
    assert!(text.contains("  IIXI\n"));
    assert!(text.contains("Qubit indices: [0, 1]"));
    assert_eq!(Z2Symmetries::empty(3).to_string(), "No Z2 symmetries.\n");

    let bytes = bincode::serialize(&z2).unwrap();
    let back: Z2Symmetries = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, z2);
}

#[test]
fn test_z2_symmetries_yaml_rebuilds_cliffords() {
    let yaml = "num_qubits: 4
symmetries: [ZIIZ, ZIZI]
sq_paulis: [IIIX, IIXI]
sq_list: [0, 1]
";
    let z2: Z2Symmetries = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(z2.cliffords().len(), 2);
    assert_eq!(
        z2,
        Z2Symmetries::new(
            4,
            vec![p("ZIIZ"), p("ZIZI")],
            vec![p("IIIX"), p("IIXI")],
            vec![0, 1],
        )
        .unwrap()
    );
    assert!(!serde_yaml::to_string(&z2).unwrap().contains("cliffords"));
}

#[test]
fn test_z2_symmetries_deserialisation_validates() {
    // Generator longer than the declared qubit count.
    let res = serde_yaml::from_str::<Z2Symmetries>(
        "num_qubits: 0\nsymmetries: [Z]\nsq_paulis: [X]\nsq_list: [0]\n",
    );
    assert!(res.is_err());

    // Tapered qubit out of range.
    let res = serde_yaml::from_str::<Z2Symmetries>(
        "num_qubits: 2\nsymmetries: [ZZ]\nsq_paulis: [IX]\nsq_list: [5]\n",
    );
    assert!(res.is_err());

    // Witness commuting with its generator.
    let res = serde_yaml::from_str::<Z2Symmetries>(
        "num_qubits: 2\nsymmetries: [ZZ]\nsq_paulis: [IZ]\nsq_list: [0]\n",
    );
    assert!(res.is_err());

    assert!(matches!(
        Z2Symmetries::new(2, vec![p("ZZ")], vec![p("IX")], vec![2]),
        Err(Z2SymmetryError::InvalidSymmetries(_))
    ));
}

#[test]
fn test_tapering_parameters_validation() {
    let z2 = Z2Symmetries::new(2, vec![p("ZZ")], vec![p("IX")], vec![0]).unwrap();
    let reduced = PauliOperator::from_labels(vec![("Z", C128::new(1.0, 0.0))]).unwrap();
    let params =
        TaperingParameters::new(z2.clone(), Sector::new(vec![-1]).unwrap(), reduced.clone())
            .unwrap();
    assert_eq!(params.tapered_operator.num_qubits(), 1);

    assert!(matches!(
        TaperingParameters::new(z2.clone(), Sector::all_positive(2), reduced),
        Err(Z2SymmetryError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        TaperingParameters::new(z2, Sector::all_positive(1), PauliOperator::new(2)),
        Err(Z2SymmetryError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_z2_symmetry_error_display() {
    let err = Z2SymmetryError::NoMatchingSector {
        reference: -1.0,
        tolerance: 1e-6,
        closest_sector: Sector::new(vec![1, -1]).unwrap(),
        closest_energy: -0.5,
    };
    let msg = err.to_string();
    assert!(msg.contains("[+1, -1]"));
    assert!(msg.contains("-1.000000000000"));
}
