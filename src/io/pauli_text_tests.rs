use approx::assert_relative_eq;
use serial_test::serial;

use crate::io::pauli_text::{parse_coefficient, parse_pauli_text, read_pauli_text, write_pauli_text};
use crate::pauli::{PauliOperator, PauliString, C128};
use crate::tapering::{Sector, Z2Symmetries};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_pauli_text_coefficients() {
    assert_eq!(parse_coefficient("0.5").unwrap(), C128::new(0.5, 0.0));
    assert_eq!(parse_coefficient("-1e-3").unwrap(), C128::new(-1e-3, 0.0));
    assert_eq!(parse_coefficient("(0.25-0.5j)").unwrap(), C128::new(0.25, -0.5));
    assert_eq!(parse_coefficient("1e-3+2e-4j").unwrap(), C128::new(1e-3, 2e-4));
    assert_eq!(parse_coefficient("-0.5j").unwrap(), C128::new(0.0, -0.5));
    assert_eq!(parse_coefficient("(2+j)").unwrap(), C128::new(2.0, 1.0));
    assert_eq!(parse_coefficient("(-0+0j)").unwrap(), C128::new(0.0, 0.0));
    assert!(parse_coefficient("abc").is_err());
    assert!(parse_coefficient("1+2").is_err());
}

#[test]
fn test_pauli_text_parse() {
    let text = "\
# A two-qubit operator
ZI   0.5
IX\t(0.25+0j)

ZI 0.5
YY -0.1j
";
    let op = parse_pauli_text(text).unwrap();
    assert_eq!(op.num_qubits(), 2);
    assert_eq!(op.len(), 3);
    assert_eq!(
        op.coefficient(&PauliString::from_label("ZI").unwrap()),
        Some(C128::new(1.0, 0.0))
    );
    assert!(!op.is_hermitian(1e-12));
}

#[test]
fn test_pauli_text_parse_errors() {
    assert!(parse_pauli_text("ZZ 1.0\nZZZ 1.0\n").is_err());
    assert!(parse_pauli_text("ZA 1.0\n").is_err());
    assert!(parse_pauli_text("ZZ\n").is_err());
    assert!(parse_pauli_text("0.5\nZZ 1.0\n").is_err());
    assert!(parse_pauli_text("# nothing here\n").is_err());
    assert!(parse_pauli_text("# num_qubits: 3\nZZ 1.0\n").is_err());

    let empty = parse_pauli_text("# num_qubits: 3\n").unwrap();
    assert_eq!(empty.num_qubits(), 3);
    assert!(empty.is_empty());
}

#[test]
fn test_pauli_text_display_is_parseable() {
    let op = PauliOperator::from_labels(vec![
        ("XZYI", C128::new(0.1234567890123, 0.0)),
        ("IIII", C128::new(-1.5, 0.0)),
        ("ZZZZ", C128::new(1e-7, -2.5)),
    ])
    .unwrap();
    let back = parse_pauli_text(&op.to_string()).unwrap();
    assert_eq!(back, op);
}

#[test]
#[serial]
fn test_pauli_text_file_round_trip() {
    let op = read_pauli_text(format!("{ROOT}/tests/hamiltonians/h2_jw.txt")).unwrap();
    assert_eq!(op.num_qubits(), 4);
    assert_eq!(op.len(), 15);
    assert_relative_eq!(op.identity_coefficient().re, -0.09706626816762845);

    let path = std::env::temp_dir().join("qtaper_pauli_text_round_trip.txt");
    write_pauli_text(&path, &op).unwrap();
    let back = read_pauli_text(&path).unwrap();
    assert_eq!(back, op);
    std::fs::remove_file(&path).unwrap();
}

#[test]
#[serial]
fn test_pauli_text_zero_qubit_round_trip() {
    let op = PauliOperator::from_labels(vec![("ZZ", C128::new(1.0, 0.0))]).unwrap();
    let z2 = Z2Symmetries::find(&op, 1e-12).unwrap();
    let tapered = z2
        .taper(&op, &Sector::all_positive(z2.len()), 1e-12)
        .unwrap();
    assert_eq!(tapered.num_qubits(), 0);
    assert_eq!(tapered.len(), 1);

    let back = parse_pauli_text(&tapered.to_string()).unwrap();
    assert_eq!(back.num_qubits(), 0);
    assert_relative_eq!(back.identity_coefficient().re, 1.0, epsilon = 1e-12);

    let path = std::env::temp_dir().join("qtaper_pauli_text_zero_qubits.txt");
    write_pauli_text(&path, &tapered).unwrap();
    let back = read_pauli_text(&path).unwrap();
    assert_eq!(back, tapered);
    std::fs::remove_file(&path).unwrap();

    let parsed = parse_pauli_text("# num_qubits: 0\n(-0.5+0j)\n").unwrap();
    assert_eq!(
        parsed.coefficient(&PauliString::identity(0)),
        Some(C128::new(-0.5, 0.0))
    );
}
