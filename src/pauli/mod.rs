//! Pauli strings and weighted sums of Pauli strings.
//!
//! A Pauli string on $`N`$ qubits is stored as a pair of bit-vectors $`(\mathbf{x}, \mathbf{z})`$
//! such that the single-qubit factor on qubit $`q`$ is
//! $`\mathrm{i}^{x_q z_q} X^{x_q} Z^{z_q}`$, *i.e.* $`I`$, $`X`$, $`Z`$, or $`Y`$. All algebraic
//! operations (products, commutation tests, qubit deletion) are expressed as bitwise operations
//! together with a phase exponent modulo 4.

use std::error::Error;
use std::fmt;

pub mod commutation;
pub mod pauli_operator;
pub mod pauli_string;

pub use pauli_operator::{PauliOperator, PauliTerm};
pub use pauli_string::{PauliKind, PauliString};

/// Complex coefficient type used throughout the crate.
pub type C128 = num_complex::Complex<f64>;

/// Enumerated type for errors arising from Pauli algebra.
#[derive(Debug, Clone, PartialEq)]
pub enum PauliError {
    /// Variant for a label containing characters other than `I`, `X`, `Y`, `Z`.
    InvalidLabel(String),

    /// Variant for Pauli objects acting on different numbers of qubits.
    DimensionMismatch {
        /// The number of qubits expected.
        expected: usize,

        /// The number of qubits found.
        found: usize,
    },

    /// Variant for an operator that is required to be Hermitian but is not.
    NonHermitian(String),
}

impl fmt::Display for PauliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidLabel(label) => {
                write!(f, "Pauli error: `{label}` is not a valid Pauli label.")
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Pauli error: dimension mismatch (expected {expected} qubit(s), found {found})."
            ),
            Self::NonHermitian(msg) => write!(f, "Pauli error: non-Hermitian operator ({msg})."),
        }
    }
}

impl Error for PauliError {}
