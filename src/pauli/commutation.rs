//! Commutation relations between Pauli strings.
//!
//! Two Pauli strings $`P_a = P(\mathbf{x}_a, \mathbf{z}_a)`$ and
//! $`P_b = P(\mathbf{x}_b, \mathbf{z}_b)`$ commute if and only if their symplectic inner product
//!
//! ```math
//! \langle P_a, P_b \rangle = \mathbf{x}_a \cdot \mathbf{z}_b + \mathbf{z}_a \cdot \mathbf{x}_b
//! \mod 2
//! ```
//!
//! vanishes, and anticommute otherwise.

use crate::pauli::pauli_string::{check_same_length, count_and};
use crate::pauli::{PauliError, PauliOperator, PauliString};

#[cfg(test)]
#[path = "commutation_tests.rs"]
mod commutation_tests;

/// Computes the symplectic inner product of two Pauli strings over $`\mathrm{GF}(2)`$.
///
/// # Errors
///
/// Errors if the strings act on different numbers of qubits.
pub fn symplectic_product(a: &PauliString, b: &PauliString) -> Result<bool, PauliError> {
    check_same_length(a, b)?;
    let n = count_and(a.x_bits(), b.z_bits()) + count_and(a.z_bits(), b.x_bits());
    Ok(n % 2 == 1)
}

/// Returns `true` if the two Pauli strings commute.
///
/// # Errors
///
/// Errors if the strings act on different numbers of qubits.
pub fn commutes(a: &PauliString, b: &PauliString) -> Result<bool, PauliError> {
    symplectic_product(a, b).map(|p| !p)
}

/// Returns `true` if the two Pauli strings anticommute.
///
/// # Errors
///
/// Errors if the strings act on different numbers of qubits.
pub fn anticommutes(a: &PauliString, b: &PauliString) -> Result<bool, PauliError> {
    symplectic_product(a, b)
}

/// Computes the anticommutation table of a list of Pauli strings: entry $`(i, j)`$ is `true` if
/// strings $`i`$ and $`j`$ anticommute. The table is symmetric with a `false` diagonal.
///
/// # Errors
///
/// Errors if the strings do not all act on the same number of qubits.
pub fn commutation_matrix(strings: &[PauliString]) -> Result<Vec<Vec<bool>>, PauliError> {
    let n = strings.len();
    let mut table = vec![vec![false; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let anti = anticommutes(&strings[i], &strings[j])?;
            table[i][j] = anti;
            table[j][i] = anti;
        }
    }
    Ok(table)
}

/// Returns `true` if all the Pauli strings mutually commute.
///
/// # Errors
///
/// Errors if the strings do not all act on the same number of qubits.
pub fn is_abelian(strings: &[PauliString]) -> Result<bool, PauliError> {
    Ok(commutation_matrix(strings)?
        .iter()
        .all(|row| row.iter().all(|anti| !anti)))
}

/// Returns `true` if `pauli` commutes with every term of `operator`.
///
/// # Errors
///
/// Errors if `pauli` and `operator` act on different numbers of qubits.
pub fn commutes_with_all(pauli: &PauliString, operator: &PauliOperator) -> Result<bool, PauliError> {
    if pauli.num_qubits() != operator.num_qubits() {
        return Err(PauliError::DimensionMismatch {
            expected: operator.num_qubits(),
            found: pauli.num_qubits(),
        });
    }
    for (term, _) in operator.iter() {
        if !commutes(pauli, term)? {
            return Ok(false);
        }
    }
    Ok(true)
}
