//! Choice of single-qubit Pauli operators for a set of symmetry generators.

use crate::pauli::{PauliKind, PauliString};
use crate::tapering::Z2SymmetryError;

#[cfg(test)]
#[path = "clifford_tests.rs"]
mod clifford_tests;

/// Chooses, for each generator $`\tau_j`$ in turn, the lowest-indexed unused qubit $`q_j`$ and a
/// single-qubit Pauli operator $`\sigma_j`$ on it that anticommutes with $`\tau_j`$ and commutes
/// with every other generator.
///
/// On a given qubit the candidates are tried in the order $`X`$, $`Z`$, $`Y`$:
/// * $`X`$ works if $`\tau_j`$ has a $`z`$ component there and no other generator does;
/// * $`Z`$ works if $`\tau_j`$ has an $`x`$ component there and no other generator does;
/// * $`Y`$ works if $`\tau_j`$ has exactly one of the two components there and every other
///   generator has either both or neither.
///
/// # Returns
///
/// The single-qubit Pauli operators and their qubits, in generator order.
///
/// # Errors
///
/// Errors if a generator does not act on `num_qubits` qubits, or if no unused qubit admits a
/// valid single-qubit Pauli operator for some generator.
pub fn construct_single_qubit_paulis(
    num_qubits: usize,
    symmetries: &[PauliString],
) -> Result<(Vec<PauliString>, Vec<usize>), Z2SymmetryError> {
    if let Some(symmetry) = symmetries.iter().find(|s| s.num_qubits() != num_qubits) {
        return Err(Z2SymmetryError::DimensionMismatch {
            context: format!("symmetry generator `{symmetry}`"),
            expected: num_qubits,
            found: symmetry.num_qubits(),
        });
    }

    let mut sq_paulis = Vec::with_capacity(symmetries.len());
    let mut sq_list: Vec<usize> = Vec::with_capacity(symmetries.len());
    for (j, symmetry) in symmetries.iter().enumerate() {
        let others = || {
            symmetries
                .iter()
                .enumerate()
                .filter(move |&(i, _)| i != j)
                .map(|(_, other)| other)
        };
        let found = (0..num_qubits)
            .filter(|q| !sq_list.contains(q))
            .find_map(|q| {
                let (x, z) = (symmetry.x_bits()[q], symmetry.z_bits()[q]);
                if z && others().all(|o| !o.z_bits()[q]) {
                    Some((q, PauliKind::X))
                } else if x && others().all(|o| !o.x_bits()[q]) {
                    Some((q, PauliKind::Z))
                } else if x != z && others().all(|o| o.x_bits()[q] == o.z_bits()[q]) {
                    Some((q, PauliKind::Y))
                } else {
                    None
                }
            });
        let Some((qubit, kind)) = found else {
            return Err(Z2SymmetryError::DegenerateSymmetry {
                symmetry: symmetry.label(),
            });
        };
        log::debug!("Symmetry `{symmetry}` is tapered at qubit {qubit} with {kind}.");
        sq_paulis.push(PauliString::single(num_qubits, qubit, kind)?);
        sq_list.push(qubit);
    }
    Ok((sq_paulis, sq_list))
}
