//! Detection of $`\mathbb{Z}_2`$ symmetry generators of a qubit operator.
//!
//! Writing a candidate symmetry as the vector $`\mathbf{v} = (\mathbf{z}_s | \mathbf{x}_s)`$ and
//! each term of the operator as the row $`(\mathbf{x}_t | \mathbf{z}_t)`$, the candidate
//! commutes with every term exactly when $`\mathbf{v}`$ lies in the null space of the matrix of
//! rows over $`\mathrm{GF}(2)`$. The null space need not be abelian, so a maximal mutually
//! commuting subspace is extracted by symplectic Gram--Schmidt elimination before the generators
//! are brought to reduced row echelon form.

use crate::gf2::BinaryMatrix;
use crate::pauli::commutation::anticommutes;
use crate::pauli::pauli_string::Bits;
use crate::pauli::{PauliError, PauliOperator, PauliString};
use crate::tapering::clifford::construct_single_qubit_paulis;
use crate::tapering::{Z2SymmetryError, Z2Symmetries};

#[cfg(test)]
#[path = "symmetry_finder_tests.rs"]
mod symmetry_finder_tests;

impl Z2Symmetries {
    /// Finds a maximal set of independent, mutually commuting Pauli strings that commute with
    /// every term of `operator`, and constructs the single-qubit Pauli operators and Clifford
    /// operators needed to taper them off.
    ///
    /// Terms whose coefficients have moduli not exceeding `threshold` are ignored. The
    /// generators are returned in reduced row echelon form of their
    /// $`(\mathbf{z} | \mathbf{x})`$ vectors, so the result is independent of the order of the
    /// terms in `operator`.
    ///
    /// # Errors
    ///
    /// Errors if no valid single-qubit Pauli operator can be found for some generator.
    pub fn find(operator: &PauliOperator, threshold: f64) -> Result<Self, Z2SymmetryError> {
        let symmetries = find_generators(operator, threshold)?;
        log::debug!(
            "Found {} independent Z2 symmetry generator(s).",
            symmetries.len()
        );
        Self::from_symmetries(operator.num_qubits(), symmetries)
    }

    /// Constructs a set of symmetries from generators alone, choosing the single-qubit Pauli
    /// operators and tapered qubits automatically.
    ///
    /// # Errors
    ///
    /// Errors if the generators do not act on `num_qubits` qubits, do not mutually commute, or
    /// admit no valid single-qubit Pauli operators.
    pub fn from_symmetries(
        num_qubits: usize,
        symmetries: Vec<PauliString>,
    ) -> Result<Self, Z2SymmetryError> {
        let (sq_paulis, sq_list) = construct_single_qubit_paulis(num_qubits, &symmetries)?;
        Self::new(num_qubits, symmetries, sq_paulis, sq_list)
    }
}

/// Finds independent, mutually commuting Pauli strings spanning a maximal abelian subgroup of
/// the strings that commute with every term of `operator` whose coefficient modulus exceeds
/// `threshold`. The strings are in reduced row echelon form of their
/// $`(\mathbf{z} | \mathbf{x})`$ vectors.
///
/// # Errors
///
/// Propagates Pauli-algebra errors, which cannot occur for a well-formed operator.
pub fn find_generators(
    operator: &PauliOperator,
    threshold: f64,
) -> Result<Vec<PauliString>, PauliError> {
    let num_qubits = operator.num_qubits();
    let rows = operator
        .iter()
        .filter(|(_, coefficient)| coefficient.norm() > threshold)
        .map(|(pauli, _)| {
            let mut row = pauli.x_bits().to_bitvec();
            row.extend_from_bitslice(pauli.z_bits());
            row
        })
        .collect::<Vec<_>>();
    if num_qubits == 0 || rows.is_empty() {
        log::debug!("No significant terms; no Z2 symmetries to detect.");
        return Ok(vec![]);
    }

    let null_space = BinaryMatrix::from_rows(2 * num_qubits, rows).null_space();
    log::debug!(
        "Commutant of the operator has dimension {} over GF(2).",
        null_space.len()
    );
    let candidates = null_space
        .iter()
        .map(|v| from_symplectic_vector(num_qubits, v))
        .collect::<Result<Vec<_>, _>>()?;
    let isotropic = maximal_commuting_subset(candidates)?;

    let mut generators = BinaryMatrix::from_rows(
        2 * num_qubits,
        isotropic.iter().map(to_symplectic_vector).collect(),
    );
    generators.rref();
    generators
        .into_rows()
        .iter()
        .filter(|v| v.any())
        .map(|v| from_symplectic_vector(num_qubits, v))
        .collect()
}

/// Returns the vector $`(\mathbf{z} | \mathbf{x})`$ of a Pauli string.
pub(crate) fn to_symplectic_vector(pauli: &PauliString) -> Bits {
    let mut v = pauli.z_bits().to_bitvec();
    v.extend_from_bitslice(pauli.x_bits());
    v
}

/// Reconstructs a Pauli string from its vector $`(\mathbf{z} | \mathbf{x})`$.
pub(crate) fn from_symplectic_vector(num_qubits: usize, v: &Bits) -> Result<PauliString, PauliError> {
    if v.len() != 2 * num_qubits {
        return Err(PauliError::DimensionMismatch {
            expected: 2 * num_qubits,
            found: v.len(),
        });
    }
    PauliString::new(
        v[num_qubits..].to_bitvec(),
        v[..num_qubits].to_bitvec(),
    )
}

/// Extracts a maximal mutually commuting subspace from the span of `basis`, which must be
/// linearly independent.
///
/// Each vector $`\mathbf{v}`$ in turn is kept. If some later vector $`\mathbf{w}`$ anticommutes
/// with it, $`\mathbf{w}`$ is discarded and every remaining $`\mathbf{u}`$ is replaced by
/// $`\mathbf{u} + \langle \mathbf{u}, \mathbf{w} \rangle \mathbf{v}
/// + \langle \mathbf{u}, \mathbf{v} \rangle \mathbf{w}`$, which commutes with both.
pub(crate) fn maximal_commuting_subset(
    mut basis: Vec<PauliString>,
) -> Result<Vec<PauliString>, PauliError> {
    basis.reverse();
    let mut isotropic = Vec::with_capacity(basis.len());
    while let Some(v) = basis.pop() {
        let mut partner = None;
        for i in (0..basis.len()).rev() {
            if anticommutes(&v, &basis[i])? {
                partner = Some(i);
                break;
            }
        }
        if let Some(i) = partner {
            let w = basis.remove(i);
            log::debug!("Dropping `{w}` from the commutant: it anticommutes with `{v}`.");
            for u in basis.iter_mut() {
                let with_w = anticommutes(u, &w)?;
                let with_v = anticommutes(u, &v)?;
                if with_w {
                    *u = u.compose(&v)?.0;
                }
                if with_v {
                    *u = u.compose(&w)?.0;
                }
            }
        }
        isotropic.push(v);
    }
    Ok(isotropic)
}
