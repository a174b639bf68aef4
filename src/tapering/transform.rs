//! Clifford rotation and qubit removal.

use crate::pauli::{PauliKind, PauliOperator, PauliString};
use crate::tapering::{Sector, Z2SymmetryError, Z2Symmetries};

#[cfg(test)]
#[path = "transform_tests.rs"]
mod transform_tests;

impl Z2Symmetries {
    fn check_operator(&self, operator: &PauliOperator) -> Result<(), Z2SymmetryError> {
        if operator.num_qubits() != self.num_qubits {
            return Err(Z2SymmetryError::DimensionMismatch {
                context: "the operator to be tapered".to_string(),
                expected: self.num_qubits,
                found: operator.num_qubits(),
            });
        }
        Ok(())
    }

    /// Applies the Clifford rotations $`U_k \cdots U_1 \hat{O} U_1 \cdots U_k`$ to `operator`
    /// without removing any qubits. Each $`U_j`$ is Hermitian and unitary.
    ///
    /// Coefficient parts not exceeding `threshold` in magnitude are removed after every
    /// rotation.
    ///
    /// # Errors
    ///
    /// Errors if `operator` acts on a different number of qubits.
    pub fn convert_clifford(
        &self,
        operator: &PauliOperator,
        threshold: f64,
    ) -> Result<PauliOperator, Z2SymmetryError> {
        self.check_operator(operator)?;
        let mut converted = operator.clone();
        for clifford in self.cliffords.iter() {
            converted = clifford.compose(&converted)?.compose(clifford)?;
            converted.simplify(threshold);
        }
        Ok(converted)
    }

    /// Tapers an operator that has already been rotated by [`Self::convert_clifford`]: the factor
    /// on each tapered qubit $`q_j`$ is replaced by the sign of generator $`j`$ in `sector`, the
    /// tapered qubits are removed, identical reduced strings are merged, and coefficient parts not
    /// exceeding `threshold` are dropped.
    ///
    /// # Errors
    ///
    /// Errors if `sector` or `converted` have the wrong size, or if some term acts on a tapered
    /// qubit with anything other than the identity or the corresponding single-qubit Pauli
    /// operator, which happens exactly when the original operator does not commute with the
    /// symmetries.
    pub fn taper_clifford(
        &self,
        converted: &PauliOperator,
        sector: &Sector,
        threshold: f64,
    ) -> Result<PauliOperator, Z2SymmetryError> {
        self.check_operator(converted)?;
        if sector.len() != self.len() {
            return Err(Z2SymmetryError::DimensionMismatch {
                context: "the sector length".to_string(),
                expected: self.len(),
                found: sector.len(),
            });
        }

        let mut tapered = PauliOperator::new(self.num_qubits - self.len());
        for (pauli, coefficient) in converted.iter() {
            let mut coefficient = *coefficient;
            for (j, (&qubit, sq_pauli)) in self
                .sq_list
                .iter()
                .zip(self.sq_paulis.iter())
                .enumerate()
            {
                match pauli.kind_at(qubit) {
                    PauliKind::I => {}
                    kind if kind == sq_pauli.kind_at(qubit) => coefficient *= sector.sign(j),
                    _ => {
                        return Err(Z2SymmetryError::SymmetryViolation {
                            term: pauli.label(),
                            qubit,
                        })
                    }
                }
            }
            tapered.add_term(pauli.delete_qubits(&self.sq_list), coefficient)?;
        }
        tapered.simplify(threshold);
        Ok(tapered)
    }

    /// Tapers `operator` in `sector`. See [`Self::convert_clifford`] and
    /// [`Self::taper_clifford`].
    ///
    /// # Errors
    ///
    /// Errors if the sizes are inconsistent or if `operator` does not commute with the
    /// symmetries.
    pub fn taper(
        &self,
        operator: &PauliOperator,
        sector: &Sector,
        threshold: f64,
    ) -> Result<PauliOperator, Z2SymmetryError> {
        let converted = self.convert_clifford(operator, threshold)?;
        self.taper_clifford(&converted, sector, threshold)
    }

    /// Tapers `operator` in every sector, in enumeration order. The Clifford rotation is
    /// performed only once.
    ///
    /// # Errors
    ///
    /// Errors if `operator` acts on the wrong number of qubits or does not commute with the
    /// symmetries.
    pub fn taper_all(
        &self,
        operator: &PauliOperator,
        threshold: f64,
    ) -> Result<Vec<(Sector, PauliOperator)>, Z2SymmetryError> {
        let converted = self.convert_clifford(operator, threshold)?;
        self.sectors()
            .map(|sector| {
                let tapered = self.taper_clifford(&converted, &sector, threshold)?;
                Ok((sector, tapered))
            })
            .collect()
    }

    /// Constructs the two symmetries of a parity-mapped fermionic Hamiltonian on $`N`$ qubits
    /// (even $`N`$): $`Z_{N/2-1}`$, whose eigenvalue is the parity of the number of
    /// $`\alpha`$-spin particles, and $`Z_{N-1}`$, whose eigenvalue is the parity of the total
    /// number of particles. Both are tapered with $`X`$ on the same qubit.
    ///
    /// # Errors
    ///
    /// Errors if `num_qubits` is odd or zero.
    pub fn parity_mapping(num_qubits: usize) -> Result<Self, Z2SymmetryError> {
        if num_qubits == 0 || num_qubits % 2 != 0 {
            return Err(Z2SymmetryError::InvalidSymmetries(format!(
                "the two-qubit reduction requires a positive even number of qubits, got {num_qubits}"
            )));
        }
        let sq_list = vec![num_qubits / 2 - 1, num_qubits - 1];
        let symmetries = sq_list
            .iter()
            .map(|&q| PauliString::single(num_qubits, q, PauliKind::Z))
            .collect::<Result<Vec<_>, _>>()?;
        let sq_paulis = sq_list
            .iter()
            .map(|&q| PauliString::single(num_qubits, q, PauliKind::X))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(num_qubits, symmetries, sq_paulis, sq_list)
    }

    /// Applies the two-qubit reduction to a parity-mapped fermionic Hamiltonian with
    /// `num_particles` $`(\alpha, \beta)`$ particles, removing qubits $`N/2 - 1`$ and
    /// $`N - 1`$ in the sector fixed by the particle-number parities.
    ///
    /// # Errors
    ///
    /// Errors if the number of qubits is odd or zero, or if `operator` does not commute with
    /// the parity symmetries.
    pub fn two_qubit_reduction(
        operator: &PauliOperator,
        num_particles: (usize, usize),
        threshold: f64,
    ) -> Result<PauliOperator, Z2SymmetryError> {
        let symmetries = Self::parity_mapping(operator.num_qubits())?;
        let sector = parity_sector(num_particles);
        log::debug!(
            "Two-qubit reduction with {} α and {} β particle(s) in sector {sector}.",
            num_particles.0,
            num_particles.1
        );
        symmetries.taper(operator, &sector, threshold)
    }
}

/// The sector of the parity-mapping symmetries for `num_particles` $`(\alpha, \beta)`$
/// particles.
pub fn parity_sector(num_particles: (usize, usize)) -> Sector {
    let (alpha, beta) = num_particles;
    let alpha_odd = alpha % 2;
    let total_odd = (alpha + beta) % 2;
    Sector::from_index(2, (alpha_odd << 1) | total_odd)
}
