//! Exact diagonalisation of qubit operators.

use std::fmt;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use nalgebra::{DVector, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::io::format::nice_bool;
use crate::pauli::{PauliError, PauliOperator, C128};


// =================
// Trait definitions
// =================

/// Trait for solvers that can compute the lowest eigenvalues of a Hermitian qubit operator.
///
/// Solvers must be shareable across threads so that several tapered operators can be
/// diagonalised concurrently.
pub trait Eigensolver: Sync {
    /// Computes the `k` lowest eigenvalues of `operator`, in ascending order. Fewer are returned
    /// if the operator has fewer than `k` eigenvalues.
    fn lowest_eigenvalues(
        &self,
        operator: &PauliOperator,
        k: usize,
    ) -> Result<EigenResult, anyhow::Error>;

    /// Computes the lowest eigenvalue of `operator`.
    fn lowest_eigenvalue(&self, operator: &PauliOperator) -> Result<f64, anyhow::Error> {
        self.lowest_eigenvalues(operator, 1)?
            .energies
            .first()
            .copied()
            .ok_or_else(|| format_err!("The eigensolver returned no eigenvalues."))
    }
}

// ==================
// Struct definitions
// ==================

/// Structure containing eigenvalues and, optionally, eigenvectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EigenResult {
    /// Eigenvalues in ascending order.
    pub energies: Vec<f64>,

    /// Normalised eigenvectors in the computational basis, in the same order as
    /// [`Self::energies`].
    pub eigenstates: Option<Vec<DVector<C128>>>,
}

/// Dense exact eigensolver.
///
/// The operator is expanded into its full $`2^N \times 2^N`$ matrix, which is then diagonalised
/// completely. This is only practical for small numbers of qubits.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ExactEigensolver {
    /// The largest number of qubits for which a dense matrix will be constructed.
    #[builder(default = "14")]
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Boolean indicating if eigenvectors are to be returned.
    #[builder(default = "false")]
    #[serde(default)]
    pub compute_eigenstates: bool,

    /// Threshold on the imaginary parts of the coefficients for the operator to be considered
    /// Hermitian.
    #[builder(default = "1e-10")]
    #[serde(default = "default_hermiticity_threshold")]
    pub hermiticity_threshold: f64,
}

fn default_max_qubits() -> usize {
    14
}

fn default_hermiticity_threshold() -> f64 {
    1e-10
}

impl ExactEigensolver {
    /// Returns a builder to construct an [`ExactEigensolver`].
    pub fn builder() -> ExactEigensolverBuilder {
        ExactEigensolverBuilder::default()
    }

    /// Diagonalises `operator` completely.
    ///
    /// # Returns
    ///
    /// All eigenvalues in ascending order, with the corresponding eigenvectors if
    /// [`Self::compute_eigenstates`] is set.
    ///
    /// # Errors
    ///
    /// Errors if `operator` is not Hermitian or acts on more than [`Self::max_qubits`] qubits.
    pub fn diagonalise(&self, operator: &PauliOperator) -> Result<EigenResult, anyhow::Error> {
        ensure!(
            operator.num_qubits() <= self.max_qubits,
            "Refusing to diagonalise a dense matrix for {} qubits (maximum {}).",
            operator.num_qubits(),
            self.max_qubits
        );
        if !operator.is_hermitian(self.hermiticity_threshold) {
            return Err(PauliError::NonHermitian(format!(
                "imaginary coefficient parts exceed {:.3e}",
                self.hermiticity_threshold
            ))
            .into());
        }
        let mat = operator.to_matrix()?;
        log::debug!(
            "Diagonalising a {} × {} matrix for an operator with {} term(s).",
            mat.nrows(),
            mat.ncols(),
            operator.len()
        );
        let eig = SymmetricEigen::new(mat);
        let order = (0..eig.eigenvalues.len())
            .sorted_by(|&i, &j| eig.eigenvalues[i].total_cmp(&eig.eigenvalues[j]))
            .collect_vec();
        let energies = order.iter().map(|&i| eig.eigenvalues[i]).collect_vec();
        let eigenstates = if self.compute_eigenstates {
            Some(
                order
                    .iter()
                    .map(|&i| eig.eigenvectors.column(i).into_owned())
                    .collect_vec(),
            )
        } else {
            None
        };
        Ok(EigenResult {
            energies,
            eigenstates,
        })
    }
}

impl Default for ExactEigensolver {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            compute_eigenstates: false,
            hermiticity_threshold: default_hermiticity_threshold(),
        }
    }
}

impl Eigensolver for ExactEigensolver {
    fn lowest_eigenvalues(
        &self,
        operator: &PauliOperator,
        k: usize,
    ) -> Result<EigenResult, anyhow::Error> {
        let EigenResult {
            mut energies,
            eigenstates,
        } = self.diagonalise(operator)?;
        energies.truncate(k);
        Ok(EigenResult {
            energies,
            eigenstates: eigenstates.map(|mut states| {
                states.truncate(k);
                states
            }),
        })
    }
}

impl fmt::Display for ExactEigensolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Eigensolver: exact dense diagonalisation")?;
        writeln!(f, "  Maximum number of qubits: {}", self.max_qubits)?;
        writeln!(
            f,
            "  Compute eigenstates: {}",
            nice_bool(self.compute_eigenstates)
        )?;
        writeln!(
            f,
            "  Hermiticity threshold: {:.3e}",
            self.hermiticity_threshold
        )?;
        Ok(())
    }
}
