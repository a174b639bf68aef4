//! Qubit Hamiltonians and their provenance.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, ensure, Context};
use serde::{Deserialize, Serialize};

use crate::io::format::nice_bool;
use crate::io::pauli_text::read_pauli_text;
use crate::io::read_qtaper_yaml;
use crate::pauli::PauliOperator;
use crate::tapering::Z2Symmetries;


// ================
// Enum definitions
// ================

/// Enumerated type for fermion-to-qubit mappings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QubitMapping {
    /// Variant for the Jordan--Wigner mapping.
    JordanWigner,

    /// Variant for the parity mapping.
    Parity,

    /// Variant for the Bravyi--Kitaev mapping.
    BravyiKitaev,
}

impl fmt::Display for QubitMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JordanWigner => write!(f, "Jordan–Wigner"),
            Self::Parity => write!(f, "parity"),
            Self::BravyiKitaev => write!(f, "Bravyi–Kitaev"),
        }
    }
}

// ==================
// Struct definitions
// ==================

/// Structure containing information about the fermionic problem a qubit Hamiltonian came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianMetadata {
    /// The number of spatial orbitals.
    pub num_orbitals: usize,

    /// The numbers of $`\alpha`$ and $`\beta`$ particles.
    pub num_particles: (usize, usize),

    /// The fermion-to-qubit mapping used.
    pub qubit_mapping: QubitMapping,

    /// Boolean indicating if the two-qubit reduction is to be applied. Only meaningful for the
    /// parity mapping.
    #[serde(default)]
    pub two_qubit_reduction: bool,
}

impl fmt::Display for HamiltonianMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of spatial orbitals: {}", self.num_orbitals)?;
        writeln!(
            f,
            "Number of particles (α, β): ({}, {})",
            self.num_particles.0, self.num_particles.1
        )?;
        writeln!(f, "Qubit mapping: {}", self.qubit_mapping)?;
        writeln!(
            f,
            "Two-qubit reduction: {}",
            nice_bool(self.two_qubit_reduction)
        )?;
        Ok(())
    }
}

/// Structure pairing a qubit operator with its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QubitHamiltonian {
    /// Information about the fermionic problem.
    pub metadata: HamiltonianMetadata,

    /// The qubit operator.
    pub operator: PauliOperator,
}

impl QubitHamiltonian {
    /// Applies the two-qubit reduction if [`HamiltonianMetadata::two_qubit_reduction`] is set,
    /// and returns the Hamiltonian unchanged otherwise. The flag is cleared in the result.
    ///
    /// # Errors
    ///
    /// Errors if the reduction is requested for a mapping other than the parity mapping, or if
    /// the reduction itself fails.
    pub fn reduced(self, threshold: f64) -> Result<Self, anyhow::Error> {
        if !self.metadata.two_qubit_reduction {
            return Ok(self);
        }
        ensure!(
            self.metadata.qubit_mapping == QubitMapping::Parity,
            "The two-qubit reduction requires the parity mapping, but the {} mapping was used.",
            self.metadata.qubit_mapping
        );
        let operator = Z2Symmetries::two_qubit_reduction(
            &self.operator,
            self.metadata.num_particles,
            threshold,
        )
        .context("Unable to apply the two-qubit reduction.")?;
        log::debug!(
            "Two-qubit reduction: {} → {} qubit(s).",
            self.operator.num_qubits(),
            operator.num_qubits()
        );
        Ok(Self {
            metadata: HamiltonianMetadata {
                two_qubit_reduction: false,
                ..self.metadata
            },
            operator,
        })
    }
}

impl fmt::Display for QubitHamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metadata)?;
        writeln!(f, "Number of qubits: {}", self.operator.num_qubits())?;
        writeln!(f, "Number of Pauli terms: {}", self.operator.len())?;
        Ok(())
    }
}

// =================
// Trait definitions
// =================

/// Trait for sources of qubit Hamiltonians.
pub trait HamiltonianProvider {
    /// Produces the qubit Hamiltonian.
    fn qubit_hamiltonian(&self) -> Result<QubitHamiltonian, anyhow::Error>;
}

/// Enumerated type for the ways a qubit Hamiltonian can be supplied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HamiltonianSource {
    /// Variant for a YAML file containing a serialised [`QubitHamiltonian`].
    Yaml(PathBuf),

    /// Variant for a plain-text operator file together with its metadata.
    PauliText {
        /// The path to the operator file.
        path: PathBuf,

        /// The metadata of the Hamiltonian.
        metadata: HamiltonianMetadata,
    },
}

impl HamiltonianProvider for HamiltonianSource {
    fn qubit_hamiltonian(&self) -> Result<QubitHamiltonian, anyhow::Error> {
        let hamiltonian = match self {
            Self::Yaml(path) => read_qtaper_yaml::<QubitHamiltonian, _>(path)
                .with_context(|| format!("Unable to read `{}`.", path.display()))?,
            Self::PauliText { path, metadata } => QubitHamiltonian {
                metadata: metadata.clone(),
                operator: read_pauli_text(path)?,
            },
        };
        ensure!(
            hamiltonian.operator.is_hermitian(1e-10),
            "The qubit Hamiltonian is not Hermitian."
        );
        Ok(hamiltonian)
    }
}

impl HamiltonianProvider for QubitHamiltonian {
    fn qubit_hamiltonian(&self) -> Result<QubitHamiltonian, anyhow::Error> {
        Ok(self.clone())
    }
}

impl Default for HamiltonianSource {
    fn default() -> Self {
        Self::PauliText {
            path: PathBuf::from("hamiltonian.txt"),
            metadata: HamiltonianMetadata {
                num_orbitals: 2,
                num_particles: (1, 1),
                qubit_mapping: QubitMapping::JordanWigner,
                two_qubit_reduction: false,
            },
        }
    }
}
