//! YAML input files for QTaper.

use std::path::PathBuf;

use anyhow::{self, ensure, Context};
use serde::{Deserialize, Serialize};

use crate::drivers::sector_search::{SectorSearchDriver, SectorSearchParams};
use crate::drivers::z2_symmetry_detection::{
    Z2SymmetryDetectionDriver, Z2SymmetryDetectionParams, Z2SymmetryDetectionResult,
};
use crate::drivers::QTaperDriver;
use crate::eigensolver::{Eigensolver, ExactEigensolver};
use crate::hamiltonian::{HamiltonianProvider, HamiltonianSource};
use crate::interfaces::InputHandle;
use crate::io::format::{
    log_macsec_begin, log_macsec_end, log_subtitle, qtaper_output, QTaperOutput,
};
use crate::io::pauli_text::write_pauli_text;
use crate::io::{read_qtaper_binary, write_qtaper_binary, QTaperFileType};
use crate::pauli::PauliString;
use crate::tapering::{Sector, TaperingParameters, Z2Symmetries};


// ================
// Enum definitions
// ================

/// An enumerated type representing possible input kinds for $`\mathbb{Z}_2`$ symmetry
/// detection from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Z2SymmetryDetectionInputKind {
    /// Variant indicating that the parameters for the symmetry-detection driver will be
    /// specified.
    Parameters(Z2SymmetryDetectionParams),

    /// Variant indicating that the symmetry-detection results will be read in from a QTaper
    /// [`QTaperFileType::Sym`] binary file. The associated path gives the name of the file
    /// without its `.qtaper.sym` extension.
    FromFile(PathBuf),

    /// Variant indicating that the symmetry generators are given explicitly as Pauli labels. The
    /// single-qubit Pauli operators are then chosen automatically.
    Generators(Vec<String>),
}

impl Default for Z2SymmetryDetectionInputKind {
    fn default() -> Self {
        Z2SymmetryDetectionInputKind::Parameters(Z2SymmetryDetectionParams::default())
    }
}

/// An enumerated type representing possible ways of choosing the symmetry sector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SectorInputKind {
    /// Variant indicating that the sector will be found by a sector search with the associated
    /// parameters.
    Search(SectorSearchParams),

    /// Variant indicating a known sector.
    Fixed(Sector),
}

impl Default for SectorInputKind {
    fn default() -> Self {
        SectorInputKind::Search(SectorSearchParams::default())
    }
}

// ==================
// Struct definitions
// ==================

fn default_zero_threshold() -> f64 {
    1e-12
}

/// A structure containing QTaper input parameters which can be serialised into and deserialised
/// from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// Specification of the qubit Hamiltonian to be tapered.
    pub hamiltonian: HamiltonianSource,

    /// Specification for $`\mathbb{Z}_2`$ symmetry detection.
    ///
    /// # Default
    ///
    /// If not specified, symmetries will be detected with default parameters.
    #[serde(default)]
    pub z2_symmetry_detection: Z2SymmetryDetectionInputKind,

    /// Specification of the symmetry sector.
    ///
    /// # Default
    ///
    /// If not specified, a sector search will be run with default parameters.
    #[serde(default)]
    pub sector: SectorInputKind,

    /// The eigensolver used for reference and sector energies.
    #[serde(default)]
    pub eigensolver: ExactEigensolver,

    /// Threshold for discarding negligible coefficients in the two-qubit reduction and in
    /// tapering into a fixed sector.
    #[serde(default = "default_zero_threshold")]
    pub zero_threshold: f64,

    /// Optional name for saving the tapering parameters as a binary file of type
    /// [`QTaperFileType::Tpr`].
    #[serde(default)]
    pub tapering_save_name: Option<PathBuf>,

    /// Optional path to which the tapered operator is written in plain-text format.
    #[serde(default)]
    pub tapered_operator_output: Option<PathBuf>,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            hamiltonian: HamiltonianSource::default(),
            z2_symmetry_detection: Z2SymmetryDetectionInputKind::default(),
            sector: SectorInputKind::default(),
            eigensolver: ExactEigensolver::default(),
            zero_threshold: default_zero_threshold(),
            tapering_save_name: None,
            tapered_operator_output: None,
        }
    }
}

impl Input {
    /// Runs the full tapering workflow described by this input.
    ///
    /// # Returns
    ///
    /// The tapering parameters: symmetries, sector, and tapered operator.
    pub fn run(&self) -> Result<TaperingParameters, anyhow::Error> {
        log_macsec_begin("Qubit tapering");
        qtaper_output!("");
        let hamiltonian = self
            .hamiltonian
            .qubit_hamiltonian()?
            .reduced(self.zero_threshold)?;
        log_subtitle("Qubit Hamiltonian");
        qtaper_output!("");
        hamiltonian.log_output_display();
        qtaper_output!("");
        let operator = &hamiltonian.operator;

        let symmetries = match &self.z2_symmetry_detection {
            Z2SymmetryDetectionInputKind::Parameters(params) => {
                let mut driver = Z2SymmetryDetectionDriver::builder()
                    .parameters(params)
                    .operator(operator)
                    .build()?;
                driver.run()?;
                driver.result()?.symmetries.clone()
            }
            Z2SymmetryDetectionInputKind::FromFile(name) => {
                let res: Z2SymmetryDetectionResult =
                    read_qtaper_binary(name, QTaperFileType::Sym).with_context(|| {
                        format!(
                            "Unable to read symmetry-detection results from `{}`.",
                            name.display()
                        )
                    })?;
                log_subtitle("Z2 symmetries read from file");
                qtaper_output!("");
                res.symmetries.log_output_display();
                res.symmetries
            }
            Z2SymmetryDetectionInputKind::Generators(labels) => {
                let generators = labels
                    .iter()
                    .map(|label| PauliString::from_label(label))
                    .collect::<Result<Vec<_>, _>>()?;
                let symmetries = Z2Symmetries::from_symmetries(operator.num_qubits(), generators)?;
                log_subtitle("Z2 symmetries from input");
                qtaper_output!("");
                symmetries.log_output_display();
                symmetries
            }
        };
        ensure!(
            symmetries.num_qubits() == operator.num_qubits(),
            "The symmetries act on {} qubit(s), but the Hamiltonian acts on {}.",
            symmetries.num_qubits(),
            operator.num_qubits()
        );

        let tapering = match &self.sector {
            SectorInputKind::Search(params) => {
                let mut driver = SectorSearchDriver::builder()
                    .parameters(params)
                    .operator(operator)
                    .symmetries(&symmetries)
                    .eigensolver(&self.eigensolver)
                    .build()?;
                driver.run()?;
                driver.result()?.tapering_parameters()?
            }
            SectorInputKind::Fixed(sector) => {
                let tapered = symmetries.taper(operator, sector, self.zero_threshold)?;
                log_subtitle("Tapering in a fixed sector");
                qtaper_output!("");
                qtaper_output!("Sector: {sector}");
                qtaper_output!(
                    "Tapered operator: {} qubit(s), {} term(s)",
                    tapered.num_qubits(),
                    tapered.len()
                );
                qtaper_output!(
                    "Lowest energy in sector: {:+.12}",
                    self.eigensolver.lowest_eigenvalue(&tapered)?
                );
                qtaper_output!("");
                TaperingParameters::new(symmetries, sector.clone(), tapered)?
            }
        };

        if let Some(name) = self.tapering_save_name.as_ref() {
            write_qtaper_binary(name, QTaperFileType::Tpr, &tapering)?;
            qtaper_output!(
                "Tapering parameters saved as {}.{}.",
                name.display(),
                QTaperFileType::Tpr.ext()
            );
        }
        if let Some(path) = self.tapered_operator_output.as_ref() {
            write_pauli_text(path, &tapering.tapered_operator)?;
            qtaper_output!("Tapered operator written to {}.", path.display());
        }
        qtaper_output!("");
        log_macsec_end("Qubit tapering");
        Ok(tapering)
    }
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        self.run().map(|_| ())
    }
}
