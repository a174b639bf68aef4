//! Driver for $`\mathbb{Z}_2`$ symmetry detection in QTaper.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, format_err};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::drivers::QTaperDriver;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, qtaper_output, table_rule, write_subtitle, QTaperOutput,
};
use crate::io::{write_qtaper_binary, QTaperFileType};
use crate::pauli::PauliOperator;
use crate::tapering::Z2Symmetries;


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_coefficient_threshold() -> f64 {
    1e-12
}

/// Structure containing control parameters for $`\mathbb{Z}_2`$ symmetry detection.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct Z2SymmetryDetectionParams {
    /// Threshold below which the moduli of term coefficients are treated as zero, so that the
    /// corresponding terms impose no constraint on the symmetries.
    #[builder(default = "1e-12")]
    #[serde(default = "default_coefficient_threshold")]
    pub coefficient_threshold: f64,

    /// Boolean indicating if the Clifford operators are to be written to the output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_cliffords: bool,

    /// Optional name for saving the result as a binary file of type [`QTaperFileType::Sym`]. If
    /// `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl Z2SymmetryDetectionParams {
    /// Returns a builder to construct a [`Z2SymmetryDetectionParams`] structure.
    pub fn builder() -> Z2SymmetryDetectionParamsBuilder {
        Z2SymmetryDetectionParamsBuilder::default()
    }
}

impl Default for Z2SymmetryDetectionParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `Z2SymmetryDetectionParams`.")
    }
}

impl fmt::Display for Z2SymmetryDetectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Coefficient threshold: {:.3e}",
            self.coefficient_threshold
        )?;
        writeln!(
            f,
            "Report Clifford operators: {}",
            nice_bool(self.write_cliffords)
        )?;
        writeln!(
            f,
            "Save symmetry-detection results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(QTaperFileType::Sym.ext());
                path.display().to_string()
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// Structure to contain $`\mathbb{Z}_2`$ symmetry-detection results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct Z2SymmetryDetectionResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: Z2SymmetryDetectionParams,

    /// The number of qubits of the analysed operator.
    pub num_qubits: usize,

    /// The number of terms of the analysed operator.
    pub num_terms: usize,

    /// The symmetries found.
    pub symmetries: Z2Symmetries,
}

impl Z2SymmetryDetectionResult {
    /// Returns a builder to construct a [`Z2SymmetryDetectionResult`] structure.
    fn builder() -> Z2SymmetryDetectionResultBuilder {
        Z2SymmetryDetectionResultBuilder::default()
    }

    /// Writes the Clifford operators in a nicely formatted list.
    fn write_cliffords(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Clifford operators")?;
        writeln!(f)?;
        for (i, clifford) in self.symmetries.cliffords().iter().enumerate() {
            writeln!(f, "U{i}:")?;
            for line in clifford.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Z2SymmetryDetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.symmetries.len();
        writeln!(
            f,
            "Independent Z2 symmetries found: {k} ({} → {} qubit{})",
            self.num_qubits,
            self.num_qubits - k,
            if self.num_qubits - k == 1 { "" } else { "s" }
        )?;
        writeln!(f)?;
        if k == 0 {
            return Ok(());
        }

        let width = self.num_qubits.max(9);
        let rule = table_rule(width * 2 + 22);
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:>3}  {:<width$}  {:>5}  {:<width$}",
            "#", "Generator", "Qubit", "Witness"
        )?;
        writeln!(f, "{rule}")?;
        for (i, ((symmetry, sq_pauli), qubit)) in self
            .symmetries
            .symmetries()
            .iter()
            .zip(self.symmetries.sq_paulis().iter())
            .zip(self.symmetries.sq_list().iter())
            .enumerate()
        {
            writeln!(
                f,
                "{i:>3}  {:<width$}  {qubit:>5}  {:<width$}",
                symmetry.label(),
                sq_pauli.label()
            )?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        if self.parameters.write_cliffords {
            self.write_cliffords(f)?;
        }
        Ok(())
    }
}

// ------
// Driver
// ------

/// Driver for $`\mathbb{Z}_2`$ symmetry detection.
#[derive(Clone, Builder)]
pub struct Z2SymmetryDetectionDriver<'a> {
    /// The control parameters for symmetry detection.
    parameters: &'a Z2SymmetryDetectionParams,

    /// The operator whose symmetries are to be detected.
    operator: &'a PauliOperator,

    /// The result of the symmetry detection.
    #[builder(setter(skip), default = "None")]
    result: Option<Z2SymmetryDetectionResult>,
}

impl<'a> Z2SymmetryDetectionDriver<'a> {
    /// Returns a builder to construct a [`Z2SymmetryDetectionDriver`] structure.
    pub fn builder() -> Z2SymmetryDetectionDriverBuilder<'a> {
        Z2SymmetryDetectionDriverBuilder::default()
    }

    /// Executes symmetry detection.
    fn detect_symmetries(&mut self) -> Result<(), anyhow::Error> {
        log_title("Z2 Symmetry Detection");
        qtaper_output!("");
        qtaper_output!(
            "Ref.: Bravyi, S., Gambetta, J. M., Mezzacapo, A. & Temme, K. *arXiv:1701.08213* (2017)."
        );
        qtaper_output!("");
        let params = self.parameters;
        params.log_output_display();

        log_subtitle("Operator");
        qtaper_output!("");
        qtaper_output!("Number of qubits: {}", self.operator.num_qubits());
        qtaper_output!("Number of Pauli terms: {}", self.operator.len());
        qtaper_output!(
            "Largest coefficient modulus: {:.6e}",
            self.operator.max_coefficient_norm()
        );
        qtaper_output!("");

        let symmetries = Z2Symmetries::find(self.operator, params.coefficient_threshold)?;

        self.result = Some(
            Z2SymmetryDetectionResult::builder()
                .parameters(params.clone())
                .num_qubits(self.operator.num_qubits())
                .num_terms(self.operator.len())
                .symmetries(symmetries)
                .build()?,
        );

        if let Some(res) = self.result.as_ref() {
            log_subtitle("Symmetry generators");
            qtaper_output!("");
            res.log_output_display();
            if let Some(name) = params.result_save_name.as_ref() {
                write_qtaper_binary(name, QTaperFileType::Sym, res)?;
                qtaper_output!(
                    "Symmetry-detection results saved as {}.{}.",
                    name.display(),
                    QTaperFileType::Sym.ext()
                );
                qtaper_output!("");
            }
        }

        Ok(())
    }
}

impl<'a> QTaperDriver for Z2SymmetryDetectionDriver<'a> {
    type Params = Z2SymmetryDetectionParams;

    type Outcome = Z2SymmetryDetectionResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No Z2 symmetry-detection results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.detect_symmetries()
    }
}
