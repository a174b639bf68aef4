//! Driver for symmetry-sector selection in QTaper.
//!
//! Every sector of a set of $`\mathbb{Z}_2`$ symmetries yields a tapered operator whose spectrum
//! is the part of the full spectrum belonging to that sector. The sector containing the state
//! of interest is identified by comparing the lowest eigenvalue of each tapered operator with a
//! reference energy, or, without a reference, by taking the sector with the lowest eigenvalue.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::drivers::QTaperDriver;
use crate::eigensolver::Eigensolver;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, qtaper_output, qtaper_warn, table_rule, QTaperOutput,
};
use crate::io::{write_qtaper_binary, QTaperFileType};
use crate::pauli::PauliOperator;
use crate::tapering::{Sector, TaperingParameters, Z2SymmetryError, Z2Symmetries};


// ================
// Enum definitions
// ================

/// Enumerated type for the sources of the reference energy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReferenceEnergy {
    /// Variant for computing the reference energy by diagonalising the untapered operator.
    Compute,

    /// Variant for a known reference energy.
    Value(f64),

    /// Variant for no reference energy. The sector with the lowest energy is then selected.
    Omit,
}

impl Default for ReferenceEnergy {
    fn default() -> Self {
        Self::Compute
    }
}

impl fmt::Display for ReferenceEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute => write!(f, "computed from the untapered operator"),
            Self::Value(value) => write!(f, "{value:+.12}"),
            Self::Omit => write!(f, "none (lowest-energy sector)"),
        }
    }
}

/// Enumerated type for the criteria by which a sector was selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorSelection {
    /// Variant for a sector whose lowest energy matches the reference energy.
    MatchedReference,

    /// Variant for the sector with the lowest energy.
    LowestEnergy,
}

impl fmt::Display for SectorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchedReference => write!(f, "matched reference energy"),
            Self::LowestEnergy => write!(f, "lowest energy"),
        }
    }
}

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_energy_tolerance() -> f64 {
    1e-6
}

fn default_zero_threshold() -> f64 {
    1e-12
}

fn default_true() -> bool {
    true
}

/// Structure containing control parameters for sector search.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SectorSearchParams {
    /// The source of the reference energy.
    #[builder(default = "ReferenceEnergy::Compute")]
    #[serde(default)]
    pub reference: ReferenceEnergy,

    /// The largest deviation from the reference energy for a sector to be accepted.
    #[builder(default = "1e-6")]
    #[serde(default = "default_energy_tolerance")]
    pub energy_tolerance: f64,

    /// Threshold for discarding negligible coefficient parts during tapering. This is also the
    /// margin within which two sectors are considered equally good, in which case the earlier
    /// one in enumeration order is selected.
    #[builder(default = "1e-12")]
    #[serde(default = "default_zero_threshold")]
    pub zero_threshold: f64,

    /// Boolean indicating if sectors are to be evaluated in parallel.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Boolean indicating if the search stops as soon as a sector within
    /// [`Self::energy_tolerance`] of the reference is found. Sectors are then evaluated in
    /// enumeration order, in batches as large as the thread pool when running in parallel, and
    /// the first matching sector is selected. This has no effect without a reference energy.
    #[builder(default = "false")]
    #[serde(default)]
    pub early_termination: bool,

    /// Boolean indicating if the selected tapered operator is to be written to the output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_tapered_operator: bool,

    /// Optional name for saving the result as a binary file of type [`QTaperFileType::Sec`],
    /// together with the tapering parameters as a binary file of type [`QTaperFileType::Tpr`].
    /// If `None`, nothing is saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl SectorSearchParams {
    /// Returns a builder to construct a [`SectorSearchParams`] structure.
    pub fn builder() -> SectorSearchParamsBuilder {
        SectorSearchParamsBuilder::default()
    }
}

impl Default for SectorSearchParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `SectorSearchParams`.")
    }
}

impl fmt::Display for SectorSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reference energy: {}", self.reference)?;
        writeln!(f, "Energy tolerance: {:.3e}", self.energy_tolerance)?;
        writeln!(f, "Zero threshold: {:.3e}", self.zero_threshold)?;
        writeln!(f, "Parallel evaluation: {}", nice_bool(self.parallel))?;
        writeln!(
            f,
            "Stop at first matching sector: {}",
            nice_bool(self.early_termination)
        )?;
        writeln!(
            f,
            "Report tapered operator: {}",
            nice_bool(self.write_tapered_operator)
        )?;
        writeln!(
            f,
            "Save sector-search results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(QTaperFileType::Sec.ext());
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

/// Structure summarising the tapered operator of one sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorEvaluation {
    /// The sector.
    pub sector: Sector,

    /// The number of qubits of the tapered operator.
    pub num_qubits: usize,

    /// The number of terms of the tapered operator.
    pub num_terms: usize,

    /// The lowest eigenvalue of the tapered operator.
    pub lowest_energy: f64,

    /// The absolute deviation of [`Self::lowest_energy`] from the reference energy, if any.
    pub deviation: Option<f64>,
}

/// Structure to contain sector-search results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SectorSearchResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: SectorSearchParams,

    /// The reference energy used, if any.
    pub reference_energy: Option<f64>,

    /// The symmetries that were tapered off.
    pub symmetries: Z2Symmetries,

    /// The evaluated sectors in enumeration order. With early termination, only the sectors
    /// evaluated before the search stopped are included.
    pub evaluations: Vec<SectorEvaluation>,

    /// The index into [`Self::evaluations`] of the selected sector.
    pub selected_index: usize,

    /// The criterion by which the sector was selected.
    pub selection: SectorSelection,

    /// The operator tapered in the selected sector.
    pub tapered_operator: PauliOperator,
}

impl SectorSearchResult {
    /// Returns a builder to construct a [`SectorSearchResult`] structure.
    fn builder() -> SectorSearchResultBuilder {
        SectorSearchResultBuilder::default()
    }

    /// Returns the evaluation of the selected sector.
    pub fn selected(&self) -> &SectorEvaluation {
        &self.evaluations[self.selected_index]
    }

    /// Returns the selected sector.
    pub fn selected_sector(&self) -> &Sector {
        &self.selected().sector
    }

    /// Bundles the symmetries, the selected sector, and the tapered operator for downstream use.
    pub fn tapering_parameters(&self) -> Result<TaperingParameters, Z2SymmetryError> {
        TaperingParameters::new(
            self.symmetries.clone(),
            self.selected_sector().clone(),
            self.tapered_operator.clone(),
        )
    }
}

impl fmt::Display for SectorSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.symmetries.len();
        let sector_width = (k * 4).max(6);
        let rule = table_rule(sector_width + 60);
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:>5}  {:<sector_width$}  {:>6}  {:>6}  {:>18}  {:>14}  ",
            "#", "Sector", "Qubits", "Terms", "Lowest energy", "Deviation"
        )?;
        writeln!(f, "{rule}")?;
        for evaluation in self.evaluations.iter() {
            let marker = if evaluation.sector == *self.selected_sector() {
                "◂"
            } else {
                ""
            };
            writeln!(
                f,
                "{:>5}  {:<sector_width$}  {:>6}  {:>6}  {:>+18.12}  {:>14}  {marker}",
                evaluation.sector.index(),
                evaluation.sector.to_string(),
                evaluation.num_qubits,
                evaluation.num_terms,
                evaluation.lowest_energy,
                evaluation
                    .deviation
                    .map(|dev| format!("{dev:.3e}"))
                    .unwrap_or_else(|| "--".to_string()),
            )?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        if let Some(reference) = self.reference_energy {
            writeln!(f, "Reference energy: {reference:+.12}")?;
        }
        writeln!(
            f,
            "Selected sector: {} ({})",
            self.selected_sector(),
            self.selection
        )?;
        writeln!(
            f,
            "Lowest energy in selected sector: {:+.12}",
            self.selected().lowest_energy
        )?;
        writeln!(
            f,
            "Tapered operator: {} qubit(s), {} term(s)",
            self.tapered_operator.num_qubits(),
            self.tapered_operator.len()
        )?;
        writeln!(f)?;

        if self.parameters.write_tapered_operator {
            writeln!(f, "Tapered operator in the selected sector:")?;
            for line in self.tapered_operator.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ------
// Driver
// ------

/// Driver for sector search.
#[derive(Clone, Builder)]
pub struct SectorSearchDriver<'a> {
    /// The control parameters for sector search.
    parameters: &'a SectorSearchParams,

    /// The untapered operator.
    operator: &'a PauliOperator,

    /// The symmetries of [`Self::operator`].
    symmetries: &'a Z2Symmetries,

    /// The eigensolver used for the untapered and the tapered operators.
    eigensolver: &'a dyn Eigensolver,

    /// The result of the sector search.
    #[builder(setter(skip), default = "None")]
    result: Option<SectorSearchResult>,
}

impl<'a> SectorSearchDriver<'a> {
    /// Returns a builder to construct a [`SectorSearchDriver`] structure.
    pub fn builder() -> SectorSearchDriverBuilder<'a> {
        SectorSearchDriverBuilder::default()
    }

    /// Tapers the Clifford-rotated operator in the sector at `index` and evaluates its lowest
    /// energy.
    fn evaluate_sector(
        &self,
        converted: &PauliOperator,
        index: usize,
        reference: Option<f64>,
    ) -> Result<(SectorEvaluation, PauliOperator), anyhow::Error> {
        let sector = Sector::from_index(self.symmetries.len(), index);
        let tapered =
            self.symmetries
                .taper_clifford(converted, &sector, self.parameters.zero_threshold)?;
        let lowest_energy = self.eigensolver.lowest_eigenvalue(&tapered)?;
        log::debug!("Sector {sector}: lowest energy {lowest_energy:+.12}.");
        let evaluation = SectorEvaluation {
            sector,
            num_qubits: tapered.num_qubits(),
            num_terms: tapered.len(),
            lowest_energy,
            deviation: reference.map(|r| (lowest_energy - r).abs()),
        };
        Ok((evaluation, tapered))
    }

    /// Evaluates the sectors with indices in `indices`, preserving their order.
    fn evaluate_sectors(
        &self,
        converted: &PauliOperator,
        indices: std::ops::Range<usize>,
        reference: Option<f64>,
    ) -> Result<Vec<(SectorEvaluation, PauliOperator)>, anyhow::Error> {
        if self.parameters.parallel {
            indices
                .into_par_iter()
                .map(|index| self.evaluate_sector(converted, index, reference))
                .collect()
        } else {
            indices
                .map(|index| self.evaluate_sector(converted, index, reference))
                .collect()
        }
    }

    /// Executes the sector search.
    fn search_sectors(&mut self) -> Result<(), anyhow::Error> {
        log_title("Symmetry Sector Search");
        qtaper_output!("");
        let params = self.parameters;
        params.log_output_display();

        let reference = match params.reference {
            ReferenceEnergy::Compute => {
                let energy = self.eigensolver.lowest_eigenvalue(self.operator)?;
                qtaper_output!("Lowest energy of the untapered operator: {energy:+.12}");
                qtaper_output!("");
                Some(energy)
            }
            ReferenceEnergy::Value(energy) => Some(energy),
            ReferenceEnergy::Omit => None,
        };

        let k = self.symmetries.len();
        ensure!(
            k < usize::BITS as usize,
            "Cannot enumerate 2^{k} symmetry sectors."
        );
        let num_sectors = 1usize << k;
        let converted = self
            .symmetries
            .convert_clifford(self.operator, params.zero_threshold)?;

        let mut evaluated: Vec<(SectorEvaluation, PauliOperator)> = Vec::with_capacity(num_sectors);
        match reference {
            Some(r) if params.early_termination => {
                let batch_size = if params.parallel {
                    rayon::current_num_threads().max(1)
                } else {
                    1
                };
                let mut start = 0;
                while start < num_sectors {
                    let end = (start + batch_size).min(num_sectors);
                    evaluated.extend(self.evaluate_sectors(&converted, start..end, reference)?);
                    if evaluated
                        .iter()
                        .any(|(ev, _)| (ev.lowest_energy - r).abs() <= params.energy_tolerance)
                    {
                        break;
                    }
                    start = end;
                }
            }
            _ => {
                evaluated = self.evaluate_sectors(&converted, 0..num_sectors, reference)?;
            }
        }

        let (selected_index, selection) = match reference {
            Some(r) => {
                let scores = evaluated
                    .iter()
                    .map(|(ev, _)| (ev.lowest_energy - r).abs())
                    .collect::<Vec<_>>();
                let candidate = if params.early_termination {
                    scores.iter().position(|&dev| dev <= params.energy_tolerance)
                } else {
                    select_first_minimum(&scores, params.zero_threshold)
                        .filter(|&i| scores[i] <= params.energy_tolerance)
                };
                let num_matches = scores
                    .iter()
                    .filter(|&&dev| dev <= params.energy_tolerance)
                    .count();
                if num_matches > 1 {
                    qtaper_warn!(
                        "{num_matches} sectors lie within {:.3e} of the reference energy.",
                        params.energy_tolerance
                    );
                }
                match candidate {
                    Some(i) => (i, SectorSelection::MatchedReference),
                    None => {
                        let closest = select_first_minimum(&scores, params.zero_threshold)
                            .ok_or_else(|| format_err!("No sectors have been evaluated."))?;
                        return Err(Z2SymmetryError::NoMatchingSector {
                            reference: r,
                            tolerance: params.energy_tolerance,
                            closest_sector: evaluated[closest].0.sector.clone(),
                            closest_energy: evaluated[closest].0.lowest_energy,
                        }
                        .into());
                    }
                }
            }
            None => {
                let energies = evaluated
                    .iter()
                    .map(|(ev, _)| ev.lowest_energy)
                    .collect::<Vec<_>>();
                let i = select_first_minimum(&energies, params.zero_threshold)
                    .ok_or_else(|| format_err!("No sectors have been evaluated."))?;
                (i, SectorSelection::LowestEnergy)
            }
        };

        let tapered_operator = evaluated[selected_index].1.clone();
        let evaluations = evaluated.into_iter().map(|(ev, _)| ev).collect::<Vec<_>>();
        self.result = Some(
            SectorSearchResult::builder()
                .parameters(params.clone())
                .reference_energy(reference)
                .symmetries(self.symmetries.clone())
                .evaluations(evaluations)
                .selected_index(selected_index)
                .selection(selection)
                .tapered_operator(tapered_operator)
                .build()?,
        );

        if let Some(res) = self.result.as_ref() {
            log_subtitle("Sector evaluations");
            qtaper_output!("");
            res.log_output_display();
            if let Some(name) = params.result_save_name.as_ref() {
                write_qtaper_binary(name, QTaperFileType::Sec, res)?;
                qtaper_output!(
                    "Sector-search results saved as {}.{}.",
                    name.display(),
                    QTaperFileType::Sec.ext()
                );
                write_qtaper_binary(name, QTaperFileType::Tpr, &res.tapering_parameters()?)?;
                qtaper_output!(
                    "Tapering parameters saved as {}.{}.",
                    name.display(),
                    QTaperFileType::Tpr.ext()
                );
                qtaper_output!("");
            }
        }

        Ok(())
    }
}

/// Returns the first index whose value lies within `margin` of the minimum of `values`.
fn select_first_minimum(values: &[f64], margin: f64) -> Option<usize> {
    let min = values.iter().copied().min_by(|a, b| a.total_cmp(b))?;
    values.iter().position(|&v| v <= min + margin)
}

impl<'a> QTaperDriver for SectorSearchDriver<'a> {
    type Params = SectorSearchParams;

    type Outcome = SectorSearchResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No sector-search results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.search_sectors()
    }
}
