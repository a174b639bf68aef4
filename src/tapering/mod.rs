//! Qubit tapering by $`\mathbb{Z}_2`$ symmetries.
//!
//! A Pauli string $`\tau`$ that commutes with every term of a Hamiltonian $`\hat{H}`$ generates a
//! $`\mathbb{Z}_2`$ symmetry of $`\hat{H}`$. Given $`k`$ independent, mutually commuting such
//! generators $`\tau_1, \ldots, \tau_k`$, together with single-qubit Pauli operators
//! $`\sigma_j`$ acting on distinct qubits $`q_j`$ such that $`\sigma_j`$ anticommutes with
//! $`\tau_j`$ and commutes with every $`\tau_{i \neq j}`$, the Clifford operators
//!
//! ```math
//! U_j = \frac{1}{\sqrt{2}} (\tau_j + \sigma_j)
//! ```
//!
//! satisfy $`U_j \tau_j U_j = \sigma_j`$. In the rotated frame $`U \hat{H} U^\dagger`$ with
//! $`U = U_k \cdots U_1`$, every term acts on qubit $`q_j`$ as either the identity or
//! $`\sigma_j`$, which can therefore be replaced by one of its eigenvalues $`\pm 1`$. Each choice
//! of eigenvalues (a [`Sector`]) gives an operator on $`N - k`$ qubits whose spectrum is a subset
//! of that of $`\hat{H}`$, and the union over all sectors recovers the full spectrum.
//!
//! Reference: Bravyi, S., Gambetta, J. M., Mezzacapo, A. & Temme, K. *arXiv:1701.08213* (2017).

use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::pauli::commutation::{anticommutes, commutes, is_abelian};
use crate::pauli::{PauliError, PauliKind, PauliOperator, PauliString, C128};

pub mod clifford;
pub mod sector;
pub mod symmetry_finder;
pub mod transform;

pub use sector::Sector;

#[cfg(test)]
#[path = "tapering_tests.rs"]
mod tapering_tests;

// ==================
// Error definitions
// ==================

/// Enumerated type for errors arising from symmetry detection and qubit tapering.
#[derive(Debug, Clone, PartialEq)]
pub enum Z2SymmetryError {
    /// Variant for mismatched sizes, *e.g.* an operator and a symmetry group acting on different
    /// numbers of qubits, or a sector whose length differs from the number of generators.
    DimensionMismatch {
        /// What was being compared.
        context: String,

        /// The expected size.
        expected: usize,

        /// The size found.
        found: usize,
    },

    /// Variant for a symmetry generator for which no unused qubit can host a single-qubit
    /// Pauli operator anticommuting with it alone.
    DegenerateSymmetry {
        /// The label of the offending generator.
        symmetry: String,
    },

    /// Variant for a sign sequence containing values other than $`\pm 1`$.
    InvalidSector(String),

    /// Variant for an operator term that does not commute with the symmetry generators.
    SymmetryViolation {
        /// The label of the offending term in the Clifford-rotated frame.
        term: String,

        /// The tapered qubit on which the violation was detected.
        qubit: usize,
    },

    /// Variant for a sector search in which no sector reproduces the reference energy.
    NoMatchingSector {
        /// The reference energy.
        reference: f64,

        /// The energy tolerance used.
        tolerance: f64,

        /// The sector whose lowest energy is closest to the reference.
        closest_sector: Sector,

        /// The lowest energy in [`Self::NoMatchingSector::closest_sector`].
        closest_energy: f64,
    },

    /// Variant for an inconsistent user-supplied symmetry specification.
    InvalidSymmetries(String),

    /// Variant for an underlying Pauli-algebra error.
    Pauli(PauliError),
}

impl fmt::Display for Z2SymmetryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "Z2 symmetry error: dimension mismatch for {context} (expected {expected}, found {found})."
            ),
            Self::DegenerateSymmetry { symmetry } => write!(
                f,
                "Z2 symmetry error: no free qubit available for symmetry generator `{symmetry}`."
            ),
            Self::InvalidSector(msg) => write!(f, "Z2 symmetry error: invalid sector ({msg})."),
            Self::SymmetryViolation { term, qubit } => write!(
                f,
                "Z2 symmetry error: term `{term}` does not commute with the symmetry tapered at qubit {qubit}."
            ),
            Self::NoMatchingSector {
                reference,
                tolerance,
                closest_sector,
                closest_energy,
            } => write!(
                f,
                "Z2 symmetry error: no sector reproduces the reference energy {reference:+.12} within {tolerance:.3e} \
                (closest: sector {closest_sector} with {closest_energy:+.12})."
            ),
            Self::InvalidSymmetries(msg) => {
                write!(f, "Z2 symmetry error: invalid symmetry specification ({msg}).")
            }
            Self::Pauli(err) => write!(f, "Z2 symmetry error: {err}"),
        }
    }
}

impl Error for Z2SymmetryError {}

impl From<PauliError> for Z2SymmetryError {
    fn from(err: PauliError) -> Self {
        Self::Pauli(err)
    }
}

// ==================
// Struct definitions
// ==================

/// Structure containing a set of $`\mathbb{Z}_2`$ symmetry generators together with the
/// single-qubit Pauli operators and Clifford operators needed to taper them off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Z2SymmetriesRepr", into = "Z2SymmetriesRepr")]
pub struct Z2Symmetries {
    /// The number of qubits of the operators these symmetries act on.
    num_qubits: usize,

    /// The independent, mutually commuting symmetry generators $`\tau_j`$.
    symmetries: Vec<PauliString>,

    /// The single-qubit Pauli operators $`\sigma_j`$.
    sq_paulis: Vec<PauliString>,

    /// The qubits $`q_j`$ on which the $`\sigma_j`$ act.
    sq_list: Vec<usize>,

    /// The Clifford operators $`U_j = (\tau_j + \sigma_j)/\sqrt{2}`$.
    cliffords: Vec<PauliOperator>,
}

/// Serialised form of [`Z2Symmetries`]. The Clifford operators are rebuilt, and the whole set
/// revalidated, on deserialisation.
#[derive(Clone, Serialize, Deserialize)]
struct Z2SymmetriesRepr {
    num_qubits: usize,
    symmetries: Vec<PauliString>,
    sq_paulis: Vec<PauliString>,
    sq_list: Vec<usize>,
}

impl TryFrom<Z2SymmetriesRepr> for Z2Symmetries {
    type Error = Z2SymmetryError;

    fn try_from(repr: Z2SymmetriesRepr) -> Result<Self, Self::Error> {
        Self::new(repr.num_qubits, repr.symmetries, repr.sq_paulis, repr.sq_list)
    }
}

impl From<Z2Symmetries> for Z2SymmetriesRepr {
    fn from(symmetries: Z2Symmetries) -> Self {
        Self {
            num_qubits: symmetries.num_qubits,
            symmetries: symmetries.symmetries,
            sq_paulis: symmetries.sq_paulis,
            sq_list: symmetries.sq_list,
        }
    }
}

impl Z2Symmetries {
    /// Constructs an empty set of symmetries on `num_qubits` qubits. Tapering with an empty set
    /// leaves operators unchanged.
    pub fn empty(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            symmetries: vec![],
            sq_paulis: vec![],
            sq_list: vec![],
            cliffords: vec![],
        }
    }

    /// Constructs a set of symmetries from explicitly specified generators, single-qubit Pauli
    /// operators, and tapered qubits, and builds the corresponding Clifford operators.
    ///
    /// # Errors
    ///
    /// Errors if the lists have different lengths, if any string does not act on `num_qubits`
    /// qubits, if the generators do not mutually commute, if any single-qubit operator does not
    /// act on its listed qubit alone, if the tapered qubits are out of range or not distinct, or
    /// if $`\sigma_j`$ fails to anticommute with $`\tau_j`$ alone.
    pub fn new(
        num_qubits: usize,
        symmetries: Vec<PauliString>,
        sq_paulis: Vec<PauliString>,
        sq_list: Vec<usize>,
    ) -> Result<Self, Z2SymmetryError> {
        let k = symmetries.len();
        for (context, found) in [
            ("the number of single-qubit Pauli operators", sq_paulis.len()),
            ("the number of tapered qubits", sq_list.len()),
        ] {
            if found != k {
                return Err(Z2SymmetryError::DimensionMismatch {
                    context: context.to_string(),
                    expected: k,
                    found,
                });
            }
        }
        if let Some(pauli) = symmetries
            .iter()
            .chain(sq_paulis.iter())
            .find(|pauli| pauli.num_qubits() != num_qubits)
        {
            return Err(Z2SymmetryError::DimensionMismatch {
                context: format!("Pauli string `{pauli}`"),
                expected: num_qubits,
                found: pauli.num_qubits(),
            });
        }
        if let Some(qubit) = sq_list.iter().find(|&&q| q >= num_qubits) {
            return Err(Z2SymmetryError::InvalidSymmetries(format!(
                "tapered qubit {qubit} is out of range for {num_qubits} qubit(s)"
            )));
        }
        if !sq_list.iter().all_unique() {
            return Err(Z2SymmetryError::InvalidSymmetries(format!(
                "tapered qubits {sq_list:?} are not distinct"
            )));
        }
        if !is_abelian(&symmetries)? {
            return Err(Z2SymmetryError::InvalidSymmetries(
                "symmetry generators do not mutually commute".to_string(),
            ));
        }
        for (j, (sq_pauli, &qubit)) in sq_paulis.iter().zip(sq_list.iter()).enumerate() {
            if sq_pauli.weight() != 1 || sq_pauli.kind_at(qubit) == PauliKind::I {
                return Err(Z2SymmetryError::InvalidSymmetries(format!(
                    "`{sq_pauli}` is not a single-qubit Pauli operator on qubit {qubit}"
                )));
            }
            for (i, symmetry) in symmetries.iter().enumerate() {
                let ok = if i == j {
                    anticommutes(sq_pauli, symmetry)?
                } else {
                    commutes(sq_pauli, symmetry)?
                };
                if !ok {
                    return Err(Z2SymmetryError::InvalidSymmetries(format!(
                        "`{sq_pauli}` must anticommute with `{}` only",
                        symmetries[j]
                    )));
                }
            }
        }

        let coeff = C128::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        let cliffords = symmetries
            .iter()
            .zip(sq_paulis.iter())
            .map(|(symmetry, sq_pauli)| {
                PauliOperator::from_terms(
                    num_qubits,
                    [(symmetry.clone(), coeff), (sq_pauli.clone(), coeff)],
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num_qubits,
            symmetries,
            sq_paulis,
            sq_list,
            cliffords,
        })
    }

    /// The number of qubits of the operators these symmetries act on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The number of independent generators, *i.e.* the number of qubits tapered off.
    pub fn len(&self) -> usize {
        self.symmetries.len()
    }

    /// Returns `true` if there are no symmetry generators.
    pub fn is_empty(&self) -> bool {
        self.symmetries.is_empty()
    }

    /// The symmetry generators $`\tau_j`$.
    pub fn symmetries(&self) -> &[PauliString] {
        &self.symmetries
    }

    /// The single-qubit Pauli operators $`\sigma_j`$.
    pub fn sq_paulis(&self) -> &[PauliString] {
        &self.sq_paulis
    }

    /// The tapered qubits $`q_j`$.
    pub fn sq_list(&self) -> &[usize] {
        &self.sq_list
    }

    /// The Clifford operators $`U_j`$.
    pub fn cliffords(&self) -> &[PauliOperator] {
        &self.cliffords
    }

    /// Iterates over all sectors of this symmetry group in enumeration order.
    pub fn sectors(&self) -> impl Iterator<Item = Sector> {
        Sector::enumerate(self.len())
    }
}

impl fmt::Display for Z2Symmetries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No Z2 symmetries.");
        }
        writeln!(f, "Symmetries:")?;
        for symmetry in self.symmetries.iter() {
            writeln!(f, "  {symmetry}")?;
        }
        writeln!(f, "Single-qubit Pauli operators:")?;
        for sq_pauli in self.sq_paulis.iter() {
            writeln!(f, "  {sq_pauli}")?;
        }
        writeln!(f, "Cliffords:")?;
        for clifford in self.cliffords.iter() {
            for line in clifford.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "Qubit indices: [{}]",
            self.sq_list.iter().map(|q| q.to_string()).join(", ")
        )?;
        Ok(())
    }
}

/// Structure bundling everything a downstream consumer (*e.g.* a variational solver that builds a
/// symmetry-reduced trial state) needs to know about a tapering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaperingParameters {
    /// The symmetries that were tapered off.
    pub symmetries: Z2Symmetries,

    /// The sector in which the operator was tapered.
    pub sector: Sector,

    /// The tapered operator.
    pub tapered_operator: PauliOperator,
}

impl TaperingParameters {
    /// Bundles a tapering result.
    ///
    /// # Errors
    ///
    /// Errors if the sector length or the tapered operator's qubit count are inconsistent with
    /// `symmetries`.
    pub fn new(
        symmetries: Z2Symmetries,
        sector: Sector,
        tapered_operator: PauliOperator,
    ) -> Result<Self, Z2SymmetryError> {
        if sector.len() != symmetries.len() {
            return Err(Z2SymmetryError::DimensionMismatch {
                context: "the sector length".to_string(),
                expected: symmetries.len(),
                found: sector.len(),
            });
        }
        let expected = symmetries.num_qubits() - symmetries.len();
        if tapered_operator.num_qubits() != expected {
            return Err(Z2SymmetryError::DimensionMismatch {
                context: "the tapered operator".to_string(),
                expected,
                found: tapered_operator.num_qubits(),
            });
        }
        Ok(Self {
            symmetries,
            sector,
            tapered_operator,
        })
    }
}
