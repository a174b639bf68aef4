//! Weighted sums of Pauli strings.

use std::convert::TryFrom;
use std::fmt;

use indexmap::IndexMap;
use nalgebra::DMatrix;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::pauli::commutation;
use crate::pauli::pauli_string::phase_factor;
use crate::pauli::{PauliError, PauliString, C128};

#[cfg(test)]
#[path = "pauli_operator_tests.rs"]
mod pauli_operator_tests;

// ==================
// Struct definitions
// ==================

/// Structure pairing a complex coefficient with a Pauli string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// The Pauli string.
    pub pauli: PauliString,

    /// The coefficient multiplying [`Self::pauli`].
    pub coefficient: C128,
}

impl PauliTerm {
    /// Constructs a new term.
    pub fn new(pauli: PauliString, coefficient: C128) -> Self {
        Self { pauli, coefficient }
    }
}

/// Structure representing an operator $`\hat{O} = \sum_j c_j P_j`$ as a weighted sum of Pauli
/// strings acting on a fixed number of qubits.
///
/// The terms are kept in a deterministic order (order of first insertion) and no two terms share
/// the same Pauli string: adding a term whose string is already present adds to the existing
/// coefficient.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PauliOperatorRepr", into = "PauliOperatorRepr")]
pub struct PauliOperator {
    num_qubits: usize,
    terms: IndexMap<PauliString, C128>,
}

/// Flat serialisable form of [`PauliOperator`].
#[derive(Clone, Serialize, Deserialize)]
struct PauliOperatorRepr {
    num_qubits: usize,
    #[serde(default)]
    terms: Vec<PauliTerm>,
}

impl PauliOperator {
    /// Constructs the zero operator on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            terms: IndexMap::new(),
        }
    }

    /// Constructs an operator from `(string, coefficient)` pairs. Repeated strings are merged.
    ///
    /// # Errors
    ///
    /// Errors if any string does not act on `num_qubits` qubits.
    pub fn from_terms<I>(num_qubits: usize, terms: I) -> Result<Self, PauliError>
    where
        I: IntoIterator<Item = (PauliString, C128)>,
    {
        let mut op = Self::new(num_qubits);
        for (pauli, coefficient) in terms {
            op.add_term(pauli, coefficient)?;
        }
        Ok(op)
    }

    /// Constructs an operator from `(label, coefficient)` pairs. The number of qubits is taken
    /// from the first label, or zero if there are no labels.
    ///
    /// # Errors
    ///
    /// Errors if any label is invalid or if the labels have different lengths.
    pub fn from_labels<S, I>(terms: I) -> Result<Self, PauliError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, C128)>,
    {
        let paulis = terms
            .into_iter()
            .map(|(label, coefficient)| {
                PauliString::from_label(label.as_ref()).map(|pauli| (pauli, coefficient))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let num_qubits = paulis.first().map(|(pauli, _)| pauli.num_qubits()).unwrap_or(0);
        Self::from_terms(num_qubits, paulis)
    }

    /// Adds `coefficient` times `pauli` to this operator.
    ///
    /// # Errors
    ///
    /// Errors if `pauli` does not act on [`Self::num_qubits`] qubits.
    pub fn add_term(&mut self, pauli: PauliString, coefficient: C128) -> Result<(), PauliError> {
        if pauli.num_qubits() != self.num_qubits {
            return Err(PauliError::DimensionMismatch {
                expected: self.num_qubits,
                found: pauli.num_qubits(),
            });
        }
        *self.terms.entry(pauli).or_insert(C128::zero()) += coefficient;
        Ok(())
    }

    /// The number of qubits this operator acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The number of distinct Pauli strings.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if this operator has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the Pauli strings and their coefficients in order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &C128)> + '_ {
        self.terms.iter()
    }

    /// Iterates over the Pauli strings in order.
    pub fn paulis(&self) -> impl Iterator<Item = &PauliString> + '_ {
        self.terms.keys()
    }

    /// Returns owned copies of all terms in order.
    pub fn terms(&self) -> Vec<PauliTerm> {
        self.terms
            .iter()
            .map(|(pauli, coefficient)| PauliTerm::new(pauli.clone(), *coefficient))
            .collect()
    }

    /// Returns the coefficient of `pauli`, if present.
    pub fn coefficient(&self, pauli: &PauliString) -> Option<C128> {
        self.terms.get(pauli).copied()
    }

    /// Returns the coefficient of the identity string (zero if absent).
    pub fn identity_coefficient(&self) -> C128 {
        self.coefficient(&PauliString::identity(self.num_qubits))
            .unwrap_or(C128::zero())
    }

    /// Removes numerical noise from the coefficients.
    ///
    /// Real and imaginary parts with magnitudes not exceeding `threshold` are set to zero, and
    /// terms whose coefficients then vanish are removed. A `threshold` of zero removes only
    /// exactly vanishing terms.
    pub fn simplify(&mut self, threshold: f64) {
        self.terms.retain(|_, coefficient| {
            if coefficient.re.abs() <= threshold {
                coefficient.re = 0.0;
            }
            if coefficient.im.abs() <= threshold {
                coefficient.im = 0.0;
            }
            coefficient.re != 0.0 || coefficient.im != 0.0
        });
    }

    /// Returns a simplified copy of this operator. See [`Self::simplify`].
    pub fn simplified(&self, threshold: f64) -> Self {
        let mut op = self.clone();
        op.simplify(threshold);
        op
    }

    /// Returns the sum of this operator and `other`. Terms present in both are merged; no
    /// simplification is performed.
    ///
    /// # Errors
    ///
    /// Errors if the operators act on different numbers of qubits.
    pub fn add(&self, other: &Self) -> Result<Self, PauliError> {
        let mut sum = self.clone();
        for (pauli, coefficient) in other.iter() {
            sum.add_term(pauli.clone(), *coefficient)?;
        }
        Ok(sum)
    }

    /// Returns the difference between this operator and `other`.
    ///
    /// # Errors
    ///
    /// Errors if the operators act on different numbers of qubits.
    pub fn sub(&self, other: &Self) -> Result<Self, PauliError> {
        self.add(&other.scale(C128::new(-1.0, 0.0)))
    }

    /// Returns this operator multiplied by a scalar.
    pub fn scale(&self, factor: C128) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self
                .terms
                .iter()
                .map(|(pauli, coefficient)| (pauli.clone(), coefficient * factor))
                .collect(),
        }
    }

    /// Returns the operator product $`\hat{A}\hat{B}`$ where $`\hat{A}`$ is this operator and
    /// $`\hat{B}`$ is `other`.
    ///
    /// # Errors
    ///
    /// Errors if the operators act on different numbers of qubits.
    pub fn compose(&self, other: &Self) -> Result<Self, PauliError> {
        if self.num_qubits != other.num_qubits {
            return Err(PauliError::DimensionMismatch {
                expected: self.num_qubits,
                found: other.num_qubits,
            });
        }
        let mut product = Self::new(self.num_qubits);
        for (pa, ca) in self.iter() {
            for (pb, cb) in other.iter() {
                let (pc, k) = pa.compose(pb)?;
                product.add_term(pc, ca * cb * phase_factor(k))?;
            }
        }
        Ok(product)
    }

    /// Returns the Hermitian adjoint of this operator.
    pub fn adjoint(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self
                .terms
                .iter()
                .map(|(pauli, coefficient)| (pauli.clone(), coefficient.conj()))
                .collect(),
        }
    }

    /// Returns `true` if every coefficient is real to within `threshold`, which is the condition
    /// for a sum of Hermitian Pauli strings to be Hermitian.
    pub fn is_hermitian(&self, threshold: f64) -> bool {
        self.terms.values().all(|c| c.im.abs() <= threshold)
    }

    /// Returns `true` if `pauli` commutes with every term of this operator.
    ///
    /// # Errors
    ///
    /// Errors if `pauli` acts on a different number of qubits.
    pub fn commutes_with_string(&self, pauli: &PauliString) -> Result<bool, PauliError> {
        commutation::commutes_with_all(pauli, self)
    }

    /// Constructs the dense matrix of this operator in the computational basis. Basis state
    /// $`|b\rangle`$ has qubit $`q`$ in the state given by bit $`q`$ of $`b`$.
    ///
    /// # Errors
    ///
    /// Errors if the operator acts on more than 64 qubits.
    pub fn to_matrix(&self) -> Result<DMatrix<C128>, PauliError> {
        if self.num_qubits > 64 {
            return Err(PauliError::DimensionMismatch {
                expected: 64,
                found: self.num_qubits,
            });
        }
        let dim = 1usize << self.num_qubits;
        let mut mat = DMatrix::<C128>::zeros(dim, dim);
        for (pauli, coefficient) in self.iter() {
            let (x, z) = pauli.masks().ok_or(PauliError::DimensionMismatch {
                expected: 64,
                found: pauli.num_qubits(),
            })?;
            let prefactor = coefficient * phase_factor(((x & z).count_ones() % 4) as u8);
            for col in 0..dim {
                let row = col ^ (x as usize);
                let value = if (col as u64 & z).count_ones() % 2 == 0 {
                    prefactor
                } else {
                    -prefactor
                };
                mat[(row, col)] += value;
            }
        }
        Ok(mat)
    }

    /// The largest coefficient modulus, or zero for an empty operator.
    pub fn max_coefficient_norm(&self) -> f64 {
        self.terms
            .values()
            .map(|c| c.norm())
            .fold(0.0, f64::max)
    }
}

// =====================
// Trait implementations
// =====================

impl TryFrom<PauliOperatorRepr> for PauliOperator {
    type Error = PauliError;

    fn try_from(repr: PauliOperatorRepr) -> Result<Self, Self::Error> {
        Self::from_terms(
            repr.num_qubits,
            repr.terms
                .into_iter()
                .map(|term| (term.pauli, term.coefficient)),
        )
    }
}

impl From<PauliOperator> for PauliOperatorRepr {
    fn from(op: PauliOperator) -> Self {
        Self {
            num_qubits: op.num_qubits,
            terms: op.terms(),
        }
    }
}

/// Formats a coefficient as `(re±imj)`. Both parts are written with the shortest
/// representation that parses back to the same value.
pub(crate) fn format_coefficient(coefficient: &C128) -> String {
    format!("({}{:+}j)", coefficient.re, coefficient.im)
}

impl fmt::Display for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pauli, coefficient) in self.iter() {
            writeln!(f, "{pauli}\t{}", format_coefficient(coefficient))?;
        }
        Ok(())
    }
}

impl fmt::Debug for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PauliOperator on {} qubit(s) with {} term(s):",
            self.num_qubits,
            self.len()
        )?;
        write!(f, "{self}")
    }
}
