//! Pauli strings in the symplectic bit-vector representation.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::pauli::commutation;
use crate::pauli::{PauliError, C128};

#[cfg(test)]
#[path = "pauli_string_tests.rs"]
mod pauli_string_tests;

/// Packed bit-vector type used for the $`\mathbf{x}`$ and $`\mathbf{z}`$ parts of Pauli strings.
pub type Bits = BitVec<u64, Lsb0>;

// ================
// Enum definitions
// ================

/// Enumerated type for single-qubit Pauli operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PauliKind {
    /// The identity.
    I,

    /// The bit-flip operator.
    X,

    /// The bit-and-phase-flip operator.
    Y,

    /// The phase-flip operator.
    Z,
}

impl PauliKind {
    /// Returns the $`(x, z)`$ bit pair of this single-qubit Pauli operator.
    pub fn xz(&self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (true, false),
            Self::Y => (true, true),
            Self::Z => (false, true),
        }
    }

    /// Constructs a single-qubit Pauli operator from its $`(x, z)`$ bit pair.
    pub fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true, false) => Self::X,
            (true, true) => Self::Y,
            (false, true) => Self::Z,
        }
    }

    /// Returns the character label of this single-qubit Pauli operator.
    pub fn to_char(&self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Parses a single character into a single-qubit Pauli operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }
}

impl fmt::Display for PauliKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// ==================
// Struct definitions
// ==================

/// Structure representing a Hermitian Pauli string $`\bigotimes_q \sigma_q`$ with
/// $`\sigma_q \in \{I, X, Y, Z\}`$.
///
/// Bit $`q`$ of [`Self::x_bits`] and [`Self::z_bits`] describes the factor on qubit $`q`$. When
/// written as a label, the factor on the highest-indexed qubit comes first, so that the label
/// `"ZIIX"` denotes $`Z_3 X_0`$.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    x: Bits,
    z: Bits,
}

impl PauliString {
    /// Constructs a Pauli string from its $`\mathbf{x}`$ and $`\mathbf{z}`$ bit-vectors.
    ///
    /// # Errors
    ///
    /// Errors if the two bit-vectors have different lengths.
    pub fn new(x: Bits, z: Bits) -> Result<Self, PauliError> {
        if x.len() != z.len() {
            return Err(PauliError::DimensionMismatch {
                expected: x.len(),
                found: z.len(),
            });
        }
        Ok(Self { x, z })
    }

    /// Returns the identity string on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            x: bitvec![u64, Lsb0; 0; num_qubits],
            z: bitvec![u64, Lsb0; 0; num_qubits],
        }
    }

    /// Returns the string that is `kind` on `qubit` and the identity elsewhere.
    ///
    /// # Errors
    ///
    /// Errors if `qubit` is out of range.
    pub fn single(num_qubits: usize, qubit: usize, kind: PauliKind) -> Result<Self, PauliError> {
        if qubit >= num_qubits {
            return Err(PauliError::DimensionMismatch {
                expected: num_qubits,
                found: qubit + 1,
            });
        }
        let mut pauli = Self::identity(num_qubits);
        pauli.set(qubit, kind);
        Ok(pauli)
    }

    /// Constructs a Pauli string from single-qubit factors ordered by qubit index, *i.e.* the
    /// first item acts on qubit $`0`$.
    pub fn from_kinds<I: IntoIterator<Item = PauliKind>>(kinds: I) -> Self {
        let (x, z): (Bits, Bits) = kinds.into_iter().map(|kind| kind.xz()).unzip();
        Self { x, z }
    }

    /// Parses a label such as `"ZIXY"` in which the first character acts on the highest-indexed
    /// qubit.
    ///
    /// # Errors
    ///
    /// Errors if the label contains characters other than `I`, `X`, `Y`, `Z`.
    pub fn from_label(label: &str) -> Result<Self, PauliError> {
        let kinds = label
            .trim()
            .chars()
            .rev()
            .map(|c| PauliKind::from_char(c).ok_or_else(|| PauliError::InvalidLabel(label.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_kinds(kinds))
    }

    /// Returns the label of this string, highest-indexed qubit first.
    pub fn label(&self) -> String {
        (0..self.num_qubits())
            .rev()
            .map(|q| self.kind_at(q).to_char())
            .collect()
    }

    /// The number of qubits this string acts on.
    pub fn num_qubits(&self) -> usize {
        self.x.len()
    }

    /// The $`\mathbf{x}`$ bit-vector.
    pub fn x_bits(&self) -> &BitSlice<u64, Lsb0> {
        &self.x
    }

    /// The $`\mathbf{z}`$ bit-vector.
    pub fn z_bits(&self) -> &BitSlice<u64, Lsb0> {
        &self.z
    }

    /// Returns the $`\mathbf{x}`$ and $`\mathbf{z}`$ parts packed into single machine words, or
    /// `None` if the string acts on more than 64 qubits.
    pub fn masks(&self) -> Option<(u64, u64)> {
        if self.num_qubits() > 64 {
            return None;
        }
        let pack = |bits: &BitSlice<u64, Lsb0>| {
            bits.iter_ones().fold(0u64, |acc, q| acc | (1u64 << q))
        };
        Some((pack(&self.x), pack(&self.z)))
    }

    /// Returns the single-qubit factor on `qubit`.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is out of range.
    pub fn kind_at(&self, qubit: usize) -> PauliKind {
        PauliKind::from_xz(self.x[qubit], self.z[qubit])
    }

    fn set(&mut self, qubit: usize, kind: PauliKind) {
        let (x, z) = kind.xz();
        self.x.set(qubit, x);
        self.z.set(qubit, z);
    }

    /// The number of non-identity factors.
    pub fn weight(&self) -> usize {
        let mut support = self.x.clone();
        support |= self.z.as_bitslice();
        support.count_ones()
    }

    /// Returns `true` if every factor is the identity.
    pub fn is_identity(&self) -> bool {
        self.x.not_any() && self.z.not_any()
    }

    /// Returns `true` if this string commutes with `other`.
    ///
    /// # Errors
    ///
    /// Errors if the strings act on different numbers of qubits.
    pub fn commutes_with(&self, other: &Self) -> Result<bool, PauliError> {
        commutation::commutes(self, other)
    }

    /// Computes the product $`P_1 P_2 = \mathrm{i}^{k} P_3`$ of this string ($`P_1`$) with
    /// `other` ($`P_2`$).
    ///
    /// # Returns
    ///
    /// The string $`P_3`$ and the phase exponent $`k \in \{0, 1, 2, 3\}`$.
    ///
    /// # Errors
    ///
    /// Errors if the strings act on different numbers of qubits.
    pub fn compose(&self, other: &Self) -> Result<(Self, u8), PauliError> {
        check_same_length(self, other)?;
        let mut x = self.x.clone();
        x ^= other.x.as_bitslice();
        let mut z = self.z.clone();
        z ^= other.z.as_bitslice();

        // P(x, z) = i^{x·z} X^x Z^z, and Z^{z1} X^{x2} = (-1)^{z1·x2} X^{x2} Z^{z1}.
        let exponent = count_and(&self.x, &self.z)
            + count_and(&other.x, &other.z)
            + 2 * count_and(&self.z, &other.x)
            + 3 * count_and(&x, &z);
        let product = Self { x, z };
        Ok((product, (exponent % 4) as u8))
    }

    /// Returns a copy of this string with the factors on `qubits` removed. The remaining qubits
    /// are relabelled contiguously, preserving their order.
    pub fn delete_qubits(&self, qubits: &[usize]) -> Self {
        let (x, z) = (0..self.num_qubits())
            .filter(|q| !qubits.contains(q))
            .map(|q| (self.x[q], self.z[q]))
            .unzip();
        Self { x, z }
    }
}

/// Converts a phase exponent $`k`$ into the complex number $`\mathrm{i}^k`$.
pub fn phase_factor(exponent: u8) -> C128 {
    match exponent % 4 {
        0 => C128::one(),
        1 => C128::i(),
        2 => -C128::one(),
        _ => -C128::i(),
    }
}

pub(crate) fn check_same_length(a: &PauliString, b: &PauliString) -> Result<(), PauliError> {
    if a.num_qubits() != b.num_qubits() {
        Err(PauliError::DimensionMismatch {
            expected: a.num_qubits(),
            found: b.num_qubits(),
        })
    } else {
        Ok(())
    }
}

pub(crate) fn count_and(a: &BitSlice<u64, Lsb0>, b: &BitSlice<u64, Lsb0>) -> usize {
    let mut both = a.to_bitvec();
    both &= b;
    both.count_ones()
}

// =====================
// Trait implementations
// =====================

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Debug for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PauliString({})", self.label())
    }
}

impl FromStr for PauliString {
    type Err = PauliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for PauliString {
    type Error = PauliError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::from_label(&label)
    }
}

impl From<PauliString> for String {
    fn from(pauli: PauliString) -> Self {
        pauli.label()
    }
}
