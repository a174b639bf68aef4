//! Symmetry sectors, *i.e.* joint eigenvalue assignments of the symmetry generators.

use std::convert::TryFrom;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::tapering::Z2SymmetryError;

#[cfg(test)]
#[path = "sector_tests.rs"]
mod sector_tests;

/// Structure representing a choice of eigenvalue $`\pm 1`$ for each of $`k`$ symmetry
/// generators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Sector(Vec<i8>);

impl Sector {
    /// Constructs a sector from a sign sequence.
    ///
    /// # Errors
    ///
    /// Errors if any value is not $`\pm 1`$.
    pub fn new(signs: Vec<i8>) -> Result<Self, Z2SymmetryError> {
        if let Some(bad) = signs.iter().find(|&&s| s != 1 && s != -1) {
            return Err(Z2SymmetryError::InvalidSector(format!(
                "{bad} in {signs:?} is not ±1"
            )));
        }
        Ok(Self(signs))
    }

    /// The sector in which every generator has eigenvalue $`+1`$.
    pub fn all_positive(k: usize) -> Self {
        Self(vec![1; k])
    }

    /// Enumerates all $`2^k`$ sectors for $`k`$ generators.
    ///
    /// The sector at index $`i`$ has sign $`-1`$ at position $`j`$ exactly when bit $`k - 1 - j`$
    /// of $`i`$ is set, so for $`k = 2`$ the order is `[1, 1]`, `[1, -1]`, `[-1, 1]`, `[-1, -1]`.
    /// For $`k = 0`$ a single empty sector is produced.
    ///
    /// # Panics
    ///
    /// Panics if $`k`$ is too large for $`2^k`$ to fit in a [`usize`].
    pub fn enumerate(k: usize) -> impl Iterator<Item = Sector> + Clone {
        assert!(
            k < usize::BITS as usize,
            "Cannot enumerate 2^{k} symmetry sectors."
        );
        (0..(1usize << k)).map(move |index| Self::from_index(k, index))
    }

    /// Returns the sector at position `index` of [`Self::enumerate`] for $`k`$ generators.
    pub fn from_index(k: usize, index: usize) -> Self {
        Self(
            (0..k)
                .map(|j| if (index >> (k - 1 - j)) & 1 == 1 { -1 } else { 1 })
                .collect(),
        )
    }

    /// Returns the position of this sector in [`Self::enumerate`].
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0usize, |acc, &s| (acc << 1) | usize::from(s == -1))
    }

    /// The number of generators.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if this is the sector of an empty symmetry group.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The signs of this sector.
    pub fn signs(&self) -> &[i8] {
        &self.0
    }

    /// The sign for generator `j` as a floating-point factor.
    pub fn sign(&self, j: usize) -> f64 {
        f64::from(self.0[j])
    }
}

impl TryFrom<Vec<i8>> for Sector {
    type Error = Z2SymmetryError;

    fn try_from(signs: Vec<i8>) -> Result<Self, Self::Error> {
        Self::new(signs)
    }
}

impl From<Sector> for Vec<i8> {
    fn from(sector: Sector) -> Self {
        sector.0
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(|s| format!("{s:+}")).join(", "))
    }
}
