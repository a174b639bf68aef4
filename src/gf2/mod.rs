//! Dense linear algebra over $`\mathrm{GF}(2)`$.
//!
//! Rows are stored as packed bit-vectors so that row operations are word-wide XORs. All
//! arithmetic is exact.

use std::fmt;

use bitvec::prelude::*;

use crate::pauli::pauli_string::Bits;


/// Structure representing a dense binary matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    ncols: usize,
    rows: Vec<Bits>,
}

impl BinaryMatrix {
    /// Constructs an `nrows` by `ncols` zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            rows: vec![bitvec![u64, Lsb0; 0; ncols]; nrows],
        }
    }

    /// Constructs a matrix from its rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have length `ncols`.
    pub fn from_rows(ncols: usize, rows: Vec<Bits>) -> Self {
        assert!(
            rows.iter().all(|row| row.len() == ncols),
            "All rows of a binary matrix must have {ncols} columns."
        );
        Self { ncols, rows }
    }

    /// The number of rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns row `i`.
    pub fn row(&self, i: usize) -> &BitSlice<u64, Lsb0> {
        &self.rows[i]
    }

    /// Consumes the matrix and returns its rows.
    pub fn into_rows(self) -> Vec<Bits> {
        self.rows
    }

    /// Returns the entry at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.rows[i][j]
    }

    /// Sets the entry at `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.rows[i].set(j, value);
    }

    /// Reduces this matrix in place to reduced row echelon form by Gauss–Jordan elimination.
    /// Columns are scanned from left to right and zero rows are moved to the bottom, so the
    /// result is unique for a given row space.
    ///
    /// # Returns
    ///
    /// The pivot column of each non-zero row, in row order.
    pub fn rref(&mut self) -> Vec<usize> {
        let mut pivots = Vec::with_capacity(self.nrows().min(self.ncols));
        let mut r = 0;
        for col in 0..self.ncols {
            if r == self.nrows() {
                break;
            }
            let Some(pivot_row) = (r..self.nrows()).find(|&i| self.rows[i][col]) else {
                continue;
            };
            self.rows.swap(r, pivot_row);
            let pivot = self.rows[r].clone();
            for (i, row) in self.rows.iter_mut().enumerate() {
                if i != r && row[col] {
                    *row ^= pivot.as_bitslice();
                }
            }
            pivots.push(col);
            r += 1;
        }
        pivots
    }

    /// The rank of this matrix.
    pub fn rank(&self) -> usize {
        self.clone().rref().len()
    }

    /// Computes a basis for the right null space $`\{\mathbf{v} : A\mathbf{v} = \mathbf{0}\}`$.
    ///
    /// One basis vector is produced per non-pivot column of the reduced row echelon form, in
    /// increasing column order. Each basis vector has a one in its own free column and zeros in
    /// every other free column.
    pub fn null_space(&self) -> Vec<Bits> {
        let mut reduced = self.clone();
        let pivots = reduced.rref();
        (0..self.ncols)
            .filter(|col| !pivots.contains(col))
            .map(|free| {
                let mut v = bitvec![u64, Lsb0; 0; self.ncols];
                v.set(free, true);
                for (r, &pivot) in pivots.iter().enumerate() {
                    if reduced.rows[r][free] {
                        v.set(pivot, true);
                    }
                }
                v
            })
            .collect()
    }

    /// Multiplies this matrix by a column vector.
    ///
    /// # Panics
    ///
    /// Panics if the length of `v` is not [`Self::ncols`].
    pub fn mul_vec(&self, v: &BitSlice<u64, Lsb0>) -> Bits {
        assert_eq!(v.len(), self.ncols);
        self.rows
            .iter()
            .map(|row| {
                let mut prod = row.clone();
                prod &= v;
                prod.count_ones() % 2 == 1
            })
            .collect()
    }
}

impl fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BinaryMatrix ({} × {}):", self.nrows(), self.ncols)?;
        for row in self.rows.iter() {
            writeln!(
                f,
                "  {}",
                row.iter()
                    .by_vals()
                    .map(|b| if b { '1' } else { '0' })
                    .collect::<String>()
            )?;
        }
        Ok(())
    }
}
