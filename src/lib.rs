//! # QTaper: Qubit Tapering of Pauli Hamiltonians
//!
//! QTaper is a program for reducing the number of qubits needed to represent a qubit
//! Hamiltonian by exploiting its $`\mathbb{Z}_2`$ symmetries, written in Rust with the following
//! capabilities:
//! - detection of a maximal set of independent, mutually commuting Pauli strings that commute
//!   with every term of a Hamiltonian,
//! - construction of the single-qubit Pauli operators and Clifford operators that map each
//!   symmetry onto a single qubit,
//! - tapering of the Hamiltonian into any symmetry sector, removing one qubit per symmetry,
//! - identification of the sector containing the ground state by exact diagonalisation of all
//!   tapered Hamiltonians, in parallel, and
//! - the two-qubit reduction of parity-mapped fermionic Hamiltonians.
//!
//! The method follows Bravyi, S., Gambetta, J. M., Mezzacapo, A. & Temme, K., *Tapering off
//! qubits to simulate fermionic Hamiltonians*, arXiv:1701.08213 (2017).
//!
//! ## Conventions
//!
//! Pauli labels are written with the highest-indexed qubit first, so that the rightmost
//! character of `"XIZ"` acts on qubit $`0`$. Symmetry sectors are sequences of $`\pm 1`$, one
//! per symmetry generator, enumerated so that the last generator's sign varies fastest.
//!
//! ## Running QTaper
//!
//! The `qtaper` binary reads a YAML input file:
//!
//! ```bash
//! qtaper --config input.yml --output output.out
//! ```
//!
//! A template input file with all default values can be generated with
//! `qtaper --template template`.

pub mod drivers;
pub mod eigensolver;
pub mod gf2;
pub mod hamiltonian;
pub mod interfaces;
pub mod io;
pub mod pauli;
pub mod tapering;
