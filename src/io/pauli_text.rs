//! Plain-text format for qubit operators.
//!
//! Each non-empty line that is not a comment holds one term: a Pauli label (highest-indexed
//! qubit first) followed by whitespace and a coefficient. Coefficients are either real numbers
//! or complex numbers written as `a+bj`, optionally parenthesised, *e.g.* `(0.5-0.25j)`. Lines
//! starting with `#` are comments, except for an optional `# num_qubits: N` header which fixes
//! the number of qubits of an operator that has no terms. Repeated labels are merged. A line
//! holding only a coefficient is a term of a zero-qubit operator.
//!
//! The output of [`PauliOperator`]'s `Display` implementation is valid input for this format.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{self, bail, ensure, format_err, Context};
use lazy_static::lazy_static;
use regex::Regex;

use crate::pauli::{PauliOperator, PauliString, C128};

#[cfg(test)]
#[path = "pauli_text_tests.rs"]
mod pauli_text_tests;

lazy_static! {
    static ref TERM_PATTERN: Regex =
        Regex::new(r"^(?:(?P<label>[IXYZ]+)\s+)?(?P<coeff>\S+)$").unwrap();
    static ref HEADER_PATTERN: Regex =
        Regex::new(r"^#\s*num_qubits\s*:\s*(?P<n>\d+)\s*$").unwrap();
    static ref COMPLEX_PATTERN: Regex = Regex::new(
        r"^(?P<re>[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)(?P<sign>[+-])(?P<im>(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)?[jJ]$"
    )
    .unwrap();
}

/// Parses a coefficient written as a real number, a pure imaginary number `bj`, or a complex
/// number `a+bj`, optionally in parentheses.
pub fn parse_coefficient(token: &str) -> Result<C128, anyhow::Error> {
    let trimmed = token.trim();
    let body = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim();
    if let Ok(re) = body.parse::<f64>() {
        return Ok(C128::new(re, 0.0));
    }
    if let Some(imag) = body.strip_suffix(['j', 'J']) {
        if let Ok(im) = imag.parse::<f64>() {
            return Ok(C128::new(0.0, im));
        }
    }
    let caps = COMPLEX_PATTERN
        .captures(body)
        .ok_or_else(|| format_err!("`{token}` is not a valid coefficient."))?;
    let re = caps["re"].parse::<f64>()?;
    let im_abs = caps
        .name("im")
        .map(|m| m.as_str().parse::<f64>())
        .transpose()?
        .unwrap_or(1.0);
    let im = if &caps["sign"] == "-" { -im_abs } else { im_abs };
    Ok(C128::new(re, im))
}

/// Parses an operator from the plain-text format.
///
/// # Errors
///
/// Errors if a line cannot be parsed, if the labels have different lengths or disagree with the
/// `num_qubits` header, or if there are neither terms nor a header.
pub fn parse_pauli_text(text: &str) -> Result<PauliOperator, anyhow::Error> {
    let mut declared_num_qubits = None;
    let mut terms = vec![];
    for (i, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if let Some(caps) = HEADER_PATTERN.captures(line) {
                declared_num_qubits = Some(caps["n"].parse::<usize>()?);
            }
            continue;
        }
        let caps = TERM_PATTERN
            .captures(line)
            .ok_or_else(|| format_err!("Line {}: `{line}` is not a valid term.", i + 1))?;
        let label = caps.name("label").map_or("", |m| m.as_str());
        let pauli = PauliString::from_label(label)
            .with_context(|| format!("Line {}: invalid Pauli label.", i + 1))?;
        let coefficient = parse_coefficient(&caps["coeff"])
            .with_context(|| format!("Line {}: invalid coefficient.", i + 1))?;
        terms.push((pauli, coefficient));
    }

    let num_qubits = match (declared_num_qubits, terms.first()) {
        (Some(n), Some((pauli, _))) => {
            ensure!(
                pauli.num_qubits() == n,
                "The header declares {n} qubit(s) but the terms act on {}.",
                pauli.num_qubits()
            );
            n
        }
        (Some(n), None) => n,
        (None, Some((pauli, _))) => pauli.num_qubits(),
        (None, None) => bail!("The operator has no terms and no `# num_qubits` header."),
    };
    PauliOperator::from_terms(num_qubits, terms).map_err(|err| format_err!(err))
}

/// Reads an operator from a plain-text file.
///
/// # Errors
///
/// Errors if the file cannot be read or parsed.
pub fn read_pauli_text<P: AsRef<Path>>(path: P) -> Result<PauliOperator, anyhow::Error> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("Unable to read `{}`.", path.display()))?;
    parse_pauli_text(&text).with_context(|| format!("Unable to parse `{}`.", path.display()))
}

/// Writes an operator to a plain-text file, preceded by a `num_qubits` header.
///
/// # Errors
///
/// Errors if the file cannot be written.
pub fn write_pauli_text<P: AsRef<Path>>(
    path: P,
    operator: &PauliOperator,
) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    let mut file =
        fs::File::create(path).with_context(|| format!("Unable to create `{}`.", path.display()))?;
    writeln!(file, "# num_qubits: {}", operator.num_qubits())?;
    write!(file, "{operator}")?;
    Ok(())
}
