//! Reading and writing QTaper files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, format_err, Context};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;
pub mod pauli_text;


/// An enumerated type for QTaper file types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QTaperFileType {
    /// Variant for binary files containing symmetry-detection results.
    Sym,

    /// Variant for binary files containing tapering parameters (symmetries, sector, and tapered
    /// operator).
    Tpr,

    /// Variant for binary files containing sector-search results.
    Sec,
}

impl QTaperFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            QTaperFileType::Sym => "qtaper.sym".to_string(),
            QTaperFileType::Tpr => "qtaper.tpr".to_string(),
            QTaperFileType::Sec => "qtaper.sec".to_string(),
        }
    }
}

/// Reads a QTaper binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without QTaper-specific extensions).
/// * `file_type` - The type of the QTaper file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_qtaper_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: QTaperFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(
        File::open(&path).with_context(|| format!("Unable to open `{}`.", path.display()))?,
    );
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a QTaper binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without QTaper-specific extensions).
/// * `file_type` - The type of the QTaper file to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_qtaper_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: QTaperFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("Unable to create `{}`.", path.display()))?,
    );
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a QTaper YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_qtaper_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let path = name.as_ref();
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("Unable to open `{}`.", path.display()))?,
    );
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a QTaper YAML file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_qtaper_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension("yml");
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))
}
