//! mkvmeta - audio metadata for Matroska and WebM files
//!
//! The core is a schema-driven EBML decoder ([`ebml`]) with the Matroska
//! element table and a semantic pass on top ([`matroska`]). Results are
//! reported through the [`MetadataSink`] trait; [`Metadata`] is the
//! collecting implementation used by [`AudioFile`] and the CLI.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::debug;

pub mod ebml;
pub mod error;
pub mod field_mapping;
pub mod matroska;
pub mod metadata;
pub mod utils;

pub use error::{EbmlError, ExtractError, MetadataError};
pub use field_mapping::StandardField;
pub use metadata::{Metadata, MetadataSink};

use ebml::EBML_SIGNATURE;
use utils::io::StreamReader;

/// Read the metadata of a Matroska stream starting at the reader's
/// current position.
pub fn read_metadata<R: BufRead + Seek>(reader: R) -> Result<Metadata, MetadataError> {
    let mut source = StreamReader::new(reader)?;
    let mut metadata = Metadata::new();
    let report = matroska::parse(&mut source, &mut metadata)?;

    if !report.skipped.is_empty() {
        debug!(skipped = report.skipped.len(), "Unknown elements ignored");
    }
    Ok(metadata)
}

/// Container formats this crate recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Matroska,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Matroska => "matroska",
        }
    }

    /// Detect from the first bytes of the file.
    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(EBML_SIGNATURE) {
            return Some(FileType::Matroska);
        }
        None
    }

    /// Detect from the file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if matroska::EXTENSIONS.contains(&extension.as_str()) {
            return Some(FileType::Matroska);
        }
        None
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio file metadata handler
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub path: PathBuf,
    pub file_type: FileType,
}

impl AudioFile {
    /// Open `path` and detect its format.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let path = path.as_ref().to_path_buf();
        let file_type = Self::detect_file_type(&path)?;
        Ok(AudioFile { path, file_type })
    }

    /// Detect file type, by signature first and extension second
    pub fn detect_file_type(path: &Path) -> Result<FileType, MetadataError> {
        let file = File::open(path)?;
        let mut signature = Vec::with_capacity(EBML_SIGNATURE.len());
        file.take(EBML_SIGNATURE.len() as u64).read_to_end(&mut signature)?;

        FileType::from_signature(&signature)
            .or_else(|| FileType::from_extension(path))
            .ok_or_else(|| MetadataError::UnsupportedFormat(path.display().to_string()))
    }

    /// Read metadata from the audio file
    pub fn read_metadata(&self) -> Result<Metadata, MetadataError> {
        debug!(path = %self.path.display(), file_type = %self.file_type, "Reading metadata");
        match self.file_type {
            FileType::Matroska => read_metadata(BufReader::new(File::open(&self.path)?)),
        }
    }
}
