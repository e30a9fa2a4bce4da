// CLI module for mkvmeta
//
// Command-line front end over the library. Only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::run;
pub use config::Config;

use mkvmeta::MetadataError;

// Error type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    FileNotFound(String),
    UnsupportedFile(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Metadata(MetadataError),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {}", path),
            CliError::UnsupportedFile(path) => write!(f, "Not a Matroska or WebM file: {}", path),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Metadata(e) => write!(f, "{}", e),
            CliError::Usage(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Metadata(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<MetadataError> for CliError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::UnsupportedFormat(path) => CliError::UnsupportedFile(path),
            other => CliError::Metadata(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_cli_error() {
        let err: CliError = MetadataError::UnsupportedFormat("a.txt".to_string()).into();
        assert_eq!(err.to_string(), "Not a Matroska or WebM file: a.txt");

        let err: CliError = MetadataError::Extract(mkvmeta::ExtractError::MissingEbmlHeader).into();
        assert_eq!(err.to_string(), "Extraction error: Missing EBML header");
    }
}
