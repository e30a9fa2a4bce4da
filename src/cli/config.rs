// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};

/// mkvmeta - Matroska/WebM audio metadata CLI tool
#[derive(Parser, Debug)]
#[command(name = "mkvmeta")]
#[command(about = "Read audio metadata from Matroska and WebM files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log skipped elements and parse summaries)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from audio file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Common fields to display (comma-separated, e.g. "title,artist")
        #[arg(long)]
        fields: Option<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Detect file format
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },

    /// Read metadata from every matching file under a directory
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.mka", "*.webm")
        #[arg(short, long)]
        pattern: String,
    },
}

impl Config {
    /// Default tracing filter for the selected verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "mkvmeta=debug"
        } else {
            "mkvmeta=warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_command() {
        let config =
            Config::try_parse_from(["mkvmeta", "--format", "key-value", "read", "a.mka", "b.webm"])
                .unwrap();
        assert_eq!(config.format, OutputFormat::KeyValue);
        match config.command {
            Commands::Read { files, fields, output } => {
                assert_eq!(files, vec!["a.mka", "b.webm"]);
                assert!(fields.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_filter() {
        let config = Config::try_parse_from(["mkvmeta", "detect", "x.mkv", "-v"]).unwrap();
        assert_eq!(config.log_filter(), "mkvmeta=debug");

        let config = Config::try_parse_from(["mkvmeta", "-q", "detect"]).unwrap();
        assert_eq!(config.log_filter(), "error");

        assert!(Config::try_parse_from(["mkvmeta", "-q", "-v", "detect"]).is_err());
    }

    #[test]
    fn test_batch_requires_directory_and_pattern() {
        assert!(Config::try_parse_from(["mkvmeta", "batch", "-d", "music"]).is_err());
        let config =
            Config::try_parse_from(["mkvmeta", "batch", "-d", "music", "-p", "*.mka"]).unwrap();
        assert!(matches!(config.command, Commands::Batch { .. }));
    }
}
