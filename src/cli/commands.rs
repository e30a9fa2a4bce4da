// CLI command implementations
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use mkvmeta::{AudioFile, Metadata, StandardField};

use crate::cli::config::{Commands, Config};
use crate::cli::output::OutputFormatter;
use crate::cli::{CliError, CliResult};

/// Dispatch the parsed command line
pub fn run(config: &Config) -> CliResult<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match &config.command {
        Commands::Read { files, fields, output } => {
            command_read(files, fields.as_deref(), output.as_deref(), &formatter)
        }
        Commands::Detect { files } => command_detect(files, &formatter),
        Commands::Batch { directory, pattern } => command_batch(directory, pattern, &formatter),
    }
}

/// Parse a comma-separated field list
pub fn parse_fields(spec: &str) -> CliResult<Vec<StandardField>> {
    spec.split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            StandardField::parse(name)
                .ok_or_else(|| CliError::Usage(format!("Unknown field: {}", name.trim())))
        })
        .collect()
}

/// JSON document for one file, optionally narrowed to `fields`
pub fn metadata_value(
    file: &str,
    metadata: &Metadata,
    fields: Option<&[StandardField]>,
) -> CliResult<Value> {
    let mut object = Map::new();
    object.insert("file".to_string(), Value::String(file.to_string()));

    match fields {
        Some(fields) => {
            for field in fields {
                let value = metadata
                    .common
                    .get(*field)
                    .map(|s| Value::String(s.to_string()))
                    .unwrap_or(Value::Null);
                object.insert(field.as_str().to_string(), value);
            }
        }
        None => {
            if let Value::Object(full) = serde_json::to_value(metadata)? {
                object.extend(full);
            }
        }
    }

    Ok(Value::Object(object))
}

fn read_file(file_path: &str) -> CliResult<Metadata> {
    if !Path::new(file_path).exists() {
        return Err(CliError::FileNotFound(file_path.to_string()));
    }
    let audio = AudioFile::new(file_path)?;
    Ok(audio.read_metadata()?)
}

/// Read metadata from files
pub fn command_read(
    files: &[String],
    fields: Option<&str>,
    output: Option<&str>,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::Usage("No files specified".to_string()));
    }

    let fields = fields.map(parse_fields).transpose()?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let mut failures = 0;
    for file_path in files {
        match read_file(file_path) {
            Ok(metadata) => {
                let value = metadata_value(file_path, &metadata, fields.as_deref())?;
                formatter.output_metadata(&value, &mut *writer)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                failures += 1;
            }
        }
    }
    writer.flush()?;

    if let Some(path) = output {
        formatter.print_success(&format!("Wrote metadata to {}", path));
    }

    if failures > 0 {
        return Err(CliError::Usage(format!(
            "{} of {} files could not be read",
            failures,
            files.len()
        )));
    }
    Ok(())
}

/// Detect file format
pub fn command_detect(files: &[String], formatter: &OutputFormatter) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::Usage("No files specified".to_string()));
    }

    for file_path in files {
        if !Path::new(file_path).exists() {
            formatter.print_error(&format!("File not found: {}", file_path));
            continue;
        }

        match AudioFile::new(file_path) {
            Ok(audio) => println!("{}: {}", file_path, audio.file_type),
            Err(e) => formatter.print_error(&format!("{}: Unknown format ({})", file_path, e)),
        }
    }

    Ok(())
}

/// Build the glob for a batch run; bare names match at any depth.
pub fn batch_pattern(directory: &str, pattern: &str) -> String {
    let directory = directory.trim_end_matches('/');
    if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
        format!("{}/{}", directory, pattern)
    } else {
        format!("{}/**/{}", directory, pattern)
    }
}

/// Files under `directory` matching `pattern`, in glob order
pub fn batch_files(
    directory: &str,
    pattern: &str,
    formatter: &OutputFormatter,
) -> CliResult<Vec<PathBuf>> {
    let glob_pattern = batch_pattern(directory, pattern);
    debug!(pattern = %glob_pattern, "Expanding batch pattern");

    let entries = glob::glob(&glob_pattern)
        .map_err(|e| CliError::Usage(format!("Invalid glob pattern: {}", e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }
    Ok(files)
}

/// Batch process directory
pub fn command_batch(directory: &str, pattern: &str, formatter: &OutputFormatter) -> CliResult<()> {
    let files = batch_files(directory, pattern, formatter)?;

    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Processing {} files...", total));

    let mut success_count = 0;
    let mut error_count = 0;

    for path in &files {
        let display = path.display().to_string();
        let result = AudioFile::new(path).and_then(|audio| audio.read_metadata());
        match result {
            Ok(metadata) => {
                let codec = metadata.format.codec.as_deref().unwrap_or("unknown codec");
                formatter.print_success(&format!("{} ({})", display, codec));
                success_count += 1;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", display, e));
                error_count += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        success_count, error_count
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config::OutputFormat;
    use mkvmeta::metadata::{FormatKey, FormatValue, MetadataSink, TagValue, MATROSKA_NAMESPACE};

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields("title, artist,,Year").unwrap();
        assert_eq!(
            fields,
            vec![StandardField::Title, StandardField::Artist, StandardField::Date]
        );
        assert!(matches!(parse_fields("title,bogus"), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_metadata_value_with_fields() {
        let mut metadata = Metadata::new();
        metadata.add_tag(MATROSKA_NAMESPACE, "album:TITLE", TagValue::Text("Record".into()));

        let fields = [StandardField::Album, StandardField::Genre];
        let value = metadata_value("a.mka", &metadata, Some(&fields[..])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "file": "a.mka", "album": "Record", "genre": null })
        );
    }

    #[test]
    fn test_metadata_value_full() {
        let mut metadata = Metadata::new();
        metadata.set_format(FormatKey::Codec, FormatValue::Text("OPUS".into()));

        let value = metadata_value("a.webm", &metadata, None).unwrap();
        assert_eq!(value["file"], "a.webm");
        assert_eq!(value["format"]["codec"], "OPUS");
    }

    #[test]
    fn test_batch_pattern() {
        assert_eq!(batch_pattern("music/", "*.mka"), "music/*.mka");
        assert_eq!(batch_pattern("music", "live.webm"), "music/**/live.webm");
    }

    #[test]
    fn test_batch_files_only_returns_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mka"), b"").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("c.mka")).unwrap();

        let formatter = OutputFormatter::new(OutputFormat::Pretty, true);
        let directory = dir.path().to_str().unwrap();
        let files = batch_files(directory, "*.mka", &formatter).unwrap();

        assert_eq!(files, vec![dir.path().join("a.mka")]);
    }
}
