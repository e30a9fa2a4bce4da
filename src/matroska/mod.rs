// Matroska / WebM metadata
//
// Parsing is two passes over the same data: the generic EBML parser builds
// a tree against the Matroska schema, then the extractor walks that tree
// and reports stream properties and tags to a metadata sink.
//
// Reference:
// - https://www.matroska.org/technical/elements.html
// - https://www.matroska.org/technical/tagging.html

pub mod document;
pub mod dtd;
pub mod extract;

pub use document::{MatroskaDocument, TargetType, TrackType};
pub use dtd::MATROSKA;
pub use extract::extract;

use crate::ebml::{parse_document, ParseReport};
use crate::error::MetadataError;
use crate::metadata::MetadataSink;
use crate::utils::io::ByteSource;

/// File extensions of Matroska and WebM files.
pub const EXTENSIONS: &[&str] = &["mkv", "mka", "mk3d", "webm"];

/// Parse a whole Matroska document from `source` and report its metadata.
///
/// Nothing reaches `sink` unless both parsing and extraction succeed. The
/// returned report carries the parse diagnostics.
pub fn parse<S, M>(source: &mut S, sink: &mut M) -> Result<ParseReport, MetadataError>
where
    S: ByteSource + ?Sized,
    M: MetadataSink + ?Sized,
{
    let report = parse_document(source, MATROSKA)?;
    extract(&report.root, sink)?;
    Ok(report)
}
