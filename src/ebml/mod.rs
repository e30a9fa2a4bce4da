// EBML (Extensible Binary Meta Language) decoding
//
// EBML is the binary tagged-tree format under Matroska and WebM. Every
// element is an (id, length, body) triple; IDs and lengths are
// variable-length integers and bodies are either nested elements or a
// typed leaf value. Decoding here is driven by a static schema and yields
// a generic tree that format-specific code interprets afterwards.
//
// Reference:
// - RFC 8794: Extensible Binary Meta Language

pub mod header;
pub mod parser;
pub mod schema;
pub mod value;
pub mod vint;

pub use header::ElementHeader;
pub use parser::{parse_document, EbmlParser, Element, ParseReport, ParsedNode, SkippedElement, VOID_ID};
pub use schema::{NodeKind, SchemaNode, SchemaTree, ValueType};
pub use value::Value;

/// Magic ID of the EBML header element, first four bytes of every file.
pub const EBML_SIGNATURE: &[u8; 4] = &[0x1A, 0x45, 0xDF, 0xA3];
