// Schema-directed recursive descent over an EBML stream

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{EbmlError, Result};
use crate::utils::io::ByteSource;

use super::header::ElementHeader;
use super::schema::{NodeKind, SchemaNode, SchemaTree};
use super::value::{read_value, Value};

/// Reserved ID of the Void (padding) element.
pub const VOID_ID: u64 = 0xEC;

/// Parsed content of one schema entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Value(Value),
    Node(ParsedNode),
    /// Occurrences of a repeatable entry, in document order.
    Sequence(Vec<Element>),
}

/// Fields decoded from one container span, keyed by schema name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedNode {
    fields: HashMap<&'static str, Element>,
}

impl ParsedNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Element)> {
        self.fields.iter().map(|(name, element)| (*name, element))
    }

    /// Store `element` under the entry's name, overwriting a singular field
    /// or appending to a repeatable one.
    pub fn insert(&mut self, node: &SchemaNode, element: Element) {
        if !node.repeatable {
            self.fields.insert(node.name, element);
            return;
        }

        match self.fields.get_mut(node.name) {
            Some(Element::Sequence(items)) => items.push(element),
            _ => {
                self.fields.insert(node.name, Element::Sequence(vec![element]));
            }
        }
    }

    /// Nested container stored under `name`, first occurrence if repeated.
    pub fn node(&self, name: &str) -> Option<&ParsedNode> {
        self.nodes(name).next()
    }

    /// All nested containers stored under `name`, singular or repeated.
    pub fn nodes<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ParsedNode> + 'a {
        let items: &'a [Element] = match self.fields.get(name) {
            Some(Element::Sequence(items)) => items,
            Some(element) => std::slice::from_ref(element),
            None => &[],
        };
        items.iter().filter_map(|element| match element {
            Element::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Leaf value stored under `name`, first occurrence if repeated.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name)? {
            Element::Value(value) => Some(value),
            Element::Sequence(items) => items.iter().find_map(|element| match element {
                Element::Value(value) => Some(value),
                _ => None,
            }),
            Element::Node(_) => None,
        }
    }

    pub fn unsigned(&self, name: &str) -> Option<u64> {
        self.value(name)?.as_unsigned()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.value(name)?.as_str()
    }

    pub fn binary(&self, name: &str) -> Option<&[u8]> {
        self.value(name)?.as_bytes()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name)?.as_float()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.value(name)?.as_bool()
    }
}

/// Element the parser stepped over without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedElement {
    pub id: u64,
    /// Offset of the element header.
    pub offset: u64,
    pub length: u64,
    /// Dotted schema path of the enclosing container, empty at the root.
    pub path: String,
}

impl SkippedElement {
    pub fn is_void(&self) -> bool {
        self.id == VOID_ID
    }
}

/// Outcome of parsing a whole document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub root: ParsedNode,
    /// Body bytes of all skipped elements, Void included.
    pub padding: u64,
    /// Unknown (non-Void) elements, in document order.
    pub skipped: Vec<SkippedElement>,
}

/// Recursive descent driver. Owns the cursor for the duration of a parse.
pub struct EbmlParser<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    padding: u64,
    skipped: Vec<SkippedElement>,
}

impl<'a, S: ByteSource + ?Sized> EbmlParser<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        EbmlParser {
            source,
            padding: 0,
            skipped: Vec::new(),
        }
    }

    /// Parse elements until the cursor reaches `end`.
    ///
    /// Stops exactly at `end`; an element whose body would cross it is an
    /// [`EbmlError::ElementOverrun`].
    ///
    /// Unknown-size elements (all size bits set, as in live streams) are not
    /// supported: their size is taken literally and they surface as
    /// [`EbmlError::ElementOverrun`].
    pub fn parse_container(
        &mut self,
        schema: SchemaTree,
        end: u64,
        path: &mut Vec<&'static str>,
    ) -> Result<ParsedNode> {
        self.parse_span(schema, Some(end), path)
    }

    /// With no `end`, reads until the stream runs out on an element boundary
    /// and each element is bounded only by its own length.
    fn parse_span(
        &mut self,
        schema: SchemaTree,
        end: Option<u64>,
        path: &mut Vec<&'static str>,
    ) -> Result<ParsedNode> {
        let mut node = ParsedNode::new();

        loop {
            match end {
                Some(end) if self.source.position() >= end => break,
                None if self.source.peek_u8()?.is_none() => break,
                _ => {}
            }

            let offset = self.source.position();
            let header = ElementHeader::read(&mut *self.source)?;
            let element_end = self
                .source
                .position()
                .checked_add(header.length)
                .unwrap_or(u64::MAX);

            if let Some(end) = end {
                if element_end > end {
                    return Err(EbmlError::ElementOverrun {
                        id: header.id,
                        offset,
                        element_end,
                        container_end: end,
                    });
                }
            }

            match schema.lookup(header.id) {
                Some(entry) => {
                    let element = match entry.kind {
                        NodeKind::Container(children) => {
                            path.push(entry.name);
                            let child = self.parse_span(children, Some(element_end), path);
                            path.pop();
                            Element::Node(child?)
                        }
                        NodeKind::Leaf(value_type) => {
                            Element::Value(read_value(&mut *self.source, &header, value_type)?)
                        }
                    };
                    node.insert(entry, element);
                }
                None => self.skip_element(&header, offset, path)?,
            }
        }

        Ok(node)
    }

    fn skip_element(
        &mut self,
        header: &ElementHeader,
        offset: u64,
        path: &[&'static str],
    ) -> Result<()> {
        let skipped = SkippedElement {
            id: header.id,
            offset,
            length: header.length,
            path: path.join("."),
        };

        if skipped.is_void() {
            trace!(offset, length = header.length, path = %skipped.path, "Void element");
        } else {
            debug!(
                id = %format!("0x{:X}", header.id),
                offset,
                length = header.length,
                path = %skipped.path,
                "Skipping unknown element"
            );
            self.skipped.push(skipped);
        }

        self.padding += header.length;
        self.source.skip(header.length)?;
        Ok(())
    }

    /// Hand back the padding total and skip list collected so far.
    pub fn finish(self, root: ParsedNode) -> ParseReport {
        ParseReport {
            root,
            padding: self.padding,
            skipped: self.skipped,
        }
    }
}

/// Parse a whole stream against `schema`.
///
/// The end offset is the stream length when the source knows it. Otherwise
/// elements are read until the stream ends on an element boundary.
pub fn parse_document<S: ByteSource + ?Sized>(
    source: &mut S,
    schema: SchemaTree,
) -> Result<ParseReport> {
    let end = source.len();
    let mut parser = EbmlParser::new(source);
    let root = parser.parse_span(schema, end, &mut Vec::new())?;
    let report = parser.finish(root);

    debug!(
        fields = report.root.len(),
        padding = report.padding,
        skipped = report.skipped.len(),
        "Parsed EBML document"
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) mod test_util {
    /// Encode `length` as a size VINT of minimal width.
    pub fn encode_size(length: u64) -> Vec<u8> {
        let mut width = 1;
        while width < 8 && length >= (1u64 << (7 * width)) - 1 {
            width += 1;
        }
        let mut bytes = length.to_be_bytes()[8 - width..].to_vec();
        bytes[0] |= 0x80 >> (width - 1);
        bytes
    }

    /// Encode an element ID given in its marker-bearing form.
    pub fn encode_id(id: u64) -> Vec<u8> {
        let bytes = id.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
        bytes[start..].to_vec()
    }

    /// One complete element: header followed by `body`.
    pub fn element(id: u64, body: &[u8]) -> Vec<u8> {
        let mut out = encode_id(id);
        out.extend(encode_size(body.len() as u64));
        out.extend_from_slice(body);
        out
    }

    /// Container element whose body is the concatenation of `children`.
    pub fn container(id: u64, children: &[Vec<u8>]) -> Vec<u8> {
        element(id, &children.concat())
    }

    pub fn uint(id: u64, value: u64) -> Vec<u8> {
        let bytes = value.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(8);
        element(id, &bytes[start..])
    }

    pub fn string(id: u64, value: &str) -> Vec<u8> {
        element(id, value.as_bytes())
    }

    pub fn float(id: u64, value: f64) -> Vec<u8> {
        element(id, &value.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::ebml::schema::ValueType;
    use crate::utils::io::StreamReader;
    use std::io::Cursor;

    const ITEM: &[SchemaNode] = &[
        SchemaNode::leaf(0x81, "number", ValueType::UnsignedInt),
        SchemaNode::leaf(0x82, "label", ValueType::String),
    ];

    const ROOT_NODES: &[SchemaNode] = &[
        SchemaNode::leaf(0x4282, "docType", ValueType::String),
        SchemaNode::container(0xA0, "item", ITEM).repeated(),
        SchemaNode::container(0xA1, "single", ITEM),
        SchemaNode::leaf(0x83, "tag", ValueType::String).repeated(),
        SchemaNode::leaf(0x84, "gain", ValueType::Float),
    ];

    const ROOT: SchemaTree = SchemaTree::new(ROOT_NODES);

    fn reader(bytes: Vec<u8>) -> StreamReader<Cursor<Vec<u8>>> {
        StreamReader::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_consumes_exact_span() {
        let body = [
            string(0x4282, "webm"),
            uint(0x81, 7), // only mapped inside containers
            float(0x84, 1.5),
        ]
        .concat();
        let total = body.len() as u64;
        let mut bytes = body;
        bytes.extend_from_slice(&[0xFF, 0xFF]); // trailing bytes outside the span

        let mut src = reader(bytes);
        let mut parser = EbmlParser::new(&mut src);
        let node = parser.parse_container(ROOT, total, &mut Vec::new()).unwrap();

        assert_eq!(src.position(), total);
        assert_eq!(node.len(), 2);
        assert_eq!(node.string("docType"), Some("webm"));
        assert_eq!(node.float("gain"), Some(1.5));
    }

    #[test]
    fn test_repeated_containers_keep_document_order() {
        let bytes = [
            container(0xA0, &[uint(0x81, 1), string(0x82, "one")]),
            container(0xA0, &[uint(0x81, 2)]),
            container(0xA0, &[uint(0x81, 3), string(0x82, "three")]),
        ]
        .concat();

        let report = parse_document(&mut reader(bytes), ROOT).unwrap();
        let numbers: Vec<u64> = report
            .root
            .nodes("item")
            .map(|item| item.unsigned("number").unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(report.root.len(), 1);
    }

    #[test]
    fn test_singular_field_is_overwritten() {
        let bytes = [
            container(0xA1, &[uint(0x81, 1)]),
            container(0xA1, &[uint(0x81, 2)]),
        ]
        .concat();

        let report = parse_document(&mut reader(bytes), ROOT).unwrap();
        assert_eq!(report.root.nodes("single").count(), 1);
        assert_eq!(report.root.node("single").unwrap().unsigned("number"), Some(2));
    }

    #[test]
    fn test_repeated_leaves_collect() {
        let bytes = [string(0x83, "a"), string(0x83, "b")].concat();

        let report = parse_document(&mut reader(bytes), ROOT).unwrap();
        match report.root.get("tag") {
            Some(Element::Sequence(items)) => {
                let tags: Vec<&str> = items
                    .iter()
                    .filter_map(|e| match e {
                        Element::Value(v) => v.as_str(),
                        _ => None,
                    })
                    .collect();
                assert_eq!(tags, vec!["a", "b"]);
            }
            other => panic!("unexpected element: {:?}", other),
        }
        assert_eq!(report.root.string("tag"), Some("a"));
    }

    #[test]
    fn test_void_and_unknown_are_skipped() {
        let bytes = [
            element(VOID_ID, &[0; 5]),
            container(0xA0, &[element(0x85, &[1, 2, 3]), uint(0x81, 9)]),
            string(0x4282, "matroska"),
        ]
        .concat();

        let report = parse_document(&mut reader(bytes), ROOT).unwrap();
        assert_eq!(report.padding, 8);
        assert_eq!(report.skipped.len(), 1);

        let unknown = &report.skipped[0];
        assert_eq!(unknown.id, 0x85);
        assert_eq!(unknown.length, 3);
        assert_eq!(unknown.path, "item");
        assert_eq!(unknown.offset, 7 + 2);

        assert_eq!(report.root.node("item").unwrap().unsigned("number"), Some(9));
        assert_eq!(report.root.string("docType"), Some("matroska"));
    }

    #[test]
    fn test_child_overrunning_container_is_error() {
        // Container declares 3 body bytes; its child claims 4
        let bytes = vec![0xA0, 0x83, 0x81, 0x84, 0x00, 0x00, 0x00, 0x00];

        let err = parse_document(&mut reader(bytes), ROOT).unwrap_err();
        match err {
            EbmlError::ElementOverrun { id, element_end, container_end, .. } => {
                assert_eq!(id, 0x81);
                assert_eq!(element_end, 8);
                assert_eq!(container_end, 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_overrun_of_stream() {
        let mut bytes = string(0x4282, "webm");
        bytes.truncate(bytes.len() - 1);

        let err = parse_document(&mut reader(bytes), ROOT).unwrap_err();
        assert!(matches!(err, EbmlError::ElementOverrun { id: 0x4282, .. }));
    }

    #[test]
    fn test_unknown_size_element_is_overrun() {
        let mut bytes = encode_id(0xA0);
        bytes.extend([0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        bytes.extend(uint(0x81, 1));

        let err = parse_document(&mut reader(bytes), ROOT).unwrap_err();
        assert!(matches!(err, EbmlError::ElementOverrun { id: 0xA0, offset: 0, .. }));
    }

    #[test]
    fn test_decode_error_propagates() {
        let bytes = element(0x84, &[0, 0, 0]);
        let err = parse_document(&mut reader(bytes), ROOT).unwrap_err();
        assert!(matches!(err, EbmlError::InvalidFloatLength { length: 3 }));
    }

    #[test]
    fn test_builder_roundtrips_through_vint_reader() {
        assert_eq!(encode_size(0), vec![0x80]);
        assert_eq!(encode_size(126), vec![0xFE]);
        assert_eq!(encode_size(127), vec![0x40, 0x7F]);
        assert_eq!(encode_id(0x1A45DFA3), vec![0x1A, 0x45, 0xDF, 0xA3]);
    }
}
