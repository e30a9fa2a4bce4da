// EBML element header

use crate::error::Result;
use crate::utils::io::ByteSource;

use super::vint::{read_element_id, read_element_size};

/// `(id, length)` pair that introduces every EBML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHeader {
    /// Element ID, marker bits included.
    pub id: u64,
    /// Byte count of the element body.
    pub length: u64,
}

impl ElementHeader {
    /// Read an ID-style VINT followed by a size-style VINT.
    ///
    /// Bounds are not checked here; the caller compares `length` against the
    /// end of the enclosing container.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<Self> {
        let id = read_element_id(source)?;
        let length = read_element_size(source)?;
        Ok(ElementHeader { id, length })
    }
}
