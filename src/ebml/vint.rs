// EBML variable-length integers
//
// The width of a VINT is announced by its first byte: the number of leading
// zero bits plus one.
//
//   1xxxxxxx                    1 byte
//   01xxxxxx xxxxxxxx           2 bytes
//   001xxxxx xxxxxxxx xxxxxxxx  3 bytes
//   ...
//   00000001 (7 more bytes)     8 bytes
//
// Element IDs keep the marker bit as part of their value, element sizes
// clear it. Reference: RFC 8794, section 4.

use crate::error::{EbmlError, Result};
use crate::utils::io::ByteSource;

/// Longest VINT EBML allows.
pub const MAX_VINT_WIDTH: usize = 8;

/// How the marker bit of the first byte is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VintKind {
    /// Element ID: marker bit stays part of the value.
    Id,
    /// Element size: marker bit is cleared.
    Size,
}

/// Width in bytes announced by a marker byte, `None` for 0x00.
pub fn vint_width(marker: u8) -> Option<usize> {
    match marker.leading_zeros() as usize {
        8 => None,
        zeros => Some(zeros + 1),
    }
}

/// Read one VINT from the current position.
///
/// The marker byte is peeked first so that the whole integer is consumed
/// with a single read once its width is known. The full 64-bit value is
/// kept; no 48-bit clamping happens here.
pub fn read_vint<S: ByteSource + ?Sized>(source: &mut S, kind: VintKind) -> Result<u64> {
    let offset = source.position();
    let marker = source.peek_u8()?.ok_or_else(|| {
        EbmlError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("end of stream at offset {} while reading a VINT", offset),
        ))
    })?;

    let width = vint_width(marker).ok_or(EbmlError::MalformedVint { offset })?;

    let mut buffer = [0u8; MAX_VINT_WIDTH];
    source.read_exact(&mut buffer[..width])?;

    if kind == VintKind::Size {
        buffer[0] ^= 0x80 >> (width - 1);
    }

    Ok(buffer[..width]
        .iter()
        .fold(0u64, |value, &byte| (value << 8) | byte as u64))
}

/// Read an element ID (marker bit kept).
pub fn read_element_id<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64> {
    read_vint(source, VintKind::Id)
}

/// Read an element size (marker bit cleared).
pub fn read_element_size<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64> {
    read_vint(source, VintKind::Size)
}
