// Encoding utilities

use encoding_rs::UTF_8;

/// Decode an EBML string payload.
///
/// The declared length is the boundary, not a terminator; writers may still
/// zero-pad a fixed slot, so everything from the first NUL on is dropped.
/// Malformed sequences are replaced rather than rejected.
pub fn decode_utf8(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    UTF_8.decode_without_bom_handling(&data[..end]).0.into_owned()
}
