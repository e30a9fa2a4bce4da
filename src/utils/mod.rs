// Shared helpers for stream access and text decoding

pub mod encoding;
pub mod io;

pub use io::{ByteSource, StreamReader};
