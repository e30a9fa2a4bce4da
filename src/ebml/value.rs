// Leaf value decoders

use crate::error::{EbmlError, Result};
use crate::utils::encoding::decode_utf8;
use crate::utils::io::ByteSource;

use super::header::ElementHeader;
use super::schema::ValueType;

/// Decoded leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    String(String),
    Binary(Vec<u8>),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Decode the body of a leaf whose header was just consumed.
///
/// Exactly `header.length` bytes are consumed on success.
pub fn read_value<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &ElementHeader,
    value_type: ValueType,
) -> Result<Value> {
    Ok(match value_type {
        ValueType::UnsignedInt => Value::Unsigned(read_unsigned(source, header.length)?),
        ValueType::String => Value::String(decode_utf8(&source.read_vec(header.length)?)),
        ValueType::Binary => Value::Binary(source.read_vec(header.length)?),
        ValueType::Float => Value::Float(read_float(source, header.length)?),
        // Only an exact 1 counts as true
        ValueType::Flag | ValueType::Uid => Value::Bool(read_unsigned(source, header.length)? == 1),
    })
}

/// Big-endian unsigned integer of `length` bytes; an empty body is 0.
///
/// Bodies wider than 8 bytes keep their low-order 64 bits and the leading
/// bytes are skipped.
pub fn read_unsigned<S: ByteSource + ?Sized>(source: &mut S, length: u64) -> Result<u64> {
    let width = length.min(8);
    source.skip(length - width)?;

    let mut buffer = [0u8; 8];
    let offset = 8 - width as usize;
    source.read_exact(&mut buffer[offset..])?;
    Ok(u64::from_be_bytes(buffer))
}

/// Big-endian IEEE-754 float.
///
/// A 10-byte body is an 80-bit extended float. It is not decoded as such:
/// the first 8 bytes are read as a double and the last 2 are dropped. This
/// is lossy.
pub fn read_float<S: ByteSource + ?Sized>(source: &mut S, length: u64) -> Result<f64> {
    match length {
        0 => Ok(0.0),
        4 => {
            let mut buffer = [0u8; 4];
            source.read_exact(&mut buffer)?;
            Ok(f32::from_be_bytes(buffer) as f64)
        }
        8 | 10 => {
            let mut buffer = [0u8; 8];
            source.read_exact(&mut buffer)?;
            if length == 10 {
                source.skip(2)?;
            }
            Ok(f64::from_be_bytes(buffer))
        }
        _ => Err(EbmlError::InvalidFloatLength { length }),
    }
}
