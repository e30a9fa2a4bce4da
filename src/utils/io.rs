// I/O utilities for reading container streams

use std::io::{self, BufRead, Read, Seek, SeekFrom};

/// Sequential byte source consumed by the EBML decoder.
///
/// The cursor only moves forward. Every multi-byte numeric read done on top
/// of this trait is big-endian.
pub trait ByteSource {
    /// Look at the next byte without consuming it. `None` at end of stream.
    fn peek_u8(&mut self) -> io::Result<Option<u8>>;

    /// Consume exactly `buf.len()` bytes.
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// Consume `count` bytes without materializing them.
    fn skip(&mut self, count: u64) -> io::Result<()>;

    /// Absolute position of the cursor.
    fn position(&self) -> u64;

    /// Total stream length, if known.
    fn len(&self) -> Option<u64>;

    /// Consume `len` bytes into a fresh buffer
    fn read_vec(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "element too large for memory"))?;
        let mut buffer = vec![0u8; len];
        self.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// `ByteSource` over any buffered, seekable reader (files, `Cursor`s).
pub struct StreamReader<R> {
    inner: R,
    position: u64,
    length: Option<u64>,
}

impl<R: BufRead + Seek> StreamReader<R> {
    /// Wrap `inner`, starting at its current position.
    ///
    /// The total length is measured once up front by seeking to the end and
    /// back; this is the only backward seek ever issued.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let position = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;

        Ok(StreamReader {
            inner,
            position,
            length: Some(end),
        })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead + Seek> ByteSource for StreamReader<R> {
    fn peek_u8(&mut self) -> io::Result<Option<u8>> {
        let buffer = self.inner.fill_buf()?;
        Ok(buffer.first().copied())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        Read::read_exact(&mut self.inner, buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn skip(&mut self, count: u64) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }

        let target = self.position.checked_add(count).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "skip past addressable range")
        })?;
        if let Some(length) = self.length {
            if target > length {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("cannot skip to offset {} in a stream of {} bytes", target, length),
                ));
            }
        }

        let offset = i64::try_from(count)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip too large"))?;
        self.inner.seek(SeekFrom::Current(offset))?;
        self.position = target;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn len(&self) -> Option<u64> {
        self.length
    }
}
