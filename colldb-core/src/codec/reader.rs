//! Primitive reader over a collection database byte stream.

use std::io::{ErrorKind, Read};

use crate::error::{CollectionError, CollectionResult};

use super::{format::STRING_PRESENT, varuint};

/// Sequential little-endian reader for collection database primitives.
///
/// Every `read_*` call consumes exactly the bytes of its field and advances
/// [`position`](Self::position). A stream that ends early yields
/// [`CollectionError::UnexpectedEndOfStream`]; no primitive ever returns a
/// partially read value.
#[derive(Debug)]
pub struct DbReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> DbReader<R> {
    /// Wraps a byte source.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the wrapped byte source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> CollectionResult<[u8; N]> {
        let mut buf = [0u8; N];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => {
                self.position += N as u64;
                Ok(buf)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(CollectionError::eof(format!(
                "{what} ({N} bytes) at offset {}",
                self.position
            ))),
            Err(e) => Err(CollectionError::io(
                format!("reading {what} at offset {}", self.position),
                e,
            )),
        }
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is exhausted or the source fails.
    pub fn read_u8(&mut self) -> CollectionResult<u8> {
        let [byte] = self.read_array::<1>("u8")?;
        Ok(byte)
    }

    /// Reads a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 bytes remain or the source fails.
    pub fn read_u16(&mut self) -> CollectionResult<u16> {
        self.read_array("u16").map(u16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 4 bytes remain or the source fails.
    pub fn read_u32(&mut self) -> CollectionResult<u32> {
        self.read_array("u32").map(u32::from_le_bytes)
    }

    /// Reads a little-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 8 bytes remain or the source fails.
    pub fn read_u64(&mut self) -> CollectionResult<u64> {
        self.read_array("u64").map(u64::from_le_bytes)
    }

    /// Reads one byte as a boolean; any nonzero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is exhausted or the source fails.
    pub fn read_bool(&mut self) -> CollectionResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a base-128 variable-length unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::VaruintOverflow`] if the value needs more than
    /// 64 bits, or an end-of-stream error if the final byte is missing.
    pub fn read_varuint(&mut self) -> CollectionResult<u64> {
        varuint::decode_with(|| self.read_u8())
    }

    /// Reads a marker-prefixed UTF-8 string.
    ///
    /// Any marker other than `0x0b` denotes an empty string and nothing past
    /// the marker is consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the length prefix is malformed, the payload is
    /// shorter than declared, or the payload is not valid UTF-8.
    pub fn read_string(&mut self) -> CollectionResult<String> {
        let marker = self.read_u8()?;
        if marker != STRING_PRESENT {
            if marker != 0 {
                log::trace!(
                    "string marker {marker:#04x} at offset {} treated as empty",
                    self.position - 1
                );
            }
            return Ok(String::new());
        }

        let declared = self.read_varuint()?;
        let start = self.position;

        // Never allocate from the declared length alone; `take` bounds the read
        // to what the stream actually holds.
        let mut payload = Vec::new();
        let read = self
            .inner
            .by_ref()
            .take(declared)
            .read_to_end(&mut payload)
            .map_err(|e| CollectionError::io(format!("reading string at offset {start}"), e))?;
        self.position += read as u64;

        if (read as u64) < declared {
            return Err(CollectionError::eof(format!(
                "string payload at offset {start}: declared {declared} bytes, found {read}"
            )));
        }

        String::from_utf8(payload).map_err(|source| CollectionError::InvalidUtf8 {
            context: format!("string payload at offset {start}"),
            source,
        })
    }
}
