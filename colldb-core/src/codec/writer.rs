//! Primitive writer producing a collection database byte stream.

use std::io::Write;

use crate::error::{CollectionError, CollectionResult};

use super::{
    format::{STRING_ABSENT, STRING_PRESENT},
    varuint,
};

/// Sequential little-endian writer for collection database primitives.
///
/// Output mirrors [`DbReader`](super::DbReader) byte for byte: anything written
/// here reads back to the same value.
#[derive(Debug)]
pub struct DbWriter<W> {
    inner: W,
    position: u64,
}

impl<W: Write> DbWriter<W> {
    /// Wraps a byte sink.
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the wrapped sink without flushing it.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_bytes(&mut self, bytes: &[u8], what: &str) -> CollectionResult<()> {
        self.inner.write_all(bytes).map_err(|e| {
            CollectionError::io(format!("writing {what} at offset {}", self.position), e)
        })?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_u8(&mut self, value: u8) -> CollectionResult<()> {
        self.write_bytes(&[value], "u8")
    }

    /// Writes a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_u16(&mut self, value: u16) -> CollectionResult<()> {
        self.write_bytes(&value.to_le_bytes(), "u16")
    }

    /// Writes a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_u32(&mut self, value: u32) -> CollectionResult<()> {
        self.write_bytes(&value.to_le_bytes(), "u32")
    }

    /// Writes a little-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_u64(&mut self, value: u64) -> CollectionResult<()> {
        self.write_bytes(&value.to_le_bytes(), "u64")
    }

    /// Writes a boolean as a single `0` or `1` byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_bool(&mut self, value: bool) -> CollectionResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes a base-128 variable-length unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_varuint(&mut self, value: u64) -> CollectionResult<()> {
        let mut buf = Vec::with_capacity(varuint::encoded_len(value));
        varuint::encode_varuint(value, &mut buf);
        self.write_bytes(&buf, "varuint")
    }

    /// Writes a string: `0x00` when empty, otherwise `0x0b`, the varuint byte
    /// length and the UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_string(&mut self, value: &str) -> CollectionResult<()> {
        if value.is_empty() {
            return self.write_u8(STRING_ABSENT);
        }
        self.write_u8(STRING_PRESENT)?;
        self.write_varuint(value.len() as u64)?;
        self.write_bytes(value.as_bytes(), "string payload")
    }

    /// Flushes the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    pub fn flush(&mut self) -> CollectionResult<()> {
        self.inner
            .flush()
            .map_err(|e| CollectionError::io("flushing collection data", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DbReader;
    use test_case::test_case;

    fn written(f: impl FnOnce(&mut DbWriter<Vec<u8>>) -> CollectionResult<()>) -> Vec<u8> {
        let mut w = DbWriter::new(Vec::new());
        f(&mut w).unwrap();
        w.into_inner()
    }

    #[test]
    fn test_fixed_width_little_endian() {
        let bytes = written(|w| {
            w.write_u8(0x2A)?;
            w.write_u16(0x1234)?;
            w.write_u32(0x1234_5678)?;
            w.write_u64(0x0102_0304_0506_0708)?;
            w.write_bool(true)
        });
        assert_eq!(
            bytes,
            [
                0x2A, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03,
                0x02, 0x01, 0x01
            ]
        );
    }

    #[test_case(0 ; "zero")]
    #[test_case(127 ; "one byte max")]
    #[test_case(128 ; "two bytes min")]
    #[test_case(16_384 ; "three bytes min")]
    #[test_case(u64::from(u32::MAX) ; "u32 max")]
    #[test_case(u64::MAX ; "u64 max")]
    fn test_varuint_reads_back(value: u64) {
        let bytes = written(|w| w.write_varuint(value));
        let mut r = DbReader::new(bytes.as_slice());
        assert_eq!(r.read_varuint().unwrap(), value);
        assert_eq!(r.position(), bytes.len() as u64);
    }

    #[test]
    fn test_varuint_emits_continuation_bytes() {
        assert_eq!(written(|w| w.write_varuint(128)), [0x80, 0x01]);
        assert_eq!(
            written(|w| w.write_varuint(u64::from(u32::MAX))),
            [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]
        );
    }

    #[test]
    fn test_empty_string_is_single_zero_byte() {
        let bytes = written(|w| w.write_string(""));
        assert_eq!(bytes, [0x00]);

        let mut r = DbReader::new(bytes.as_slice());
        assert_eq!(r.read_string().unwrap(), "");
    }

    #[test]
    fn test_string_layout() {
        let bytes = written(|w| w.write_string("abc"));
        assert_eq!(bytes, [0x0B, 0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn test_long_string_uses_multibyte_length() {
        let text = "x".repeat(300);
        let bytes = written(|w| w.write_string(&text));
        assert_eq!(&bytes[..3], &[0x0B, 0xAC, 0x02]);
        assert_eq!(bytes.len(), 3 + 300);

        let mut r = DbReader::new(bytes.as_slice());
        assert_eq!(r.read_string().unwrap(), text);
    }

    #[test]
    fn test_non_ascii_string_reads_back() {
        let text = "Überschall ★ 東方";
        let bytes = written(|w| w.write_string(text));
        assert_eq!(usize::from(bytes[1]), text.len());

        let mut r = DbReader::new(bytes.as_slice());
        assert_eq!(r.read_string().unwrap(), text);
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_io_error() {
        let mut w = DbWriter::new(FailingSink);
        let err = w.write_u32(7).unwrap_err();
        assert!(matches!(err, CollectionError::Io { .. }));
        assert_eq!(w.position(), 0);
    }
}
