//! Byte-level constants for the collection database format.
//!
//! # File Layout
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     format_version (u32 LE, passthrough)
//! 4       4     collection_count (u32 LE)
//! 8       ...   collection_count x {
//!                   name           string
//!                   member_count   u32 LE
//!                   member_count x fingerprint string
//!               }
//! ```
//!
//! # String Layout
//!
//! ```text
//! 0x00                              empty / absent
//! 0x0b  varuint(len)  [u8; len]     UTF-8 payload
//! ```

/// Marker byte announcing that a length-prefixed string follows.
pub const STRING_PRESENT: u8 = 0x0B;

/// Marker byte written for an empty or absent string.
pub const STRING_ABSENT: u8 = 0x00;

/// Payload bits carried by each varuint byte.
pub const VARUINT_PAYLOAD_MASK: u8 = 0x7F;

/// Continuation bit of a varuint byte.
pub const VARUINT_CONTINUATION: u8 = 0x80;

/// Widest integer a varuint may decode into.
pub const MAX_VARUINT_BITS: u32 = u64::BITS;
