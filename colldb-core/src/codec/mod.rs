//! Binary codec for collection database files.
//!
//! [`DbReader`] and [`DbWriter`] translate between Rust values and the
//! little-endian byte stream: fixed-width integers, base-128 varuints and
//! marker-prefixed UTF-8 strings. They know nothing about collections; the
//! record structure lives in [`crate::database`].

mod format;
mod reader;
pub mod varuint;
mod writer;

pub use format::*;
pub use reader::DbReader;
pub use writer::DbWriter;
