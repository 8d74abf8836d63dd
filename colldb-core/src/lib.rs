#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Reader, writer and in-memory model for collection database files.
//!
//! A collection database stores named collections of content fingerprints
//! (MD5 hex digests in practice). This crate decodes such a file into a
//! [`CollectionDb`], lets callers inspect or [`merge`](CollectionDb::merge)
//! databases, and encodes them back byte for byte.
//!
//! ```
//! use colldb_core::{Collection, CollectionDb};
//!
//! let mut db = CollectionDb::new(20_250_107);
//! db.push(Collection::with_fingerprints(
//!     "Favourites",
//!     ["d41d8cd98f00b204e9800998ecf8427e"],
//! ));
//!
//! let bytes = db.to_bytes()?;
//! assert_eq!(CollectionDb::from_bytes(&bytes)?, db);
//! # Ok::<(), colldb_core::CollectionError>(())
//! ```

pub mod codec;

mod collection;
pub use collection::Collection;

mod database;
pub use database::CollectionDb;

mod error;
pub use error::*;
