//! The in-memory form of a whole collection database file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::codec::{DbReader, DbWriter};
use crate::collection::Collection;
use crate::error::{CollectionError, CollectionResult};

/// A decoded collection database.
///
/// The collection count written to disk is always `collections.len()`, so
/// it cannot drift from the records that follow it.
///
/// # Binary Layout
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     format_version (u32 LE)
/// 4       4     collection_count (u32 LE)
/// 8       N     collection records
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionDb {
    /// Format version, carried through unchanged.
    pub format_version: u32,
    /// Collections in stored order. Duplicate names are allowed.
    pub collections: Vec<Collection>,
}

impl CollectionDb {
    /// Creates an empty database with the given format version.
    #[must_use]
    pub const fn new(format_version: u32) -> Self {
        Self {
            format_version,
            collections: Vec::new(),
        }
    }

    /// Number of collections, as it will be written.
    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Total number of fingerprints across every collection.
    #[must_use]
    pub fn fingerprint_total(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    /// Appends a collection after the existing ones.
    pub fn push(&mut self, collection: Collection) {
        self.collections.push(collection);
    }

    /// Iterates collections in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.collections.iter()
    }

    /// Decodes a complete database from `reader`.
    ///
    /// Bytes after the last declared record are left unread.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollectionFile`] if the header declares
    /// zero collections, and any codec error raised while reading records. No
    /// partially decoded database is ever returned.
    pub fn read_from<R: Read>(reader: &mut DbReader<R>) -> CollectionResult<Self> {
        let format_version = reader.read_u32()?;
        let declared = reader.read_u32()?;
        if declared == 0 {
            return Err(CollectionError::EmptyCollectionFile);
        }

        let mut db = Self::new(format_version);
        for _ in 0..declared {
            db.push(Collection::read_from(reader)?);
        }

        log::debug!(
            "decoded collection db v{format_version}: {} collections, {} fingerprints, {} bytes",
            db.collection_count(),
            db.fingerprint_total(),
            reader.position()
        );
        Ok(db)
    }

    /// Encodes the database to `writer`, recomputing every count.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails or a count does not fit in a `u32`.
    pub fn write_to<W: Write>(&self, writer: &mut DbWriter<W>) -> CollectionResult<()> {
        let count = u32::try_from(self.collections.len()).map_err(|_| {
            CollectionError::CountOverflow {
                context: format!("{} collections", self.collections.len()),
            }
        })?;

        writer.write_u32(self.format_version)?;
        writer.write_u32(count)?;
        for collection in &self.collections {
            collection.write_to(writer)?;
        }

        log::debug!(
            "encoded collection db v{}: {count} collections, {} bytes",
            self.format_version,
            writer.position()
        );
        Ok(())
    }

    /// Decodes a database from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// See [`read_from`](Self::read_from).
    pub fn from_bytes(bytes: &[u8]) -> CollectionResult<Self> {
        let mut reader = DbReader::new(bytes);
        let db = Self::read_from(&mut reader)?;
        let trailing = bytes.len() as u64 - reader.position();
        if trailing > 0 {
            log::debug!("ignoring {trailing} trailing bytes after last collection");
        }
        Ok(db)
    }

    /// Encodes the database into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an error only if a count does not fit in a `u32`.
    pub fn to_bytes(&self) -> CollectionResult<Vec<u8>> {
        let mut writer = DbWriter::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Loads a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not decode.
    pub fn open(path: impl AsRef<Path>) -> CollectionResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CollectionError::io(format!("opening {}", path.display()), e))?;
        log::debug!("loading collection db from {}", path.display());

        let mut reader = DbReader::new(BufReader::new(file));
        Self::read_from(&mut reader)
    }

    /// Writes the database to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> CollectionResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| CollectionError::io(format!("creating {}", path.display()), e))?;
        log::debug!("saving collection db to {}", path.display());

        let mut writer = DbWriter::new(BufWriter::new(file));
        self.write_to(&mut writer)?;
        writer.flush()
    }

    /// Builds a new database holding `primary`'s collections followed by
    /// `secondary`'s, with `primary`'s format version.
    ///
    /// Neither input is modified and no de-duplication takes place.
    #[must_use]
    pub fn merge(primary: &Self, secondary: &Self) -> Self {
        let mut collections =
            Vec::with_capacity(primary.collections.len() + secondary.collections.len());
        collections.extend(primary.collections.iter().cloned());
        collections.extend(secondary.collections.iter().cloned());

        log::debug!(
            "merged {} + {} collections",
            primary.collection_count(),
            secondary.collection_count()
        );
        Self {
            format_version: primary.format_version,
            collections,
        }
    }
}

impl<'a> IntoIterator for &'a CollectionDb {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}
