//! A single named collection of fingerprints.

use std::io::{Read, Write};

use serde::Serialize;

use crate::codec::{DbReader, DbWriter};
use crate::error::{CollectionError, CollectionResult};

/// A named, ordered group of content fingerprints.
///
/// # Binary Layout
///
/// ```text
/// name           string
/// member_count   u32 LE (always fingerprints.len())
/// fingerprints   member_count x string
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collection {
    /// Display name. Not required to be unique within a file.
    pub name: String,
    /// Fingerprints in stored order. Treated as opaque text.
    pub fingerprints: Vec<String>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingerprints: Vec::new(),
        }
    }

    /// Creates a collection holding `fingerprints` in iteration order.
    #[must_use]
    pub fn with_fingerprints<I, S>(name: impl Into<String>, fingerprints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fingerprints: fingerprints.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of fingerprints; this is what gets written as the member count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// Returns `true` if the collection has no fingerprints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Reads one collection record.
    ///
    /// Exactly `member_count` fingerprints are read; a stream holding fewer
    /// fails rather than yielding a short collection.
    pub(crate) fn read_from<R: Read>(reader: &mut DbReader<R>) -> CollectionResult<Self> {
        let name = reader.read_string()?;
        let member_count = reader.read_u32()?;

        let mut fingerprints = Vec::new();
        for _ in 0..member_count {
            fingerprints.push(reader.read_string()?);
        }

        log::trace!("read collection {name:?} with {member_count} fingerprints");
        Ok(Self { name, fingerprints })
    }

    /// Writes this record with a member count derived from `fingerprints`.
    pub(crate) fn write_to<W: Write>(&self, writer: &mut DbWriter<W>) -> CollectionResult<()> {
        let member_count = u32::try_from(self.fingerprints.len()).map_err(|_| {
            CollectionError::CountOverflow {
                context: format!(
                    "collection {:?} holds {} fingerprints",
                    self.name,
                    self.fingerprints.len()
                ),
            }
        })?;

        writer.write_string(&self.name)?;
        writer.write_u32(member_count)?;
        for fingerprint in &self.fingerprints {
            writer.write_string(fingerprint)?;
        }
        Ok(())
    }
}
