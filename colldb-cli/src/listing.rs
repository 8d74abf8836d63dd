use std::io::{self, Write};

use colldb_core::CollectionDb;
use serde_json::json;

use crate::cli::ListFormat;

/// Writes `db` to `out` in the requested format, in stored order.
pub fn render(db: &CollectionDb, format: ListFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        ListFormat::Text => render_text(db, out),
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &to_json(db))?;
            writeln!(out)
        }
    }
}

fn render_text(db: &CollectionDb, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Version: {}", db.format_version)?;
    writeln!(out, "Total collections: {}", db.collection_count())?;
    for collection in db {
        writeln!(out, "{}:", collection.name)?;
        for fingerprint in &collection.fingerprints {
            writeln!(out, "    -{fingerprint}")?;
        }
    }
    Ok(())
}

fn to_json(db: &CollectionDb) -> serde_json::Value {
    json!({
        "format_version": db.format_version,
        "collection_count": db.collection_count(),
        "collections": db.collections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use colldb_core::Collection;

    fn sample() -> CollectionDb {
        let mut db = CollectionDb::new(20_250_107);
        db.push(Collection::with_fingerprints("Farm", ["aaaa", "bbbb"]));
        db.push(Collection::new("Empty"));
        db
    }

    #[test]
    fn test_text_listing() {
        let mut out = Vec::new();
        render(&sample(), ListFormat::Text, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Version: 20250107\n\
             Total collections: 2\n\
             Farm:\n    -aaaa\n    -bbbb\n\
             Empty:\n"
        );
    }

    #[test]
    fn test_json_listing() {
        let mut out = Vec::new();
        render(&sample(), ListFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["format_version"], 20_250_107);
        assert_eq!(value["collection_count"], 2);
        assert_eq!(value["collections"][0]["fingerprints"][1], "bbbb");
        assert_eq!(value["collections"][1]["name"], "Empty");
    }
}
