//! Matching a dump against a catalog of known-good entries.

use tracing::debug;

use crate::byte_order::FileByteOrder;
use crate::error::Error;
use crate::header::Serial;

/// Reference record from a catalog (DAT file).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogEntry {
    /// Canonical file name, e.g. `Super Mario 64 (USA).z64`.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
    pub serial: String,
    /// Lowercase or uppercase hex SHA-1 of the canonical (`.z64`) dump.
    pub sha1: String,
    pub md5: Option<String>,
    pub crc32: Option<String>,
    /// Dump status such as `verified`, when the catalog provides it.
    pub status: Option<String>,
}

/// Catalog entries sharing the dump's serial, split by hash equality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOutcome<'a> {
    pub matches: Vec<&'a CatalogEntry>,
    pub mismatches: Vec<&'a CatalogEntry>,
}

impl<'a> ValidationOutcome<'a> {
    /// Apply the usual policy: exactly one match is success, none is a
    /// mismatch, more than one means the catalog itself is ambiguous.
    pub fn unique_match(&self, serial: &Serial) -> Result<&'a CatalogEntry, Error> {
        match self.matches.as_slice() {
            [entry] => Ok(*entry),
            [] => Err(Error::NoMatch {
                serial: serial.to_string(),
            }),
            many => Err(Error::AmbiguousCatalog {
                serial: serial.to_string(),
                count: many.len(),
            }),
        }
    }
}

/// Compare a dump's identity and SHA-1 against `catalog`.
///
/// The dump must be canonical because catalogs list hashes of `.z64` files.
pub fn validate<'a>(
    serial: &Serial,
    byte_order: FileByteOrder,
    sha1: Option<&str>,
    catalog: &'a [CatalogEntry],
) -> Result<ValidationOutcome<'a>, Error> {
    let sha1 = sha1.ok_or(Error::MissingHash)?;

    if !byte_order.is_canonical() {
        return Err(Error::WrongFormat { actual: byte_order });
    }

    let candidates: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|entry| serial.matches(&entry.serial))
        .collect();
    if candidates.is_empty() {
        return Err(Error::NotCataloged {
            serial: serial.to_string(),
        });
    }

    let (matches, mismatches): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|entry| entry.sha1.eq_ignore_ascii_case(sha1));
    debug!(
        serial = %serial,
        matches = matches.len(),
        mismatches = mismatches.len(),
        "validated against catalog"
    );

    Ok(ValidationOutcome {
        matches,
        mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(serial: &str, sha1: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            size: 8 * 1024 * 1024,
            serial: serial.to_string(),
            sha1: sha1.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry("NSME", "abc123", "Super Mario 64 (USA).z64"),
            entry("NSMJ", "fff000", "Super Mario 64 (Japan).z64"),
        ]
    }

    #[test]
    fn matching_hash() {
        let catalog = catalog();
        let serial = Serial::new("NSME");
        let outcome =
            validate(&serial, FileByteOrder::Canonical, Some("abc123"), &catalog).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert!(outcome.mismatches.is_empty());
        assert_eq!(outcome.unique_match(&serial).unwrap().name, "Super Mario 64 (USA).z64");
    }

    #[test]
    fn mismatching_hash() {
        let catalog = catalog();
        let serial = Serial::new("NSME");
        let outcome =
            validate(&serial, FileByteOrder::Canonical, Some("def456"), &catalog).unwrap();
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.mismatches.len(), 1);
        assert!(matches!(
            outcome.unique_match(&serial),
            Err(Error::NoMatch { .. })
        ));
    }

    #[test]
    fn comparisons_ignore_case() {
        let catalog = catalog();
        let outcome = validate(
            &Serial::new("nsme"),
            FileByteOrder::Canonical,
            Some("ABC123"),
            &catalog,
        )
        .unwrap();
        assert_eq!(outcome.matches.len(), 1);
    }

    #[test]
    fn unknown_serial() {
        let err = validate(
            &Serial::new("ZZZZ"),
            FileByteOrder::Canonical,
            Some("abc123"),
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotCataloged { serial } if serial == "ZZZZ"));
    }

    #[test]
    fn requires_hash_then_canonical_order() {
        let catalog = catalog();
        let serial = Serial::new("NSME");
        assert!(matches!(
            validate(&serial, FileByteOrder::WordSwapped, None, &catalog),
            Err(Error::MissingHash)
        ));
        assert!(matches!(
            validate(&serial, FileByteOrder::WordSwapped, Some("abc123"), &catalog),
            Err(Error::WrongFormat {
                actual: FileByteOrder::WordSwapped
            })
        ));
    }

    #[test]
    fn duplicate_hashes_are_ambiguous() {
        let mut catalog = catalog();
        catalog.push(entry("NSME", "abc123", "Super Mario 64 (USA) (Alt).z64"));
        let serial = Serial::new("NSME");
        let outcome =
            validate(&serial, FileByteOrder::Canonical, Some("abc123"), &catalog).unwrap();
        assert!(matches!(
            outcome.unique_match(&serial),
            Err(Error::AmbiguousCatalog { count: 2, .. })
        ));
    }
}
