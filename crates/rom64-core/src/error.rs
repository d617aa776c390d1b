use std::fmt;

use crate::byte_order::FileByteOrder;

#[derive(Debug)]
pub enum Error {
    /// The first four bytes match none of the known byte order signatures.
    UnrecognizedFormat { signature: [u8; 4] },
    /// A fixed-size read (signature, header, boot segment) hit end of input.
    TruncatedInput {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The file is shorter than the checksum window requires.
    InsufficientData { expected: usize, actual: usize },
    /// The operation needs a canonical (big-endian) dump.
    WrongFormat { actual: FileByteOrder },
    /// Validation was requested before a content hash was computed.
    MissingHash,
    /// The catalog has no entry for the serial.
    NotCataloged { serial: String },
    /// Conversion was requested on a file that is already canonical.
    AlreadyCanonical,
    /// More than one catalog entry matched the content hash.
    AmbiguousCatalog { serial: String, count: usize },
    /// The serial is cataloged but none of its entries match the content hash.
    NoMatch { serial: String },
    /// Wrapper for I/O errors raised while reading or writing dumps.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFormat { signature } => write!(
                f,
                "unknown ROM format (signature {:02X} {:02X} {:02X} {:02X}), invalid file?",
                signature[0], signature[1], signature[2], signature[3]
            ),
            Self::TruncatedInput {
                stage,
                expected,
                actual,
            } => write!(f, "{stage} expected {expected} bytes, got {actual}"),
            Self::InsufficientData { expected, actual } => write!(
                f,
                "checksum needs at least {expected} bytes of ROM data, file has {actual}"
            ),
            Self::WrongFormat { actual } => write!(
                f,
                "file must be in z64 (big-endian) format, this file is {} ({}); the `convert` command can help",
                actual.code(),
                actual.description()
            ),
            Self::MissingHash => write!(f, "ROM file is missing a SHA-1 hash"),
            Self::NotCataloged { serial } => {
                write!(f, "catalog does not contain an entry for {serial}")
            }
            Self::AlreadyCanonical => write!(f, "file is already in the native z64 format"),
            Self::AmbiguousCatalog { serial, count } => write!(
                f,
                "{count} catalog entries for {serial} share the same SHA-1 hash, the catalog is ambiguous"
            ),
            Self::NoMatch { serial } => {
                write!(f, "no catalog entry for {serial} matches the file's SHA-1 hash")
            }
            Self::Io(err) => write!(f, "i/o error while reading ROM: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
