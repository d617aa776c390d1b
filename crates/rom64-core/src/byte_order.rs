//! On-disk byte orderings of N64 dumps.
//!
//! Dumps circulate in three layouts. The console itself reads big-endian
//! words (`.z64`), while some copier devices wrote the image with every
//! 16-bit halfword swapped (`.v64`) or every 32-bit word reversed (`.n64`).
//! The first word of every retail ROM is the PI domain configuration
//! `0x80371240`, so the layout can be recognised from the first four bytes.
//!
//! Converting between layouts is a per-chunk byte reversal, which is its own
//! inverse.

use std::fmt;
use std::io::{ErrorKind, Read};

use crate::error::Error;

/// Length of the byte order signature at file offset 0.
pub const SIGNATURE_LEN: usize = 4;

const SIGNATURE_Z64: [u8; SIGNATURE_LEN] = [0x80, 0x37, 0x12, 0x40];
const SIGNATURE_V64: [u8; SIGNATURE_LEN] = [0x37, 0x80, 0x40, 0x12];
const SIGNATURE_N64: [u8; SIGNATURE_LEN] = [0x40, 0x12, 0x37, 0x80];

/// Physical byte ordering of a dump file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileByteOrder {
    /// Native big-endian layout (`.z64`).
    Canonical,
    /// Every 16-bit halfword byte-swapped (`.v64`).
    HalfwordSwapped,
    /// Every 32-bit word byte-reversed (`.n64`).
    WordSwapped,
}

impl FileByteOrder {
    pub const ALL: [FileByteOrder; 3] = [
        FileByteOrder::Canonical,
        FileByteOrder::HalfwordSwapped,
        FileByteOrder::WordSwapped,
    ];

    /// Detect the ordering from the first four bytes of a file.
    pub fn detect(signature: [u8; SIGNATURE_LEN]) -> Result<Self, Error> {
        match signature {
            SIGNATURE_Z64 => Ok(Self::Canonical),
            SIGNATURE_V64 => Ok(Self::HalfwordSwapped),
            SIGNATURE_N64 => Ok(Self::WordSwapped),
            _ => Err(Error::UnrecognizedFormat { signature }),
        }
    }

    pub fn signature(self) -> [u8; SIGNATURE_LEN] {
        match self {
            Self::Canonical => SIGNATURE_Z64,
            Self::HalfwordSwapped => SIGNATURE_V64,
            Self::WordSwapped => SIGNATURE_N64,
        }
    }

    /// Conventional file extension / short code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Canonical => "z64",
            Self::HalfwordSwapped => "v64",
            Self::WordSwapped => "n64",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Canonical => "Big-endian",
            Self::HalfwordSwapped => "Byte-swapped",
            Self::WordSwapped => "Little-endian",
        }
    }

    /// Size of the groups whose bytes are reversed to reach canonical order.
    /// `1` means no reordering.
    pub fn chunk_size(self) -> usize {
        match self {
            Self::Canonical => 1,
            Self::HalfwordSwapped => 2,
            Self::WordSwapped => 4,
        }
    }

    pub fn is_canonical(self) -> bool {
        self == Self::Canonical
    }

    /// Reorder `bytes` in place between this ordering and canonical order.
    ///
    /// Applying it twice restores the input.
    pub fn normalize(self, bytes: &mut [u8]) {
        reverse_chunks(bytes, self.chunk_size());
    }
}

impl fmt::Display for FileByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Reverse the byte order inside every `chunk_size` group of `bytes`.
///
/// A trailing partial group is reversed over its own, shorter length.
pub fn reverse_chunks(bytes: &mut [u8], chunk_size: usize) {
    if chunk_size <= 1 {
        return;
    }
    for chunk in bytes.chunks_mut(chunk_size) {
        chunk.reverse();
    }
}

/// Read into `buf` until it is full or the reader is exhausted.
///
/// Unlike `read_exact` this reports how much was read before end of input,
/// which callers need both for error messages and for chunk-aligned
/// streaming.
pub fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        }
    }
    Ok(filled)
}

/// Like [`read_fully`], but a short read is a [`Error::TruncatedInput`] for `stage`.
pub fn read_section<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    stage: &'static str,
) -> Result<(), Error> {
    let actual = read_fully(reader, buf)?;
    if actual < buf.len() {
        return Err(Error::TruncatedInput {
            stage,
            expected: buf.len(),
            actual,
        });
    }
    Ok(())
}
