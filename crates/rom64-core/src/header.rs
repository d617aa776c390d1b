//! ROM header decoding.
//!
//! Every N64 ROM starts with a 64 byte header followed by the 4032 byte boot
//! code (IPL3) that the CIC lockout chip verifies. All offsets below are in
//! canonical (big-endian) order:
//!
//! | offset | size | field                               |
//! |--------|------|-------------------------------------|
//! | `0x00` | 4    | PI domain config / byte order magic |
//! | `0x04` | 4    | clock rate                          |
//! | `0x08` | 4    | program counter (entry point)       |
//! | `0x0C` | 4    | release address                     |
//! | `0x10` | 4    | CRC1 ("CRC HI")                     |
//! | `0x14` | 4    | CRC2 ("CRC LO")                     |
//! | `0x18` | 8    | reserved                            |
//! | `0x20` | 20   | image name                          |
//! | `0x34` | 4    | reserved                            |
//! | `0x38` | 4    | media format (last byte only)       |
//! | `0x3C` | 2    | cartridge id                        |
//! | `0x3E` | 1    | region code                         |
//! | `0x3F` | 1    | version                             |
//!
//! [`RomHeader::read_from`] handles byte order detection and normalization,
//! [`RomHeader::parse`] expects canonical bytes.

use std::fmt;
use std::io::Read;

use tracing::debug;

use crate::byte_order::{FileByteOrder, SIGNATURE_LEN, read_section};
use crate::checksum::ChecksumPair;
use crate::error::Error;

mod media_format;
mod region;

pub use media_format::MediaFormat;
pub use region::{Region, VideoSystem};

/// Size of the fixed ROM header in bytes.
pub const HEADER_LEN: usize = 0x40;
/// Size of the boot code segment following the header.
pub const BOOT_SEGMENT_LEN: usize = 4032;
/// Header plus boot segment, the minimum needed to identify a dump.
pub const IDENTIFY_LEN: usize = HEADER_LEN + BOOT_SEGMENT_LEN;

const TITLE_RANGE: std::ops::Range<usize> = 0x20..0x34;

/// Decoded ROM header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RomHeader {
    pub clock_rate: u32,
    pub program_counter: u32,
    pub release_address: u32,
    /// CRC1/CRC2 as stored in the header.
    pub checksum: ChecksumPair,
    pub reserved1: [u8; 8],
    /// Image name with zero bytes removed and surrounding whitespace trimmed.
    pub title: String,
    pub reserved2: [u8; 4],
    pub media_format: MediaFormat,
    pub cartridge_id: [u8; 2],
    pub region: Region,
    /// Mask ROM revision, displayed as `1.<version>`.
    pub version: u8,
}

/// Boot code (IPL3) in canonical order.
#[derive(Clone, PartialEq, Eq)]
pub struct BootSegment(Box<[u8; BOOT_SEGMENT_LEN]>);

impl BootSegment {
    pub fn new(bytes: Box<[u8; BOOT_SEGMENT_LEN]>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BOOT_SEGMENT_LEN] {
        &self.0
    }

    /// CRC-32 (IEEE) of the boot code, used to fingerprint the CIC.
    pub fn crc32(&self) -> u32 {
        crc32fast::hash(self.0.as_slice())
    }
}

impl fmt::Debug for BootSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BootSegment(crc32={:08X})", self.crc32())
    }
}

/// Result of reading the start of a dump.
#[derive(Debug, Clone)]
pub struct DecodedHeader {
    pub byte_order: FileByteOrder,
    pub header: RomHeader,
    pub boot: BootSegment,
}

impl RomHeader {
    /// Parse a header from 64 canonical-order bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(Error::TruncatedInput {
                stage: "header",
                expected: HEADER_LEN,
                actual: bytes.len(),
            })?;

        Ok(Self {
            clock_rate: be_u32(bytes, 0x04),
            program_counter: be_u32(bytes, 0x08),
            release_address: be_u32(bytes, 0x0C),
            checksum: ChecksumPair::new(be_u32(bytes, 0x10), be_u32(bytes, 0x14)),
            reserved1: array_at(bytes, 0x18),
            title: decode_text(&bytes[TITLE_RANGE]),
            reserved2: array_at(bytes, 0x34),
            media_format: MediaFormat(bytes[0x3B]),
            cartridge_id: array_at(bytes, 0x3C),
            region: Region(bytes[0x3E]),
            version: bytes[0x3F],
        })
    }

    /// Read signature, header and boot segment from the start of a dump in
    /// any of the supported byte orders.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<DecodedHeader, Error> {
        let mut raw = [0u8; HEADER_LEN];
        let (signature, rest) = raw.split_at_mut(SIGNATURE_LEN);
        read_section(reader, signature, "signature")?;
        let byte_order = FileByteOrder::detect([signature[0], signature[1], signature[2], signature[3]])?;
        debug!(byte_order = %byte_order, "detected byte order");

        read_section(reader, rest, "header")?;
        byte_order.normalize(&mut raw);
        let header = Self::parse(&raw)?;

        let mut boot = Box::new([0u8; BOOT_SEGMENT_LEN]);
        read_section(reader, boot.as_mut_slice(), "boot segment")?;
        byte_order.normalize(boot.as_mut_slice());

        Ok(DecodedHeader {
            byte_order,
            header,
            boot: BootSegment::new(boot),
        })
    }

    /// Two character cartridge id, zero bytes removed.
    pub fn cartridge_id_str(&self) -> String {
        decode_text(&self.cartridge_id)
    }

    /// Catalog key: media format + cartridge id + region, e.g. `NSME`.
    pub fn serial(&self) -> Serial {
        let mut serial = String::with_capacity(4);
        serial.push_str(&self.media_format.to_string());
        serial.push_str(&self.cartridge_id_str());
        serial.push_str(&self.region.to_string());
        Serial(serial)
    }

    /// Version formatted the way it is usually printed on labels.
    pub fn version_string(&self) -> String {
        format!("1.{}", self.version)
    }
}

/// Cartridge identity used to look a dump up in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Serial(String);

impl Serial {
    pub fn new(serial: impl Into<String>) -> Self {
        Self(serial.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bytes to text: every zero byte is dropped (not just trailing padding),
/// remaining bytes map one-to-one to chars, then whitespace is trimmed.
fn decode_text(bytes: &[u8]) -> String {
    let text: String = bytes
        .iter()
        .filter(|&&b| b != 0)
        .map(|&b| b as char)
        .collect();
    text.trim().to_string()
}

fn be_u32(bytes: &[u8; HEADER_LEN], offset: usize) -> u32 {
    u32::from_be_bytes(array_at(bytes, offset))
}

fn array_at<const N: usize>(bytes: &[u8; HEADER_LEN], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
