//! Header checksum (CRC1 / CRC2) recomputation.
//!
//! The boot code verifies the first megabyte of program data after IPL3
//! with a six-accumulator checksum and compares the result against the two
//! words stored at header offsets `0x10` and `0x14`. The algorithm below
//! reproduces that check exactly; the seed and final folding depend on the
//! CIC variant (see [`crate::cic::CicKind::checksum_params`]).

use std::fmt;
use std::io::Read;

use crate::byte_order::{FileByteOrder, read_fully};
use crate::error::Error;
use crate::header::HEADER_LEN;

/// First byte covered by the checksum.
pub const CHECKSUM_START: usize = 0x0000_1000;
/// Number of bytes covered by the checksum (1 MiB).
pub const CHECKSUM_LENGTH: usize = 0x0010_0000;
/// One past the last byte covered; also the minimum file size.
pub const CHECKSUM_END: usize = CHECKSUM_START + CHECKSUM_LENGTH;

/// Base of the boot code table read by the 6105 variant.
const BOOT_CODE_LOOKUP_BASE: usize = HEADER_LEN + 0x0710;

/// CRC1 / CRC2 pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChecksumPair {
    pub crc1: u32,
    pub crc2: u32,
}

impl ChecksumPair {
    pub const fn new(crc1: u32, crc2: u32) -> Self {
        Self { crc1, crc2 }
    }

    /// CRC1 as 8 uppercase hex digits.
    pub fn crc1_hex(&self) -> String {
        format!("{:08X}", self.crc1)
    }

    /// CRC2 as 8 uppercase hex digits.
    pub fn crc2_hex(&self) -> String {
        format!("{:08X}", self.crc2)
    }
}

impl fmt::Display for ChecksumPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X} {:08X}", self.crc1, self.crc2)
    }
}

/// How each data word feeds the first accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordMix {
    /// `t1 += t5 ^ d`
    Standard,
    /// `t1 += b ^ d` where `b` is read from the boot code (6105).
    BootCodeLookup,
}

/// How the six accumulators collapse into the final pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fold {
    /// `t6 ^ t4 ^ t3`, `t5 ^ t2 ^ t1`
    Xor,
    /// `(t6 ^ t4) + t3`, `(t5 ^ t2) + t1` (6103)
    Additive,
    /// `(t6 * t4) + t3`, `(t5 * t2) + t1` (6106)
    Multiplicative,
}

/// Per-variant inputs of the checksum algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChecksumParams {
    pub seed: u32,
    pub mix: WordMix,
    pub fold: Fold,
}

/// Compute the checksum pair over canonical-order ROM bytes.
///
/// `rom` must start at file offset 0 and cover at least [`CHECKSUM_END`]
/// bytes; anything past the window is ignored.
pub fn calculate(rom: &[u8], params: ChecksumParams) -> Result<ChecksumPair, Error> {
    if rom.len() < CHECKSUM_END {
        return Err(Error::InsufficientData {
            expected: CHECKSUM_END,
            actual: rom.len(),
        });
    }

    let seed = params.seed;
    let (mut t1, mut t2, mut t3, mut t4, mut t5, mut t6) = (seed, seed, seed, seed, seed, seed);

    for offset in (CHECKSUM_START..CHECKSUM_END).step_by(4) {
        let d = word_at(rom, offset);

        let (sum, carry) = t6.overflowing_add(d);
        if carry {
            t4 = t4.wrapping_add(1);
        }
        t6 = sum;
        t3 ^= d;

        let r = d.rotate_left(d & 0x1F);
        t5 = t5.wrapping_add(r);

        if t2 > d {
            t2 ^= r;
        } else {
            t2 ^= t6 ^ d;
        }

        t1 = match params.mix {
            WordMix::Standard => t1.wrapping_add(t5 ^ d),
            WordMix::BootCodeLookup => {
                let b = word_at(rom, BOOT_CODE_LOOKUP_BASE + (offset & 0xFF));
                t1.wrapping_add(b ^ d)
            }
        };
    }

    let pair = match params.fold {
        Fold::Xor => ChecksumPair::new(t6 ^ t4 ^ t3, t5 ^ t2 ^ t1),
        Fold::Additive => ChecksumPair::new(
            (t6 ^ t4).wrapping_add(t3),
            (t5 ^ t2).wrapping_add(t1),
        ),
        Fold::Multiplicative => ChecksumPair::new(
            t6.wrapping_mul(t4).wrapping_add(t3),
            t5.wrapping_mul(t2).wrapping_add(t1),
        ),
    };
    Ok(pair)
}

/// Read the checksum window from the start of a dump and normalize it.
///
/// Only the first [`CHECKSUM_END`] bytes are read.
pub fn read_window<R: Read + ?Sized>(
    reader: &mut R,
    byte_order: FileByteOrder,
) -> Result<Vec<u8>, Error> {
    let mut window = vec![0u8; CHECKSUM_END];
    let actual = read_fully(reader, &mut window)?;
    if actual < CHECKSUM_END {
        return Err(Error::InsufficientData {
            expected: CHECKSUM_END,
            actual,
        });
    }
    byte_order.normalize(&mut window);
    Ok(window)
}

fn word_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
