#![allow(dead_code)]

use rom64_core::checksum::{CHECKSUM_END, ChecksumPair};
use rom64_core::header::HEADER_LEN;
use rom64_core::FileByteOrder;

/// Size of the synthetic images: exactly the checksum window.
pub const ROM_LEN: usize = CHECKSUM_END;

/// Last four bytes of the boot segment that steer its CRC-32 onto a known
/// CIC fingerprint. Only valid for images built by [`build_rom`].
pub const BOOT_SUFFIX_6102: [u8; 4] = [0x80, 0xBD, 0xFF, 0xF5];
pub const BOOT_SUFFIX_6105: [u8; 4] = [0x86, 0x7D, 0xD8, 0x2F];
pub const BOOT_SUFFIX_6106: [u8; 4] = [0xE4, 0x08, 0x5A, 0xB7];

/// Golden CRC1/CRC2 of the xorshift image per checksum parameter set.
pub const GOLDEN_6102: ChecksumPair = ChecksumPair::new(0x50F8_7305, 0xC426_13B2);
pub const GOLDEN_6103: ChecksumPair = ChecksumPair::new(0x45CB_6248, 0x9CA3_D7E4);
pub const GOLDEN_6105: ChecksumPair = ChecksumPair::new(0x791D_1537, 0x35E5_B421);
pub const GOLDEN_6106: ChecksumPair = ChecksumPair::new(0x63AE_D81B, 0xE276_EA71);
pub const GOLDEN_UNKNOWN: ChecksumPair = ChecksumPair::new(0x582A_011F, 0x0E44_4C73);

/// Boot segment CRC-32 of the xorshift image without a forged suffix.
pub const PLAIN_BOOT_CRC: u32 = 0x2E61_F53B;

/// Deterministic pseudo-random big-endian words (xorshift32).
pub fn xorshift_image(len: usize) -> Vec<u8> {
    let mut image = vec![0u8; len];
    let mut state = 0x1234_5678u32;
    for chunk in image.chunks_exact_mut(4) {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        chunk.copy_from_slice(&state.to_be_bytes());
    }
    image
}

/// Canonical image with a Super Mario 64 (USA) style header and an optional
/// forged boot segment suffix.
pub fn build_rom(boot_suffix: Option<[u8; 4]>) -> Vec<u8> {
    let mut rom = xorshift_image(ROM_LEN);
    write_header(&mut rom[..HEADER_LEN]);
    if let Some(suffix) = boot_suffix {
        rom[0xFFC..0x1000].copy_from_slice(&suffix);
    }
    rom
}

pub fn write_header(header: &mut [u8]) {
    header.fill(0);
    header[..4].copy_from_slice(&FileByteOrder::Canonical.signature());
    header[0x04..0x08].copy_from_slice(&0x0000_000Fu32.to_be_bytes());
    header[0x08..0x0C].copy_from_slice(&0x8024_6000u32.to_be_bytes());
    header[0x20..0x34].copy_from_slice(b"SUPER MARIO 64\0\0\0\0\0\0");
    header[0x3B] = b'N';
    header[0x3C..0x3E].copy_from_slice(b"SM");
    header[0x3E] = b'E';
}

/// Store `pair` as the header checksum of a canonical image.
pub fn set_header_checksum(rom: &mut [u8], pair: ChecksumPair) {
    rom[0x10..0x14].copy_from_slice(&pair.crc1.to_be_bytes());
    rom[0x14..0x18].copy_from_slice(&pair.crc2.to_be_bytes());
}

/// The same image as it would appear on disk in `order`.
pub fn in_order(canonical: &[u8], order: FileByteOrder) -> Vec<u8> {
    let mut bytes = canonical.to_vec();
    order.normalize(&mut bytes);
    bytes
}
