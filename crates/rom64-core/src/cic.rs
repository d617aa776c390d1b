//! CIC lockout chip identification.
//!
//! Each CIC variant ships with its own boot code, so the CRC-32 of the boot
//! segment identifies the chip a cartridge was built for. The chip in turn
//! decides the seed and the final mixing of the header checksum.

use std::fmt;

use phf::phf_map;
use tracing::{debug, warn};

use crate::checksum::{ChecksumParams, Fold, WordMix};
use crate::header::BootSegment;

/// Known verification chip variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CicKind {
    /// Aleck64 arcade boards.
    Cic5101,
    Cic6101,
    Cic6102,
    Cic6103,
    Cic6105,
    Cic6106,
    /// PAL counterpart of 6101 (Lylat Wars).
    Cic7102,
    /// 64DD retail IPL.
    Cic8303,
    /// Boot code fingerprint not in the table (homebrew, hacked or bad dumps).
    Unknown,
}

static BOOT_CRC_TO_CIC: phf::Map<u32, CicKind> = phf_map! {
    0x587B_D543u32 => CicKind::Cic5101,
    0x6170_A4A1u32 => CicKind::Cic6101,
    0x90BB_6CB5u32 => CicKind::Cic6102,
    0x0B05_0EE0u32 => CicKind::Cic6103,
    0x98BC_2C86u32 => CicKind::Cic6105,
    0xACC8_580Au32 => CicKind::Cic6106,
    0x009E_9EA3u32 => CicKind::Cic7102,
    0x0E01_8159u32 => CicKind::Cic8303,
};

const SEED_6102: u32 = 0xF8CA_4DDC;
const SEED_6103: u32 = 0xA388_6759;
const SEED_6105: u32 = 0xDF26_F436;
const SEED_6106: u32 = 0x1FEA_617A;
const SEED_DEFAULT: u32 = 1;

impl CicKind {
    pub const ALL: [CicKind; 9] = [
        CicKind::Cic5101,
        CicKind::Cic6101,
        CicKind::Cic6102,
        CicKind::Cic6103,
        CicKind::Cic6105,
        CicKind::Cic6106,
        CicKind::Cic7102,
        CicKind::Cic8303,
        CicKind::Unknown,
    ];

    /// Identify the chip from the boot code. Never fails: an unknown
    /// fingerprint yields [`CicKind::Unknown`].
    pub fn identify(boot: &BootSegment) -> Self {
        let crc = boot.crc32();
        let kind = Self::from_boot_crc(crc);
        if kind == Self::Unknown {
            warn!("unrecognized boot code crc32 {crc:08X}, checksum is best-effort");
        } else {
            debug!(cic = kind.name(), "identified CIC from boot code crc32 {crc:08X}");
        }
        kind
    }

    pub fn from_boot_crc(crc: u32) -> Self {
        BOOT_CRC_TO_CIC.get(&crc).copied().unwrap_or(Self::Unknown)
    }

    /// Chip number as printed on the part, empty for [`CicKind::Unknown`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Cic5101 => "5101",
            Self::Cic6101 => "6101",
            Self::Cic6102 => "6102",
            Self::Cic6103 => "6103",
            Self::Cic6105 => "6105",
            Self::Cic6106 => "6106",
            Self::Cic7102 => "7102",
            Self::Cic8303 => "8303",
            Self::Unknown => "",
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Seed and mixing rules for the header checksum.
    pub fn checksum_params(self) -> ChecksumParams {
        match self {
            // 7102 (PAL Lylat Wars) boots the 6102 IPL3, so it checks with the 6102 seed.
            Self::Cic6101 | Self::Cic6102 | Self::Cic7102 => ChecksumParams {
                seed: SEED_6102,
                mix: WordMix::Standard,
                fold: Fold::Xor,
            },
            Self::Cic6103 => ChecksumParams {
                seed: SEED_6103,
                mix: WordMix::Standard,
                fold: Fold::Additive,
            },
            Self::Cic6105 => ChecksumParams {
                seed: SEED_6105,
                mix: WordMix::BootCodeLookup,
                fold: Fold::Xor,
            },
            Self::Cic6106 => ChecksumParams {
                seed: SEED_6106,
                mix: WordMix::Standard,
                fold: Fold::Multiplicative,
            },
            Self::Cic5101 | Self::Cic8303 | Self::Unknown => ChecksumParams {
                seed: SEED_DEFAULT,
                mix: WordMix::Standard,
                fold: Fold::Xor,
            },
        }
    }
}

impl fmt::Display for CicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::BOOT_SEGMENT_LEN;

    #[test]
    fn table_lookup() {
        assert_eq!(CicKind::from_boot_crc(0x90BB_6CB5), CicKind::Cic6102);
        assert_eq!(CicKind::from_boot_crc(0x98BC_2C86), CicKind::Cic6105);
        assert_eq!(CicKind::from_boot_crc(0xDEAD_BEEF), CicKind::Unknown);
    }

    #[test]
    fn every_known_chip_is_reachable() {
        for kind in CicKind::ALL.into_iter().filter(|k| k.is_known()) {
            assert!(
                BOOT_CRC_TO_CIC.values().any(|v| *v == kind),
                "{kind:?} missing from fingerprint table"
            );
        }
    }

    #[test]
    fn zeroed_boot_code_is_unknown() {
        let boot = BootSegment::new(Box::new([0u8; BOOT_SEGMENT_LEN]));
        assert_eq!(CicKind::identify(&boot), CicKind::Unknown);
        assert_eq!(CicKind::Unknown.checksum_params().seed, 1);
    }

    #[test]
    fn shared_seed_family() {
        let seeds: Vec<u32> = [CicKind::Cic6101, CicKind::Cic6102, CicKind::Cic7102]
            .into_iter()
            .map(|k| k.checksum_params().seed)
            .collect();
        assert!(seeds.iter().all(|&s| s == SEED_6102));
    }
}
