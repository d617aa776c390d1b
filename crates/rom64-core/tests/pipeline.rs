mod common;

use std::io::{Cursor, Seek, SeekFrom};

use anyhow::Result;
use rom64_core::checksum::{self, CHECKSUM_END};
use rom64_core::{CicKind, Error, FileByteOrder, RomFile};

use common::*;

#[test]
fn golden_checksums_per_variant() -> Result<()> {
    let image = xorshift_image(ROM_LEN);

    let cases = [
        (CicKind::Cic6101, GOLDEN_6102),
        (CicKind::Cic6102, GOLDEN_6102),
        (CicKind::Cic7102, GOLDEN_6102),
        (CicKind::Cic6103, GOLDEN_6103),
        (CicKind::Cic6105, GOLDEN_6105),
        (CicKind::Cic6106, GOLDEN_6106),
        (CicKind::Unknown, GOLDEN_UNKNOWN),
        (CicKind::Cic8303, GOLDEN_UNKNOWN),
    ];
    for (cic, expected) in cases {
        let pair = checksum::calculate(&image, cic.checksum_params())?;
        assert_eq!(pair, expected, "CIC {cic:?}");
    }
    Ok(())
}

#[test]
fn golden_checksum_hex_rendering() -> Result<()> {
    let image = xorshift_image(ROM_LEN);
    let pair = checksum::calculate(&image, CicKind::Cic6102.checksum_params())?;
    assert_eq!(pair.crc1_hex(), "50F87305");
    assert_eq!(pair.crc2_hex(), "C42613B2");
    Ok(())
}

#[test]
fn pipeline_identifies_cic_and_recomputes_checksum() -> Result<()> {
    let cases = [
        (BOOT_SUFFIX_6102, CicKind::Cic6102, GOLDEN_6102),
        (BOOT_SUFFIX_6105, CicKind::Cic6105, GOLDEN_6105),
        (BOOT_SUFFIX_6106, CicKind::Cic6106, GOLDEN_6106),
    ];

    for (suffix, cic, expected) in cases {
        let canonical = build_rom(Some(suffix));
        for order in FileByteOrder::ALL {
            let bytes = in_order(&canonical, order);

            let mut rom = RomFile::from_reader(&mut Cursor::new(&bytes))?;
            assert_eq!(rom.file.byte_order, order);
            assert_eq!(rom.cic, cic, "{order}");
            assert_eq!(rom.header.title, "SUPER MARIO 64");
            assert_eq!(rom.serial().as_str(), "NSME");

            let pair = rom.compute_checksum_from(&mut Cursor::new(&bytes))?;
            assert_eq!(pair, expected, "{cic:?} in {order}");
        }
    }
    Ok(())
}

#[test]
fn unknown_boot_code_still_checksums() -> Result<()> {
    let bytes = build_rom(None);
    let mut rom = RomFile::from_reader(&mut Cursor::new(&bytes))?;
    assert_eq!(rom.cic, CicKind::Unknown);
    assert_eq!(rom.cic.name(), "");

    let pair = rom.compute_checksum_from(&mut Cursor::new(&bytes))?;
    assert_eq!(pair, GOLDEN_UNKNOWN);
    Ok(())
}

#[test]
fn plain_boot_segment_fingerprint() -> Result<()> {
    let bytes = build_rom(None);
    let decoded = rom64_core::RomHeader::read_from(&mut Cursor::new(&bytes))?;
    assert_eq!(decoded.boot.crc32(), PLAIN_BOOT_CRC);
    Ok(())
}

#[test]
fn header_checksum_cross_check() -> Result<()> {
    let mut bytes = build_rom(Some(BOOT_SUFFIX_6102));
    set_header_checksum(&mut bytes, GOLDEN_6102);

    let mut rom = RomFile::from_reader(&mut Cursor::new(&bytes))?;
    assert_eq!(rom.checksum_status(), None);
    rom.compute_checksum_from(&mut Cursor::new(&bytes))?;
    assert_eq!(rom.checksum_status(), Some(true));

    // Same image, tampered byte inside the window.
    bytes[0x2000] ^= 0xFF;
    let mut rom = RomFile::from_reader(&mut Cursor::new(&bytes))?;
    rom.compute_checksum_from(&mut Cursor::new(&bytes))?;
    assert_eq!(rom.checksum_status(), Some(false));
    Ok(())
}

#[test]
fn short_file_identifies_but_cannot_checksum() -> Result<()> {
    let mut bytes = build_rom(Some(BOOT_SUFFIX_6102));
    bytes.truncate(CHECKSUM_END - 4);

    let mut rom = RomFile::from_reader(&mut Cursor::new(&bytes))?;
    assert_eq!(rom.cic, CicKind::Cic6102);
    let err = rom
        .compute_checksum_from(&mut Cursor::new(&bytes))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientData { expected, actual }
            if expected == CHECKSUM_END && actual == CHECKSUM_END - 4
    ));
    assert_eq!(rom.checksum, None);
    Ok(())
}

#[test]
fn from_path_fills_file_info() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Super Mario 64 (USA).n64");
    let canonical = build_rom(Some(BOOT_SUFFIX_6102));
    std::fs::write(&path, in_order(&canonical, FileByteOrder::WordSwapped))?;

    let mut rom = RomFile::from_path(&path)?;
    assert_eq!(rom.file.name, "Super Mario 64 (USA).n64");
    assert_eq!(rom.file.size, ROM_LEN as u64);
    assert_eq!(rom.file.size_mbytes(), 1);
    assert_eq!(rom.file.byte_order, FileByteOrder::WordSwapped);
    assert_eq!(rom.compute_checksum()?, GOLDEN_6102);
    Ok(())
}

#[test]
fn from_file_reads_open_handle() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("game.v64");
    let canonical = build_rom(Some(BOOT_SUFFIX_6106));
    std::fs::write(&path, in_order(&canonical, FileByteOrder::HalfwordSwapped))?;

    let mut file = std::fs::File::open(&path)?;
    let mut rom = RomFile::from_file(&mut file)?;
    assert_eq!(rom.file.size, ROM_LEN as u64);
    assert_eq!(rom.file.name, "");
    assert_eq!(rom.file.path, None);
    assert_eq!(rom.file.byte_order, FileByteOrder::HalfwordSwapped);
    assert_eq!(rom.cic, CicKind::Cic6106);

    file.seek(SeekFrom::Start(0))?;
    assert_eq!(rom.compute_checksum_from(&mut file)?, GOLDEN_6106);
    Ok(())
}

#[test]
fn convert_then_decode_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("game.v64");
    let dest = dir.path().join("game.z64");
    let canonical = build_rom(Some(BOOT_SUFFIX_6105));
    std::fs::write(&source, in_order(&canonical, FileByteOrder::HalfwordSwapped))?;

    rom64_core::convert::convert_file(&source, &dest)?;
    assert_eq!(std::fs::read(&dest)?, canonical);

    let rom = RomFile::from_path(&dest)?;
    assert_eq!(rom.file.byte_order, FileByteOrder::Canonical);
    assert_eq!(rom.cic, CicKind::Cic6105);

    let err = rom64_core::convert::convert_file(&dest, &dir.path().join("again.z64"))
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyCanonical));
    Ok(())
}
