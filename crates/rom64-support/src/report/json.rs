use std::io::Write;

use rom64_core::RomFile;
use serde::Serialize;

use crate::error::SupportError;

#[derive(Debug, Serialize)]
struct FileRecord<'a> {
    name: &'a str,
    path: Option<String>,
    size: u64,
    size_mbytes: u64,
    format: &'static str,
    format_desc: &'static str,
    md5: Option<&'a str>,
    sha1: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RegionRecord {
    code: String,
    description: &'static str,
    video_system: &'static str,
}

#[derive(Debug, Serialize)]
struct ChecksumRecord {
    crc1: String,
    crc2: String,
}

#[derive(Debug, Serialize)]
struct RomRecord<'a> {
    file: FileRecord<'a>,
    rom_id: String,
    image_name: &'a str,
    media_format: String,
    media_format_desc: &'static str,
    cartridge_id: String,
    region: RegionRecord,
    version: String,
    cic: &'static str,
    header_checksum: ChecksumRecord,
    checksum: Option<ChecksumRecord>,
    checksum_matches: Option<bool>,
}

impl<'a> From<&'a RomFile> for RomRecord<'a> {
    fn from(rom: &'a RomFile) -> Self {
        let header = &rom.header;
        Self {
            file: FileRecord {
                name: &rom.file.name,
                path: rom
                    .file
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string()),
                size: rom.file.size,
                size_mbytes: rom.file.size_mbytes(),
                format: rom.file.byte_order.code(),
                format_desc: rom.file.byte_order.description(),
                md5: rom.file.md5.as_deref(),
                sha1: rom.file.sha1.as_deref(),
            },
            rom_id: rom.serial().to_string(),
            image_name: &header.title,
            media_format: header.media_format.to_string(),
            media_format_desc: header.media_format.description(),
            cartridge_id: header.cartridge_id_str(),
            region: RegionRecord {
                code: header.region.to_string(),
                description: header.region.description(),
                video_system: header.region.video_system().as_str(),
            },
            version: header.version_string(),
            cic: rom.cic.name(),
            header_checksum: ChecksumRecord {
                crc1: header.checksum.crc1_hex(),
                crc2: header.checksum.crc2_hex(),
            },
            checksum: rom.checksum.map(|pair| ChecksumRecord {
                crc1: pair.crc1_hex(),
                crc2: pair.crc2_hex(),
            }),
            checksum_matches: rom.checksum_status(),
        }
    }
}

pub(crate) fn write_one<W: Write + ?Sized>(out: &mut W, rom: &RomFile) -> Result<(), SupportError> {
    serde_json::to_writer_pretty(&mut *out, &RomRecord::from(rom))?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_all<W: Write + ?Sized>(
    out: &mut W,
    roms: &[RomFile],
) -> Result<(), SupportError> {
    let records: Vec<RomRecord<'_>> = roms.iter().map(RomRecord::from).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}
