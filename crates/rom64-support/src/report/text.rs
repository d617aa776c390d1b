use std::io::{self, Write};

use rom64_core::RomFile;

pub(crate) fn write_record<W: Write + ?Sized>(out: &mut W, rom: &RomFile) -> io::Result<()> {
    let header = &rom.header;

    writeln!(out, "File:")?;
    writeln!(out, "  Name:    {}", rom.file.name)?;
    writeln!(out, "  Size:    {} MB", rom.file.size_mbytes())?;
    writeln!(
        out,
        "  Format:  {} ({})",
        rom.file.byte_order.code(),
        rom.file.byte_order.description()
    )?;
    if let Some(md5) = &rom.file.md5 {
        writeln!(out, "  MD5:     {md5}")?;
    }
    if let Some(sha1) = &rom.file.sha1 {
        writeln!(out, "  SHA1:    {sha1}")?;
    }
    writeln!(out)?;

    writeln!(out, "ROM:")?;
    writeln!(out, "  ID:        {}", rom.serial())?;
    writeln!(out, "  Title:     {}", header.title)?;
    writeln!(out, "  Media:     {}", header.media_format.description())?;
    writeln!(
        out,
        "  Region:    {} ({})",
        header.region.description(),
        header.region.video_system()
    )?;
    writeln!(out, "  Version:   {}", header.version_string())?;
    writeln!(out, "  CIC:       {}", rom.cic.name())?;
    match rom.checksum {
        Some(pair) => {
            let status = if rom.checksum_status() == Some(true) {
                "matches header"
            } else {
                "header differs"
            };
            writeln!(out, "  CRC 1:     {}", pair.crc1_hex())?;
            writeln!(out, "  CRC 2:     {}", pair.crc2_hex())?;
            writeln!(out, "  Header:    {} ({status})", header.checksum)?;
        }
        None => {
            writeln!(out, "  CRC 1:     {}", header.checksum.crc1_hex())?;
            writeln!(out, "  CRC 2:     {}", header.checksum.crc2_hex())?;
        }
    }
    Ok(())
}
