#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rom64_core::FileByteOrder;
use rom64_core::checksum::CHECKSUM_END;
use rom64_support::hashing;

/// Canonical image big enough to checksum, with a patterned body and a
/// header carrying `title` and the serial `N<id><region>`.
pub fn canonical_rom(title: &str, id: &[u8; 2], region: u8) -> Vec<u8> {
    let mut rom: Vec<u8> = (0..CHECKSUM_END)
        .map(|i| (i.wrapping_mul(31) ^ (i >> 9)) as u8)
        .collect();
    rom[..0x40].fill(0);
    rom[..4].copy_from_slice(&FileByteOrder::Canonical.signature());
    let title = title.as_bytes();
    rom[0x20..0x20 + title.len()].copy_from_slice(title);
    rom[0x3B] = b'N';
    rom[0x3C..0x3E].copy_from_slice(id);
    rom[0x3E] = region;
    rom
}

pub fn write_rom(dir: &Path, name: &str, canonical: &[u8], order: FileByteOrder) -> PathBuf {
    let mut bytes = canonical.to_vec();
    order.normalize(&mut bytes);
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

pub fn sha1_of(bytes: &[u8]) -> String {
    hashing::hash_reader(bytes).expect("hash").sha1
}

pub fn dat_xml(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<datafile>\n  <header>\n    <name>Test - Nintendo 64</name>\n    <version>1</version>\n  </header>\n",
    );
    for (name, serial, sha1) in entries {
        xml.push_str(&format!(
            "  <game name=\"{name}\">\n    <rom name=\"{name}.z64\" size=\"{CHECKSUM_END}\" sha1=\"{sha1}\" serial=\"{serial}\"/>\n  </game>\n"
        ));
    }
    xml.push_str("</datafile>\n");
    xml
}
