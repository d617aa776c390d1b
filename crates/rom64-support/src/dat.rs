//! Logiqx / No-Intro style XML DAT catalogs.
//!
//! Only the parts the validator needs are read:
//!
//! ```xml
//! <datafile>
//!   <header><name>Nintendo - Nintendo 64</name><version>20240101</version></header>
//!   <game name="Super Mario 64 (USA)">
//!     <rom name="Super Mario 64 (USA).z64" size="8388608" crc32="3ce60709"
//!          md5="20b854b239203baf6c961b850a4a51a2"
//!          sha1="9bef1128717f958171a4afac3ed78ee2bb4e86ce" serial="NSME" status="verified"/>
//!   </game>
//! </datafile>
//! ```

use std::fs;
use std::path::Path;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use rom64_core::CatalogEntry;
use tracing::debug;

use crate::error::SupportError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatFile {
    pub name: String,
    pub version: String,
    pub entries: Vec<CatalogEntry>,
}

impl DatFile {
    pub fn read_from_file(path: &Path) -> Result<Self, SupportError> {
        let xml = fs::read_to_string(path)?;
        let dat = Self::parse(&xml)?;
        debug!(
            path = %path.display(),
            name = %dat.name,
            version = %dat.version,
            entries = dat.entries.len(),
            "loaded DAT file"
        );
        Ok(dat)
    }

    pub fn parse(xml: &str) -> Result<Self, SupportError> {
        let mut reader = Reader::from_str(xml);

        let mut dat = DatFile::default();
        let mut stack: Vec<Vec<u8>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if e.name().as_ref() == b"rom" && in_game(&stack) {
                        dat.entries.push(parse_rom(&e)?);
                    }
                    stack.push(e.name().as_ref().to_vec());
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"rom" && in_game(&stack) {
                        dat.entries.push(parse_rom(&e)?);
                    }
                }
                Event::Text(text) => {
                    if let Some(field) = header_text(&mut dat, &stack) {
                        field.push_str(&String::from_utf8_lossy(&text.into_inner()));
                    }
                }
                Event::GeneralRef(entity) => {
                    if let Some(field) = header_text(&mut dat, &stack) {
                        push_entity(field, &String::from_utf8_lossy(&entity));
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SupportError::InvalidDat(format!(
                "unclosed element <{}>",
                String::from_utf8_lossy(stack.last().map(Vec::as_slice).unwrap_or_default())
            )));
        }
        dat.name = dat.name.trim().to_string();
        dat.version = dat.version.trim().to_string();
        Ok(dat)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries for a serial such as `NSME` or `CZLP`, ignoring case.
    pub fn find_by_serial(&self, serial: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.serial.eq_ignore_ascii_case(serial))
            .collect()
    }
}

fn in_game(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|name| name == b"game" || name == b"machine")
}

/// `name`/`version` when directly inside `<header>`.
fn header_field(stack: &[Vec<u8>]) -> Option<&[u8]> {
    match stack {
        [.., parent, field] if parent == b"header" => Some(field.as_slice()),
        _ => None,
    }
}

fn header_text<'a>(dat: &'a mut DatFile, stack: &[Vec<u8>]) -> Option<&'a mut String> {
    match header_field(stack) {
        Some(b"name") => Some(&mut dat.name),
        Some(b"version") => Some(&mut dat.version),
        _ => None,
    }
}

/// Append the text an entity reference such as `amp` or `#x26` stands for.
/// Unknown entities are kept verbatim.
fn push_entity(out: &mut String, name: &str) {
    let resolved = match name.strip_prefix('#') {
        Some(code) => {
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            value.and_then(char::from_u32).map(String::from)
        }
        None => resolve_predefined_entity(name).map(String::from),
    };
    match resolved {
        Some(text) => out.push_str(&text),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}

fn parse_rom(element: &BytesStart<'_>) -> Result<CatalogEntry, SupportError> {
    let mut entry = CatalogEntry::default();
    for attr in element.attributes() {
        let attr = attr?;
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)?.into_owned();
        match attr.key.as_ref() {
            b"name" => entry.name = value,
            b"size" => {
                entry.size = value.parse().map_err(|_| {
                    SupportError::InvalidDat(format!("invalid rom size {value:?}"))
                })?;
            }
            b"serial" => entry.serial = value,
            b"sha1" => entry.sha1 = value,
            b"md5" => entry.md5 = Some(value),
            b"crc" | b"crc32" => entry.crc32 = Some(value),
            b"status" => entry.status = Some(value),
            _ => {}
        }
    }
    Ok(entry)
}
