//! Whole-file content digests.
//!
//! Catalogs identify dumps by the hash of the raw file, so these are computed
//! over every byte exactly as stored on disk. Both digests are fed from a
//! single streaming pass.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use md5::Md5;
use rom64_core::RomFile;
use sha1::{Digest, Sha1};

use crate::error::SupportError;

/// Lowercase hex digests of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigests {
    pub md5: String,
    pub sha1: String,
}

/// Sink that feeds every written byte to both digests.
#[derive(Default)]
struct DigestWriter {
    md5: Md5,
    sha1: Sha1,
}

impl Write for DigestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Digest::update(&mut self.md5, buf);
        Digest::update(&mut self.sha1, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<ContentDigests> {
    let mut digests = DigestWriter::default();
    io::copy(&mut reader, &mut digests)?;

    Ok(ContentDigests {
        md5: hex::encode(digests.md5.finalize()),
        sha1: hex::encode(digests.sha1.finalize()),
    })
}

pub fn hash_file(path: &Path) -> Result<ContentDigests, SupportError> {
    let file = File::open(path)?;
    Ok(hash_reader(file)?)
}

/// Hash the file `rom` was loaded from and record the digests on it.
pub fn add_hashes(rom: &mut RomFile) -> Result<(), SupportError> {
    let path = rom.file.path.clone().ok_or_else(|| {
        SupportError::Io(io::Error::new(
            ErrorKind::NotFound,
            "ROM was not loaded from a file",
        ))
    })?;
    let digests = hash_file(&path)?;
    rom.set_hashes(Some(digests.md5), Some(digests.sha1));
    Ok(())
}
