use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::byte_order::FileByteOrder;
use crate::checksum::{self, ChecksumPair};
use crate::cic::CicKind;
use crate::error::Error;
use crate::header::{RomHeader, Serial};
use crate::validation::{self, CatalogEntry, ValidationOutcome};

/// Facts about the file on disk, as opposed to its header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File name without directory, empty when read from a bare stream.
    pub name: String,
    pub path: Option<PathBuf>,
    /// Size in bytes, `0` when unknown.
    pub size: u64,
    pub byte_order: FileByteOrder,
    /// Lowercase hex MD5 of the raw file, once computed.
    pub md5: Option<String>,
    /// Lowercase hex SHA-1 of the raw file, once computed.
    pub sha1: Option<String>,
}

impl FileInfo {
    /// Size in whole MiB. Cartridge images come in power-of-two megabyte sizes.
    pub fn size_mbytes(&self) -> u64 {
        self.size >> 20
    }

    /// Size in megabits, the unit cartridges are usually advertised in.
    pub fn size_mbits(&self) -> u64 {
        self.size_mbytes() * 8
    }
}

/// Everything known about a single dump.
#[derive(Debug, Clone)]
pub struct RomFile {
    pub file: FileInfo,
    pub header: RomHeader,
    pub cic: CicKind,
    /// Recomputed CRC1/CRC2, once [`RomFile::compute_checksum`] ran.
    pub checksum: Option<ChecksumPair>,
}

impl RomFile {
    /// Decode header and boot code from a stream positioned at file offset 0.
    pub fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error> {
        let decoded = RomHeader::read_from(reader)?;
        let cic = CicKind::identify(&decoded.boot);

        Ok(Self {
            file: FileInfo {
                name: String::new(),
                path: None,
                size: 0,
                byte_order: decoded.byte_order,
                md5: None,
                sha1: None,
            },
            header: decoded.header,
            cic,
            checksum: None,
        })
    }

    /// Decode an already open file from its current position, which should
    /// be offset 0. Name and path stay empty; size comes from the metadata.
    pub fn from_file(file: &mut File) -> Result<Self, Error> {
        let size = file.metadata()?.len();
        let mut rom = Self::from_reader(file)?;
        rom.file.size = size;
        Ok(rom)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let mut rom = Self::from_file(&mut file)?;
        rom.file.name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        rom.file.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            byte_order = %rom.file.byte_order,
            cic = rom.cic.name(),
            "loaded ROM header"
        );
        Ok(rom)
    }

    pub fn serial(&self) -> Serial {
        self.header.serial()
    }

    /// Recompute the header checksum from the file this record was loaded from.
    pub fn compute_checksum(&mut self) -> Result<ChecksumPair, Error> {
        let path = self.file.path.clone().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "ROM was not loaded from a file",
            ))
        })?;
        let mut file = File::open(path)?;
        self.compute_checksum_from(&mut file)
    }

    /// Recompute the header checksum from a stream positioned at offset 0.
    pub fn compute_checksum_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<ChecksumPair, Error> {
        let window = checksum::read_window(reader, self.file.byte_order)?;
        let pair = checksum::calculate(&window, self.cic.checksum_params())?;
        self.checksum = Some(pair);
        Ok(pair)
    }

    /// Whether the recomputed checksum equals the one stored in the header.
    /// `None` until the checksum has been computed.
    pub fn checksum_status(&self) -> Option<bool> {
        self.checksum.map(|pair| pair == self.header.checksum)
    }

    pub fn set_hashes(&mut self, md5: Option<String>, sha1: Option<String>) {
        self.file.md5 = md5;
        self.file.sha1 = sha1;
    }

    /// Look this dump up in `catalog` by serial and SHA-1.
    pub fn validate<'a>(
        &self,
        catalog: &'a [CatalogEntry],
    ) -> Result<ValidationOutcome<'a>, Error> {
        validation::validate(
            &self.serial(),
            self.file.byte_order,
            self.file.sha1.as_deref(),
            catalog,
        )
    }
}
