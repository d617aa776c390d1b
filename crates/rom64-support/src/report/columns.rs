//! Named columns for tabular output. The ids double as `--columns` selectors.

use rom64_core::RomFile;

use crate::error::SupportError;

pub struct Column {
    pub id: &'static str,
    pub header: &'static str,
    pub description: &'static str,
    value: fn(&RomFile) -> String,
}

impl Column {
    pub fn value(&self, rom: &RomFile) -> String {
        (self.value)(rom)
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column").field("id", &self.id).finish()
    }
}

pub static COLUMNS: &[Column] = &[
    Column {
        id: "file_name",
        header: "File Name",
        description: "File name on disk",
        value: |rom| rom.file.name.clone(),
    },
    Column {
        id: "file_format",
        header: "File Format",
        description: "File format code. One of: z64, v64, n64",
        value: |rom| rom.file.byte_order.code().to_string(),
    },
    Column {
        id: "file_format_desc",
        header: "File Format",
        description: "File format description. example: Big-endian",
        value: |rom| rom.file.byte_order.description().to_string(),
    },
    Column {
        id: "file_size_mbytes",
        header: "Size (MB)",
        description: "File size in megabytes. Always a whole number. example: 32",
        value: |rom| rom.file.size_mbytes().to_string(),
    },
    Column {
        id: "file_size_mbits",
        header: "Size (Mb)",
        description: "File size in megabits. Always a whole number. example: 256",
        value: |rom| rom.file.size_mbits().to_string(),
    },
    Column {
        id: "md5",
        header: "MD5",
        description: "MD5 hash of the file on disk. Lower-case hexadecimal.",
        value: |rom| rom.file.md5.clone().unwrap_or_default(),
    },
    Column {
        id: "sha1",
        header: "SHA1",
        description: "SHA-1 hash of the file on disk. Lower-case hexadecimal.",
        value: |rom| rom.file.sha1.clone().unwrap_or_default(),
    },
    Column {
        id: "image_name",
        header: "Image Name",
        description: "Image name / game title embedded in the ROM.",
        value: |rom| rom.header.title.clone(),
    },
    Column {
        id: "version",
        header: "Version",
        description: "Version of the ROM. example: 1.0, 1.1",
        value: |rom| rom.header.version_string(),
    },
    Column {
        id: "region",
        header: "Region",
        description: "Region description derived from the ROM ID.",
        value: |rom| rom.header.region.description().to_string(),
    },
    Column {
        id: "region_code",
        header: "Region",
        description: "Single character region code. example: E",
        value: |rom| rom.header.region.to_string(),
    },
    Column {
        id: "video_system",
        header: "Video",
        description: "Video system derived from the region. NTSC or PAL.",
        value: |rom| rom.header.region.video_system().to_string(),
    },
    Column {
        id: "cic",
        header: "CIC",
        description: "CIC chip type. example: 6102",
        value: |rom| rom.cic.name().to_string(),
    },
    Column {
        id: "crc1",
        header: "CRC1",
        description: "Recomputed CRC1, also known as 'CRC HI'. Empty when not computed.",
        value: |rom| rom.checksum.map(|pair| pair.crc1_hex()).unwrap_or_default(),
    },
    Column {
        id: "crc2",
        header: "CRC2",
        description: "Recomputed CRC2, also known as 'CRC LO'. Empty when not computed.",
        value: |rom| rom.checksum.map(|pair| pair.crc2_hex()).unwrap_or_default(),
    },
    Column {
        id: "header_crc1",
        header: "Header CRC1",
        description: "CRC1 as stored in the ROM header.",
        value: |rom| rom.header.checksum.crc1_hex(),
    },
    Column {
        id: "header_crc2",
        header: "Header CRC2",
        description: "CRC2 as stored in the ROM header.",
        value: |rom| rom.header.checksum.crc2_hex(),
    },
    Column {
        id: "rom_id",
        header: "Rom ID",
        description: "ROM ID / serial. example: NSME for Super Mario 64 (USA)",
        value: |rom| rom.serial().to_string(),
    },
];

pub const DEFAULT_COLUMNS: &[&str] = &[
    "image_name",
    "file_format",
    "file_size_mbytes",
    "rom_id",
    "version",
    "region",
    "cic",
    "crc1",
    "crc2",
    "md5",
    "file_name",
];

pub fn column(id: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|column| column.id == id)
}

/// Look up every id, failing with all unknown ids at once.
pub fn resolve_columns<S: AsRef<str>>(ids: &[S]) -> Result<Vec<&'static Column>, SupportError> {
    let mut resolved = Vec::with_capacity(ids.len());
    let mut invalid = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        match column(id) {
            Some(column) => resolved.push(column),
            None => invalid.push(id.to_string()),
        }
    }
    if invalid.is_empty() {
        Ok(resolved)
    } else {
        Err(SupportError::InvalidColumns(invalid))
    }
}

pub fn default_columns() -> Vec<&'static Column> {
    DEFAULT_COLUMNS.iter().filter_map(|id| column(id)).collect()
}

/// One line per column, sorted by id.
pub fn column_help() -> String {
    let mut lines: Vec<String> = COLUMNS
        .iter()
        .map(|column| format!("  {:<20} {}", column.id, column.description))
        .collect();
    lines.sort();
    lines.join("\n")
}

pub(crate) fn headers(columns: &[&Column]) -> Vec<String> {
    columns.iter().map(|column| column.header.to_string()).collect()
}

pub(crate) fn records(roms: &[RomFile], columns: &[&Column]) -> Vec<Vec<String>> {
    roms.iter()
        .map(|rom| columns.iter().map(|column| column.value(rom)).collect())
        .collect()
}
