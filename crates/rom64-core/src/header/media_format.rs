use std::fmt;

use phf::phf_map;

static MEDIA_FORMATS: phf::Map<char, &'static str> = phf_map! {
    'N' => "Cartridge",
    'D' => "64DD Disk",
    'C' => "Cartridge for expandable game",
    'E' => "64DD Expansion",
    'Z' => "Aleck64 Cartridge",
};

/// Media format byte at header offset `0x3B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaFormat(pub u8);

impl MediaFormat {
    /// The code as a character, `None` when the byte is zero.
    pub fn code(self) -> Option<char> {
        (self.0 != 0).then_some(self.0 as char)
    }

    /// Human readable description, empty for unknown codes.
    pub fn description(self) -> &'static str {
        self.code()
            .and_then(|code| MEDIA_FORMATS.get(&code).copied())
            .unwrap_or("")
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}"),
            None => Ok(()),
        }
    }
}
