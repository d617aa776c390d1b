use std::fmt;

use phf::phf_map;

/// Video standard implied by the region code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoSystem {
    Ntsc,
    Pal,
    Unknown,
}

impl VideoSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ntsc => "NTSC",
            Self::Pal => "PAL",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for VideoSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static REGIONS: phf::Map<char, (&'static str, VideoSystem)> = phf_map! {
    '7' => ("Beta", VideoSystem::Unknown),
    'A' => ("JP/US", VideoSystem::Ntsc),
    'B' => ("BR", VideoSystem::Ntsc),
    'C' => ("CN", VideoSystem::Ntsc),
    'D' => ("DE", VideoSystem::Pal),
    'E' => ("US", VideoSystem::Ntsc),
    'F' => ("FR", VideoSystem::Pal),
    'G' => ("Gateway 64 (NTSC)", VideoSystem::Ntsc),
    'H' => ("NL", VideoSystem::Pal),
    'I' => ("IT", VideoSystem::Pal),
    'J' => ("JP", VideoSystem::Ntsc),
    'K' => ("KR", VideoSystem::Ntsc),
    'L' => ("Gateway 64 (PAL)", VideoSystem::Pal),
    'N' => ("CA", VideoSystem::Ntsc),
    'P' => ("EU", VideoSystem::Pal),
    'S' => ("ES", VideoSystem::Pal),
    'U' => ("AU", VideoSystem::Pal),
    'W' => ("NORDIC", VideoSystem::Pal),
    'X' => ("EU", VideoSystem::Pal),
    'Y' => ("EU", VideoSystem::Pal),
};

/// Destination region byte at header offset `0x3E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region(pub u8);

impl Region {
    pub fn code(self) -> Option<char> {
        (self.0 != 0).then_some(self.0 as char)
    }

    /// Region name, empty for codes missing from the table.
    pub fn description(self) -> &'static str {
        self.lookup().map(|(name, _)| name).unwrap_or("")
    }

    pub fn video_system(self) -> VideoSystem {
        self.lookup()
            .map(|(_, video)| video)
            .unwrap_or(VideoSystem::Unknown)
    }

    fn lookup(self) -> Option<(&'static str, VideoSystem)> {
        self.code().and_then(|code| REGIONS.get(&code).copied())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}"),
            None => Ok(()),
        }
    }
}
