use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Rom {
        path: PathBuf,
        source: rom64_core::Error,
    },

    #[error("Invalid DAT file: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid DAT attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid DAT escape sequence: {0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),

    #[error("Invalid DAT file: {0}")]
    InvalidDat(String),

    #[error("Directory scan failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid output format {0}")]
    InvalidOutputFormat(String),

    #[error("Invalid column(s): {}", .0.join(", "))]
    InvalidColumns(Vec<String>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SupportError {
    pub fn rom(path: impl Into<PathBuf>, source: rom64_core::Error) -> Self {
        Self::Rom {
            path: path.into(),
            source,
        }
    }

    /// The core error behind a per-file failure, if that is what this is.
    pub fn rom_error(&self) -> Option<&rom64_core::Error> {
        match self {
            Self::Rom { source, .. } => Some(source),
            _ => None,
        }
    }
}
