//! Locating candidate dump files.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SupportError;

/// Extensions dumps are commonly distributed with.
pub const ROM_EXTENSIONS: &[&str] = &["bin", "rom", "d64", "n64", "u64", "v64", "z64"];

/// Case-insensitive extension check.
pub fn has_rom_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
        })
}

/// Probable ROM files at `path`.
///
/// A file is returned as-is when its extension matches; a directory yields
/// its direct children (no recursion), sorted by file name.
pub fn find_probable_roms<S: AsRef<str>>(
    path: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, SupportError> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(if has_rom_extension(path, extensions) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && has_rom_extension(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_extensions_case_insensitively() {
        assert!(has_rom_extension(Path::new("a/Game.Z64"), ROM_EXTENSIONS));
        assert!(has_rom_extension(Path::new("game.v64"), ROM_EXTENSIONS));
        assert!(!has_rom_extension(Path::new("game.nes"), ROM_EXTENSIONS));
        assert!(!has_rom_extension(Path::new("z64"), ROM_EXTENSIONS));
    }

    #[test]
    fn scans_one_directory_level() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.n64"), b"").unwrap();
        fs::write(root.join("a.z64"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("c.z64"), b"").unwrap();

        let found = find_probable_roms(root, ROM_EXTENSIONS).unwrap();
        assert_eq!(found, vec![root.join("a.z64"), root.join("b.n64")]);
    }

    #[test]
    fn single_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let rom = dir.path().join("game.v64");
        let other = dir.path().join("readme.md");
        fs::write(&rom, b"").unwrap();
        fs::write(&other, b"").unwrap();

        assert_eq!(find_probable_roms(&rom, ROM_EXTENSIONS).unwrap(), vec![rom]);
        assert!(find_probable_roms(&other, ROM_EXTENSIONS).unwrap().is_empty());
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_probable_roms(&dir.path().join("nope"), ROM_EXTENSIONS).unwrap_err();
        assert!(matches!(err, SupportError::Io(_)));
    }
}
