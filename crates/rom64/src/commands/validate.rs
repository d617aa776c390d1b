use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use rom64_core::{CatalogEntry, RomFile};
use rom64_support::hashing;
use tracing::info;

use super::load_dat;
use crate::cli::ValidateArgs;

pub(super) fn run(args: &ValidateArgs, out: &mut dyn Write) -> Result<()> {
    let mut rom = RomFile::from_path(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let serial = rom.serial();
    if serial.is_empty() {
        bail!("ROM has no serial number, which is required to look it up in the DAT file");
    }

    let datfile = args
        .datfile
        .as_deref()
        .ok_or_else(|| anyhow!("no DAT file given; pass --datfile or set ROM64_DATFILE"))?;
    let dat = load_dat(datfile)?;

    hashing::add_hashes(&mut rom)?;
    let outcome = rom.validate(dat.entries())?;

    if outcome.matches.is_empty() {
        writeln!(out, "Could not find a checksum match.")?;
        writeln!(
            out,
            "File '{}' has SHA-1 {}",
            rom.file.name,
            rom.file.sha1.as_deref().unwrap_or_default()
        )?;
        writeln!(out, "The DAT file has the following entries for this ROM:")?;
        for entry in &outcome.mismatches {
            writeln!(out, "  SHA-1 {:<40} {}", entry.sha1, entry.name)?;
        }
        bail!("{} validation failed", args.path.display());
    }

    writeln!(
        out,
        "Found {} DAT file entries for ROM serial '{serial}'",
        outcome.matches.len()
    )?;
    for entry in &outcome.matches {
        writeln!(out, "SHA-1 MATCH  {:<40} \"{}\"", entry.sha1, entry.name)?;
    }

    let entry = outcome.unique_match(&serial)?;
    if args.rename_validated {
        rename_to_catalog_name(&rom, entry, out)?;
    }
    Ok(())
}

fn rename_to_catalog_name(rom: &RomFile, entry: &CatalogEntry, out: &mut dyn Write) -> Result<()> {
    if rom.file.name == entry.name {
        writeln!(out, "ROM file already has the correct name \"{}\"", entry.name)?;
        return Ok(());
    }

    if Path::new(&entry.name).file_name() != Some(OsStr::new(&entry.name)) {
        bail!("DAT file name \"{}\" is not a plain file name", entry.name);
    }
    let source = rom
        .file
        .path
        .as_deref()
        .ok_or_else(|| anyhow!("ROM was not loaded from a file"))?;
    let dest = source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&entry.name);

    if dest.exists() {
        bail!("destination file \"{}\" already exists", dest.display());
    }
    writeln!(out, "Renaming \"{}\" => \"{}\"", source.display(), dest.display())?;
    fs::rename(source, &dest)
        .with_context(|| format!("failed to rename {}", source.display()))?;
    info!("renamed {} -> {}", source.display(), dest.display());
    Ok(())
}
