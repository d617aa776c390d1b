use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rom64_core::convert::convert_file;
use rom64_support::batch::inspect;
use rom64_support::config::InspectOptions;

use super::load_dat;
use crate::cli::ConvertArgs;

pub(super) fn run(args: &ConvertArgs, out: &mut dyn Write) -> Result<()> {
    let source = &args.path;
    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| default_destination(source));

    if same_file(source, &dest) {
        bail!("output would overwrite the source file '{}'", source.display());
    }
    if !args.force && dest.exists() {
        bail!("output file already exists: '{}'", dest.display());
    }

    // Load the catalog up front so a bad DAT file fails before anything is written.
    let dat = args.datfile.as_deref().map(load_dat).transpose()?;

    convert_file(source, &dest)
        .with_context(|| format!("failed to convert {}", source.display()))?;
    writeln!(out, "Created {}", dest.display())?;

    let Some(dat) = dat else {
        return Ok(());
    };

    let rom = inspect(&dest, &InspectOptions::default().with_hashes(true).with_checksum(false))?;
    let outcome = rom.validate(dat.entries())?;
    let sha1 = rom.file.sha1.as_deref().unwrap_or_default();
    if outcome.matches.is_empty() {
        bail!("new file's SHA-1 {sha1} could not be validated against the DAT file");
    }
    writeln!(out, "New file's SHA-1 validated against the DAT file.")?;
    writeln!(out, "  OK {sha1}")?;
    writeln!(out, "Conversion complete.")?;
    Ok(())
}

/// `<dir>/<name without last extension>.z64`
fn default_destination(source: &Path) -> PathBuf {
    source.with_extension("z64")
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
