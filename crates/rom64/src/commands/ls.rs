use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use rom64_support::batch::{inspect, inspect_all};
use rom64_support::config::InspectOptions;
use rom64_support::finder::find_probable_roms;
use rom64_support::report::{self, OutputFormat};
use tracing::info;

use super::output_selection;
use crate::cli::LsArgs;

pub(super) fn run(args: &LsArgs, out: &mut dyn Write) -> Result<()> {
    let options = InspectOptions::default()
        .with_jobs(args.jobs)
        .with_hashes(args.hashes)
        .with_checksum(!args.no_checksum);

    if !args.path.is_dir() {
        let (format, columns) = output_selection(&args.output, OutputFormat::Text)?;
        let rom = inspect(&args.path, &options)?;
        report::print_one(out, &rom, format, &columns)?;
        return Ok(());
    }

    let (format, columns) = output_selection(&args.output, OutputFormat::Table)?;
    let paths = find_probable_roms(&args.path, &options.extensions)?;
    info!("inspecting {} files in {}", paths.len(), args.path.display());

    let batch = inspect_all(&paths, &options)?;
    report::print_all(out, &batch.roms, format, &columns)?;

    if !batch.is_clean() {
        let mut message = format!(
            "{} of {} files could not be read:",
            batch.failures.len(),
            paths.len()
        );
        for failure in &batch.failures {
            let _ = write!(message, "\n  {}", failure.error);
        }
        bail!(message);
    }
    Ok(())
}
