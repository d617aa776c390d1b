use std::io::Write;

use anyhow::Result;
use rom64_support::batch::inspect;
use rom64_support::config::InspectOptions;
use rom64_support::report::{self, OutputFormat};

use super::output_selection;
use crate::cli::InfoArgs;

pub(super) fn run(args: &InfoArgs, out: &mut dyn Write) -> Result<()> {
    let (format, columns) = output_selection(&args.output, OutputFormat::Text)?;
    let options = InspectOptions::default().with_hashes(true).with_checksum(true);
    let rom = inspect(&args.path, &options)?;
    report::print_one(out, &rom, format, &columns)?;
    Ok(())
}
