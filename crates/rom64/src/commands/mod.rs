use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rom64_support::dat::DatFile;
use rom64_support::report::{self, Column, OutputFormat};

use crate::cli::{Command, OutputArgs};

mod convert;
mod info;
mod ls;
mod validate;

pub fn run(command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Ls(args) => ls::run(&args, out),
        Command::Info(args) => info::run(&args, out),
        Command::Validate(args) => validate::run(&args, out),
        Command::Convert(args) => convert::run(&args, out),
    }
}

/// Output format plus resolved columns; `fallback` applies when `-o` is absent.
fn output_selection(
    args: &OutputArgs,
    fallback: OutputFormat,
) -> Result<(OutputFormat, Vec<&'static Column>)> {
    let format = args.output.unwrap_or(fallback);
    if args.columns.is_empty() {
        return Ok((format, report::default_columns()));
    }
    let columns = report::resolve_columns(&args.columns)
        .map_err(|err| anyhow!("{err}\n\nAvailable columns:\n{}", report::column_help()))?;
    Ok((format, columns))
}

fn load_dat(path: &Path) -> Result<DatFile> {
    DatFile::read_from_file(path)
        .with_context(|| format!("failed to load DAT file {}", path.display()))
}
