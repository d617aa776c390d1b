use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use rom64_support::report::OutputFormat;
use tracing::Level;

/// Nintendo 64 ROM utility
#[derive(Parser, Debug)]
#[command(name = "rom64", version)]
#[command(about = "Inspect, checksum, validate and convert Nintendo 64 ROM dumps", long_about = None)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a ROM file or every ROM in a directory
    Ls(LsArgs),
    /// Show everything known about one ROM file
    #[command(visible_alias = "stat")]
    Info(InfoArgs),
    /// Validate the hash of a ROM against a known-good DAT file
    Validate(ValidateArgs),
    /// Convert a ROM to native big-endian z64 format
    Convert(ConvertArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OutputArgs {
    /// Output format (text, table, csv, tab, json)
    #[arg(short, long, value_parser = OutputFormat::parse)]
    pub output: Option<OutputFormat>,

    /// Comma separated column ids for table, csv and tab output
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LsArgs {
    /// ROM file or directory
    pub path: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Also compute MD5 and SHA-1 of every file
    #[arg(long)]
    pub hashes: bool,

    /// Skip recomputing CRC1/CRC2
    #[arg(long)]
    pub no_checksum: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InfoArgs {
    /// ROM file
    pub path: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ValidateArgs {
    /// ROM file in z64 format
    pub path: PathBuf,

    /// DAT file (No-Intro XML)
    #[arg(short, long, env = "ROM64_DATFILE")]
    pub datfile: Option<PathBuf>,

    /// Rename validated files to match the name in the DAT file
    #[arg(long)]
    pub rename_validated: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConvertArgs {
    /// ROM file in v64 or n64 format
    pub path: PathBuf,

    /// Overwrite the destination file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Destination path (defaults to the source name with a .z64 extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// DAT file used to validate the converted file
    #[arg(short, long, env = "ROM64_DATFILE")]
    pub datfile: Option<PathBuf>,
}
