use std::io;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use rom64::cli::Args;
use rom64::commands;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(args.command, &mut out)
}
