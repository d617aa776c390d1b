//! Running the per-file pipeline over many dumps on a small worker pool.
//!
//! Every file is independent: workers pull paths from a shared job channel and
//! push outcomes onto a result channel. Nothing is reported until every file
//! has finished, and a failing file never stops its siblings.

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rom64_core::RomFile;
use tracing::{debug, warn};

use crate::config::InspectOptions;
use crate::error::SupportError;
use crate::hashing;

/// A file the pipeline gave up on.
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: SupportError,
}

/// Outcome of [`inspect_all`]: successes sorted by file name, failures by path.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub roms: Vec<RomFile>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the pipeline stages selected by `options` for one file.
pub fn inspect(path: &Path, options: &InspectOptions) -> Result<RomFile, SupportError> {
    let mut rom = RomFile::from_path(path).map_err(|err| SupportError::rom(path, err))?;
    if options.checksum {
        rom.compute_checksum()
            .map_err(|err| SupportError::rom(path, err))?;
    }
    if options.hashes {
        hashing::add_hashes(&mut rom).map_err(|err| match err {
            SupportError::Io(io) => SupportError::rom(path, io.into()),
            other => other,
        })?;
    }
    Ok(rom)
}

type Outcome = (PathBuf, Result<RomFile, SupportError>);

pub fn inspect_all(paths: &[PathBuf], options: &InspectOptions) -> Result<BatchReport, SupportError> {
    let (job_tx, job_rx) = unbounded::<PathBuf>();
    let (result_tx, result_rx) = unbounded::<Outcome>();

    for path in paths {
        // The receiver is alive for the whole function.
        let _ = job_tx.send(path.clone());
    }
    drop(job_tx);

    let workers = options.jobs.get().min(paths.len().max(1));
    debug!(files = paths.len(), workers, "starting batch inspection");

    thread::scope(|scope| -> Result<(), SupportError> {
        for id in 0..workers {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            thread::Builder::new()
                .name(format!("rom64-worker-{id}"))
                .spawn_scoped(scope, move || worker_loop(jobs, results, options))?;
        }
        Ok(())
    })?;
    drop(result_tx);

    let mut report = BatchReport::default();
    for (path, outcome) in result_rx {
        match outcome {
            Ok(rom) => report.roms.push(rom),
            Err(error) => {
                warn!("{error}");
                report.failures.push(BatchFailure { path, error });
            }
        }
    }

    report.roms.sort_by(|a, b| a.file.name.cmp(&b.file.name));
    report.failures.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(report)
}

fn worker_loop(jobs: Receiver<PathBuf>, results: Sender<Outcome>, options: &InspectOptions) {
    for path in jobs {
        let outcome = inspect(&path, options);
        if results.send((path, outcome)).is_err() {
            break;
        }
    }
}
