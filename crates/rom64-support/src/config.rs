use std::num::NonZeroUsize;
use std::thread;

use crate::finder::ROM_EXTENSIONS;

/// Which pipeline stages to run per file, and how wide to fan out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Worker threads for batch inspection.
    pub jobs: NonZeroUsize,
    /// Compute MD5/SHA-1 of the whole file.
    pub hashes: bool,
    /// Recompute CRC1/CRC2. Needs at least 0x101000 bytes.
    pub checksum: bool,
    /// Candidate extensions for directory scans, without the dot.
    pub extensions: Vec<String>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            jobs: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            hashes: false,
            checksum: true,
            extensions: ROM_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl InspectOptions {
    /// Override the worker count; `None` or `0` keeps the default.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        if let Some(jobs) = jobs.and_then(NonZeroUsize::new) {
            self.jobs = jobs;
        }
        self
    }

    pub fn with_hashes(mut self, hashes: bool) -> Self {
        self.hashes = hashes;
        self
    }

    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }
}
