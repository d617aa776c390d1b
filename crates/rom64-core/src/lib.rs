//! Nintendo 64 ROM dump inspection.
//!
//! The pipeline for a single dump is
//! byte order detection → header decoding → CIC identification → checksum
//! recomputation, with optional catalog validation once a content hash is
//! known. [`RomFile`] ties the stages together; each stage is also usable on
//! its own.

pub mod byte_order;
pub mod checksum;
pub mod cic;
pub mod convert;
pub mod error;
pub mod header;
pub mod rom;
pub mod validation;

pub use byte_order::FileByteOrder;
pub use checksum::ChecksumPair;
pub use cic::CicKind;
pub use error::Error;
pub use header::{RomHeader, Serial};
pub use rom::{FileInfo, RomFile};
pub use validation::{CatalogEntry, ValidationOutcome};

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::DEBUG)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }
}
