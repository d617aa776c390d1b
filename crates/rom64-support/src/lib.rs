pub mod batch;
pub mod config;
pub mod dat;
pub mod error;
pub mod finder;
pub mod hashing;
pub mod report;

pub use error::SupportError as Error;
