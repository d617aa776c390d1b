//! Command line front end for `rom64-core` and `rom64-support`.

pub mod cli;
pub mod commands;
