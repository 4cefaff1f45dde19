//! Command implementations for the CLI.
//!
//! Each command group lives in its own module.

pub mod browse;
pub mod init;
pub mod preferences;
pub mod problems;
pub mod toggle;
