//! Host-side plumbing shared by the CLI: configuration and errors

pub mod config;
pub mod error;
