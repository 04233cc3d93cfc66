//! earlysign-cli library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! config layer and the prompt flow without going through `main`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod state;
