//! earlysign-core
//!
//! Pure domain types and storage key conventions.
//! No I/O. This is the shared vocabulary of the earlysign workspace.

pub mod error;
pub mod models;
pub mod storage_keys;
