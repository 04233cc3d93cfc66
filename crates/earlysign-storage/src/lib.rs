//! earlysign-storage
//!
//! Single-slot persistence for the latest assessment result. The storage
//! medium is injected through [`backend::SlotBackend`].

pub mod backend;
pub mod error;
pub mod store;
