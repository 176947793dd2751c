//! Core types for OmniProf calendar interchange.
//!
//! This crate provides:
//! - `event` types for draft and persisted calendar events
//! - `ics` parsing and generation of .ics documents
//! - `store` the storage collaborator used by import/export
//! - `interchange` import/export glue between .ics text and a store

pub mod classify;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod interchange;
pub mod store;

pub use error::{OmniprofError, OmniprofResult};
pub use event::*;
