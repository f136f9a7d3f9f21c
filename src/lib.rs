//! Shutterbox - Photo Upload Pipeline
//!
//! Two collaborating halves of the same pipeline:
//! - The ingestion service ([`api`], [`services`]): accepts a single-file
//!   multipart upload, writes it to disk under a generated name, and serves
//!   stored files back as raw bytes.
//! - The upload controller ([`client`]): the device-side sequence of
//!   permission check, asset selection, multipart transfer, and persistence
//!   of the resulting URL across app launches.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
