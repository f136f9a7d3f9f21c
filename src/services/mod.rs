//! Service layer for shutterbox.
//!
//! Contains the storage backend for uploaded assets:
//! - AssetStore (trait over put/get of raw bytes)
//! - DiskAssetStore (flat-directory filesystem implementation)

mod asset_store;

pub use asset_store::{AssetStore, DiskAssetStore};
