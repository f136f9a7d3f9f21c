//! Device-side upload controller.
//!
//! The client half of the pipeline: permission check → asset selection →
//! multipart transfer → persistence of the returned URL across app starts.
//! Device services and the network sit behind narrow traits so the state
//! machine runs unmodified against fakes in tests.

mod controller;
mod device;
mod transport;

pub use controller::{Phase, UploadController, UploadOutcome, PERSISTED_URL_KEY};
pub use device::{
    MediaLibrary, PermissionPrompt, PermissionStatus, PickedAsset, PickerOptions, SettingsChoice,
    StateStore,
};
pub use transport::{HttpUploadTransport, UploadTransport};
