//! Device collaborator seams.
//!
//! The controller never talks to real device services directly. Permission,
//! picking, and persistent storage sit behind these traits so the upload
//! sequence can run against fakes in tests.

use async_trait::async_trait;

use crate::Result;

/// Result of a library-read permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// What the user chose when told library access is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChoice {
    Cancel,
    OpenSettings,
}

/// Options passed to the system media picker.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    /// Restrict the picker to images.
    pub images_only: bool,
    /// Offer square crop assistance before returning the asset.
    pub square_crop: bool,
    /// Re-encode quality in [0.0, 1.0], bounding payload size.
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            images_only: true,
            square_crop: true,
            quality: 0.5,
        }
    }
}

/// An image selected from the device library.
#[derive(Debug, Clone)]
pub struct PickedAsset {
    /// Image bytes as produced by the picker.
    pub data: Vec<u8>,
    /// Original filename, when the library knows one.
    pub file_name: Option<String>,
}

/// Access to the device media library.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Request library-read permission. Idempotent; safe to call on every
    /// upload attempt.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Present the system picker. `None` means the user cancelled.
    async fn pick_image(&self, options: &PickerOptions) -> Result<Option<PickedAsset>>;

    /// Open the system settings screen for this app.
    async fn open_settings(&self) -> Result<()>;
}

/// Blocking choice presented when permission was denied.
#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    async fn resolve_denied(&self) -> SettingsChoice;
}

/// Device-local persistent key/value storage.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Store `value` under `key`, overwriting any previous value.
    async fn persist(&self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`, `None` when nothing was stored.
    async fn read(&self, key: &str) -> Result<Option<String>>;
}
