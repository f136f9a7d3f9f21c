//! Upload controller state machine.
//!
//! Orchestrates a single user-initiated upload:
//! permission check → asset selection → transfer → persistence.
//!
//! Every non-success branch returns to `Idle` without touching persisted
//! state, and no failure escapes `upload()` — outcomes are values, and the
//! details go to the log. Nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::device::{
    MediaLibrary, PermissionPrompt, PermissionStatus, PickerOptions, SettingsChoice, StateStore,
};
use crate::client::transport::UploadTransport;

/// Key the last uploaded URL is persisted under.
pub const PERSISTED_URL_KEY: &str = "uploadedImage";

/// Content type declared for the uploaded part. The picker re-encodes to
/// JPEG, so the part type is fixed rather than sniffed.
const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RequestingPermission,
    Picking,
    Uploading,
    Displaying(String),
}

/// How a single `upload()` invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Transfer and persistence succeeded; the URL is now displayed.
    Completed(String),
    /// Library permission was not granted; no network call was made.
    PermissionDenied,
    /// The user dismissed the picker without choosing an asset.
    Cancelled,
    /// Transfer or persistence failed; prior state is unchanged.
    Failed,
    /// Another upload was already in flight; this call was a no-op.
    Ignored,
}

/// Device-side upload orchestrator.
pub struct UploadController {
    library: Arc<dyn MediaLibrary>,
    prompt: Arc<dyn PermissionPrompt>,
    store: Arc<dyn StateStore>,
    transport: Arc<dyn UploadTransport>,
    options: PickerOptions,
    phase: Mutex<Phase>,
    in_flight: AtomicBool,
}

impl UploadController {
    /// Create a controller over the given device services and transport.
    pub fn new(
        library: Arc<dyn MediaLibrary>,
        prompt: Arc<dyn PermissionPrompt>,
        store: Arc<dyn StateStore>,
        transport: Arc<dyn UploadTransport>,
    ) -> Self {
        Self {
            library,
            prompt,
            store,
            transport,
            options: PickerOptions::default(),
            phase: Mutex::new(Phase::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Override the default picker options.
    pub fn with_picker_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Current observable state.
    pub fn phase(&self) -> Phase {
        self.phase.lock().unwrap().clone()
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock().unwrap() = phase;
    }

    /// Restore the last uploaded URL on app start.
    ///
    /// Reads persisted state only; no network call. Transitions straight to
    /// `Displaying` when a value exists, else stays `Idle`.
    pub async fn restore(&self) -> Option<String> {
        match self.store.read(PERSISTED_URL_KEY).await {
            Ok(Some(url)) => {
                self.set_phase(Phase::Displaying(url.clone()));
                Some(url)
            }
            Ok(None) => {
                self.set_phase(Phase::Idle);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read persisted upload URL: {}", e);
                self.set_phase(Phase::Idle);
                None
            }
        }
    }

    /// Run one upload sequence.
    ///
    /// A call while another upload is in flight is ignored; there is no
    /// concurrent-upload contract and no cancellation.
    pub async fn upload(&self) -> UploadOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("Upload already in flight, ignoring");
            return UploadOutcome::Ignored;
        }

        let outcome = self.run_upload().await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_upload(&self) -> UploadOutcome {
        // Permission
        self.set_phase(Phase::RequestingPermission);
        match self.library.request_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                tracing::debug!("Media library permission denied");
                if self.prompt.resolve_denied().await == SettingsChoice::OpenSettings {
                    if let Err(e) = self.library.open_settings().await {
                        tracing::warn!("Failed to open system settings: {}", e);
                    }
                }
                self.set_phase(Phase::Idle);
                return UploadOutcome::PermissionDenied;
            }
            Err(e) => {
                tracing::warn!("Permission request failed: {}", e);
                self.set_phase(Phase::Idle);
                return UploadOutcome::Failed;
            }
        }

        // Selection
        self.set_phase(Phase::Picking);
        let asset = match self.library.pick_image(&self.options).await {
            Ok(Some(asset)) => asset,
            Ok(None) => {
                tracing::debug!("No image selected");
                self.set_phase(Phase::Idle);
                return UploadOutcome::Cancelled;
            }
            Err(e) => {
                tracing::warn!("Image picker failed: {}", e);
                self.set_phase(Phase::Idle);
                return UploadOutcome::Failed;
            }
        };

        // Transfer
        self.set_phase(Phase::Uploading);
        let file_name = asset.file_name.clone().unwrap_or_default();
        let url = match self
            .transport
            .upload(asset.data, &file_name, UPLOAD_CONTENT_TYPE)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                self.set_phase(Phase::Idle);
                return UploadOutcome::Failed;
            }
        };

        // Persistence
        if let Err(e) = self.store.persist(PERSISTED_URL_KEY, &url).await {
            tracing::warn!("Failed to persist uploaded URL: {}", e);
            self.set_phase(Phase::Idle);
            return UploadOutcome::Failed;
        }

        tracing::debug!("Upload completed: {}", url);
        self.set_phase(Phase::Displaying(url.clone()));
        UploadOutcome::Completed(url)
    }
}
