//! Shared test fakes for the device collaborator traits.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use shutterbox::client::{
    MediaLibrary, PermissionPrompt, PermissionStatus, PickedAsset, PickerOptions, SettingsChoice,
    StateStore,
};
use shutterbox::Result;

/// Scripted media library: fixed permission answer, fixed picker result.
pub struct FakeLibrary {
    pub permission: PermissionStatus,
    pub asset: Option<PickedAsset>,
    pub permission_calls: AtomicUsize,
    pub pick_calls: AtomicUsize,
    pub settings_opened: AtomicBool,
}

impl FakeLibrary {
    pub fn granted_with(asset: PickedAsset) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            asset: Some(asset),
            permission_calls: AtomicUsize::new(0),
            pick_calls: AtomicUsize::new(0),
            settings_opened: AtomicBool::new(false),
        }
    }

    /// Permission granted, but the user dismisses the picker.
    pub fn granted_cancelling() -> Self {
        Self {
            asset: None,
            ..Self::granted_with(PickedAsset {
                data: vec![],
                file_name: None,
            })
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::granted_cancelling()
        }
    }
}

#[async_trait]
impl MediaLibrary for FakeLibrary {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn pick_image(&self, _options: &PickerOptions) -> Result<Option<PickedAsset>> {
        self.pick_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.asset.clone())
    }

    async fn open_settings(&self) -> Result<()> {
        self.settings_opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Scripted permission prompt with a call counter.
pub struct FakePrompt {
    pub choice: SettingsChoice,
    pub prompts: AtomicUsize,
}

impl FakePrompt {
    pub fn cancelling() -> Self {
        Self {
            choice: SettingsChoice::Cancel,
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn opening_settings() -> Self {
        Self {
            choice: SettingsChoice::OpenSettings,
            prompts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PermissionPrompt for FakePrompt {
    async fn resolve_denied(&self) -> SettingsChoice {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.choice
    }
}

/// In-memory key/value store standing in for device-local storage.
#[derive(Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn persist(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }
}

/// A small JPEG-ish payload for upload tests.
pub fn sample_asset() -> PickedAsset {
    PickedAsset {
        data: b"\xff\xd8\xff\xe0fake jpeg bytes".to_vec(),
        file_name: Some("photo.jpg".to_string()),
    }
}
