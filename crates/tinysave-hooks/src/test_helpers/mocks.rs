//! Mock store and client implementations for testing
//!
//! These mocks allow exercising the interceptor without a CMS host or a
//! network connection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use tinysave_core::{FileFingerprint, SettingsProvider, TinifySettings};
use tinysave_tinify::{Compressor, TinifyError, TinifyResult};

use crate::stores::{AttachmentStore, DocumentStore, FileStore};

/// Settings provider returning a fixed value on every resolve.
#[derive(Clone)]
pub struct FixedSettingsProvider {
    settings: TinifySettings,
}

impl FixedSettingsProvider {
    pub fn new(settings: TinifySettings) -> Self {
        Self { settings }
    }

    /// Enabled, api key `test-key`, allow-list `.webp,.png,.jpg,.jpeg`.
    pub fn default_enabled() -> Self {
        Self::new(TinifySettings {
            enabled: true,
            api_key: "test-key".to_string(),
            allowed_extensions: [".webp", ".png", ".jpg", ".jpeg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    pub fn disabled() -> Self {
        let mut provider = Self::default_enabled();
        provider.settings.enabled = false;
        provider
    }

    pub fn with_allowed_extensions(extensions: &[&str]) -> Self {
        let mut provider = Self::default_enabled();
        provider.settings.allowed_extensions =
            extensions.iter().map(|s| s.to_string()).collect();
        provider
    }
}

impl SettingsProvider for FixedSettingsProvider {
    fn resolve(&self) -> TinifySettings {
        self.settings.clone()
    }
}

/// Compressor mock recording every call.
pub struct MockCompressor {
    output: Option<Vec<u8>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl MockCompressor {
    /// Succeeds, returning the given buffer for every call.
    pub fn returning(output: Vec<u8>) -> Self {
        Self {
            output: Some(output),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an account error.
    pub fn failing() -> Self {
        Self {
            output: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(api_key, input_len)` of the most recent call.
    pub fn last_call(&self) -> Option<(String, usize)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Compressor for MockCompressor {
    async fn shrink(&self, api_key: &str, data: &[u8]) -> TinifyResult<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), data.len()));

        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Err(TinifyError::Account(
                "Too many requests - monthly limit exceeded".to_string(),
            )),
        }
    }
}

/// In-memory attachment store with lookup counters.
#[derive(Default)]
pub struct MockAttachmentStore {
    stored: Mutex<HashMap<Uuid, FileFingerprint>>,
    history: Mutex<HashMap<Uuid, FileFingerprint>>,
    stored_lookups: AtomicUsize,
    history_lookups: AtomicUsize,
}

impl MockAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stored(&self, attachment_id: Uuid, fingerprint: FileFingerprint) {
        self.stored
            .lock()
            .unwrap()
            .insert(attachment_id, fingerprint);
    }

    pub fn add_history(&self, attachment_guid: Uuid, fingerprint: FileFingerprint) {
        self.history
            .lock()
            .unwrap()
            .insert(attachment_guid, fingerprint);
    }

    pub fn stored_lookup_count(&self) -> usize {
        self.stored_lookups.load(Ordering::SeqCst)
    }

    pub fn history_lookup_count(&self) -> usize {
        self.history_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttachmentStore for MockAttachmentStore {
    async fn stored_fingerprint(&self, attachment_id: Uuid) -> Result<Option<FileFingerprint>> {
        self.stored_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.lock().unwrap().get(&attachment_id).cloned())
    }

    async fn latest_history_fingerprint(
        &self,
        attachment_guid: Uuid,
    ) -> Result<Option<FileFingerprint>> {
        self.history_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.lock().unwrap().get(&attachment_guid).cloned())
    }
}

/// Document store tracking which documents sit in a pending workflow step.
#[derive(Default)]
pub struct MockDocumentStore {
    pending: Mutex<HashSet<Uuid>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending_workflow(&self, document_id: Uuid) {
        self.pending.lock().unwrap().insert(document_id);
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn has_pending_workflow_step(&self, document_id: Uuid) -> Result<bool> {
        Ok(self.pending.lock().unwrap().contains(&document_id))
    }
}

/// In-memory file store for media and meta binaries.
#[derive(Default, Clone)]
#[allow(clippy::type_complexity)]
pub struct MockFileStore {
    media: Arc<Mutex<HashMap<(Uuid, Uuid, String), Vec<u8>>>>,
    meta: Arc<Mutex<HashMap<(Uuid, Uuid), Vec<u8>>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_media_binary(&self, site_id: Uuid, library_id: Uuid, path: &str, data: Vec<u8>) {
        self.media
            .lock()
            .unwrap()
            .insert((site_id, library_id, path.to_string()), data);
    }

    pub fn add_meta_binary(&self, site_id: Uuid, meta_file_id: Uuid, data: Vec<u8>) {
        self.meta
            .lock()
            .unwrap()
            .insert((site_id, meta_file_id), data);
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn load_media_binary(
        &self,
        site_id: Uuid,
        library_id: Uuid,
        path: &str,
    ) -> Result<Vec<u8>> {
        self.media
            .lock()
            .unwrap()
            .get(&(site_id, library_id, path.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("media binary not found: {}", path))
    }

    async fn load_meta_binary(&self, site_id: Uuid, meta_file_id: Uuid) -> Result<Vec<u8>> {
        self.meta
            .lock()
            .unwrap()
            .get(&(site_id, meta_file_id))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("meta binary not found: {}", meta_file_id))
    }
}
