//! The file-save interceptor
//!
//! One hook invocation per save event, awaited inline by the host. The hook
//! never returns an error: whatever goes wrong inside is logged and
//! swallowed, and the save proceeds with the original binary.

use std::sync::Arc;

use anyhow::Result;

use tinysave_core::{is_unchanged, SaveRecord, SettingsProvider, TinifySettings};
use tinysave_tinify::Compressor;

use crate::stores::{AttachmentStore, DocumentStore, FileStore};

const COMPONENT: &str = "tinysave";

/// Intercepts file-save events and compresses eligible binaries in place.
///
/// Holds no mutable state; safe to share behind `Arc` across concurrent
/// save operations. Settings are resolved fresh for every event.
pub struct SaveInterceptor {
    settings: Arc<dyn SettingsProvider>,
    compressor: Arc<dyn Compressor>,
    attachments: Arc<dyn AttachmentStore>,
    documents: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStore>,
}

impl SaveInterceptor {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        compressor: Arc<dyn Compressor>,
        attachments: Arc<dyn AttachmentStore>,
        documents: Arc<dyn DocumentStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        tracing::info!(component = COMPONENT, "file save interceptor initializing");
        Self {
            settings,
            compressor,
            attachments,
            documents,
            files,
        }
    }

    /// Before-save hook. Mutates the record's binary and size in place when
    /// compression applies; otherwise leaves it untouched. Never fails.
    pub async fn on_before_save(&self, record: &mut SaveRecord) {
        if let Err(err) = self.apply(record).await {
            tracing::error!(
                component = COMPONENT,
                site_id = %record.site_id(),
                kind = ?record.kind(),
                error = %format!("{err:#}"),
                "compression failed, save continues with the original binary"
            );
        }
    }

    async fn apply(&self, record: &mut SaveRecord) -> Result<()> {
        let settings = self.settings.resolve();

        if !settings.enabled {
            return Ok(());
        }

        if !settings.allows_extension(record.extension()) {
            return Ok(());
        }

        if let Some(compressed) = self.compress_if_changed(record, &settings).await? {
            tracing::info!(
                component = COMPONENT,
                site_id = %record.site_id(),
                kind = ?record.kind(),
                original_bytes = record.size(),
                compressed_bytes = compressed.len(),
                "binary compressed before save"
            );
            record.replace_binary(compressed);
        }

        Ok(())
    }

    /// Per-kind dispatch. Returns the compressed buffer when the record
    /// should be overwritten, `None` when a gate decided to skip.
    async fn compress_if_changed(
        &self,
        record: &SaveRecord,
        settings: &TinifySettings,
    ) -> Result<Option<Vec<u8>>> {
        match record {
            SaveRecord::Attachment {
                id,
                document_id,
                binary,
                ..
            } => {
                // Under workflow the content is committed through the
                // attachment-history event; compressing here too would
                // shrink the same bytes twice.
                if self.documents.has_pending_workflow_step(*document_id).await? {
                    return Ok(None);
                }

                let baseline = self.attachments.stored_fingerprint(*id).await?;
                if is_unchanged(Some(&record.fingerprint()), baseline.as_ref()) {
                    return Ok(None);
                }

                Ok(Some(self.shrink(settings, binary).await?))
            }

            SaveRecord::AttachmentHistory { guid, binary, .. } => {
                let baseline = self.attachments.latest_history_fingerprint(*guid).await?;
                if is_unchanged(Some(&record.fingerprint()), baseline.as_ref()) {
                    return Ok(None);
                }

                Ok(Some(self.shrink(settings, binary).await?))
            }

            // No change-detection baseline for media and meta files: every
            // save with an allowed extension is compressed.
            SaveRecord::MediaFile {
                site_id,
                library_id,
                path,
                binary,
                ..
            } => {
                let loaded;
                let data: &[u8] = match binary {
                    Some(bytes) => bytes,
                    None => {
                        loaded = self
                            .files
                            .load_media_binary(*site_id, *library_id, path)
                            .await?;
                        &loaded
                    }
                };

                Ok(Some(self.shrink(settings, data).await?))
            }

            SaveRecord::MetaFile {
                id,
                site_id,
                binary,
                ..
            } => {
                let loaded;
                let data: &[u8] = match binary {
                    Some(bytes) => bytes,
                    None => {
                        loaded = self.files.load_meta_binary(*site_id, *id).await?;
                        &loaded
                    }
                };

                Ok(Some(self.shrink(settings, data).await?))
            }
        }
    }

    async fn shrink(&self, settings: &TinifySettings, data: &[u8]) -> Result<Vec<u8>> {
        let compressed = self.compressor.shrink(&settings.api_key, data).await?;
        Ok(compressed)
    }
}
