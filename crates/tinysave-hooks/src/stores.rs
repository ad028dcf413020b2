//! Store trait abstractions over the host CMS
//!
//! These traits define the minimal read-only interface the interceptor
//! needs from the host: metadata baselines for change detection and binary
//! loading for records saved without their content in memory. Keeping them
//! as traits allows hook tests to run against in-memory mocks.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use tinysave_core::FileFingerprint;

/// Baseline lookups for attachments and their version history.
///
/// Both lookups are metadata-only by contract; implementations must not
/// fetch the stored binary.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Fingerprint of the currently stored attachment, if one exists.
    async fn stored_fingerprint(&self, attachment_id: Uuid) -> Result<Option<FileFingerprint>>;

    /// Fingerprint of the most recent history row sharing the attachment
    /// GUID, ordered by last-modified descending, limited to one row.
    async fn latest_history_fingerprint(
        &self,
        attachment_guid: Uuid,
    ) -> Result<Option<FileFingerprint>>;
}

/// Document/workflow lookups for attachment dispatch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether the owning document currently sits in a pending workflow
    /// step. When it does, attachment content is committed through the
    /// history mechanism instead.
    async fn has_pending_workflow_step(&self, document_id: Uuid) -> Result<bool>;
}

/// Underlying file storage, for media and meta files saved without their
/// binary in memory. Load failures propagate as errors.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Load a media file's bytes, keyed by site and library path.
    async fn load_media_binary(
        &self,
        site_id: Uuid,
        library_id: Uuid,
        path: &str,
    ) -> Result<Vec<u8>>;

    /// Load a meta file's bytes, keyed by site.
    async fn load_meta_binary(&self, site_id: Uuid, meta_file_id: Uuid) -> Result<Vec<u8>>;
}
