//! Interceptable save records
//!
//! The host constructs one record per save operation and hands it to the
//! interceptor mutably; the interceptor overwrites the binary and size at
//! most once, and the host persists the record after the hook returns.
//! Persistence is never this library's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record kind, one per save-event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Attachment,
    AttachmentHistory,
    MediaFile,
    MetaFile,
}

/// An in-flight record captured from a "before insert/update" save event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaveRecord {
    /// Document attachment, fired when the owning page has no workflow.
    Attachment {
        id: Uuid,
        document_id: Uuid,
        guid: Uuid,
        site_id: Uuid,
        extension: String,
        size: i64,
        content_hash: Option<String>,
        binary: Vec<u8>,
    },
    /// Attachment version row, fired when the owning page is under workflow.
    AttachmentHistory {
        guid: Uuid,
        site_id: Uuid,
        extension: String,
        size: i64,
        last_modified: DateTime<Utc>,
        content_hash: Option<String>,
        binary: Vec<u8>,
    },
    /// Media-library file. The binary may be absent in flight and has to be
    /// loaded from the underlying file storage before compression.
    MediaFile {
        id: Uuid,
        site_id: Uuid,
        library_id: Uuid,
        path: String,
        extension: String,
        size: i64,
        binary: Option<Vec<u8>>,
    },
    /// Object meta file (thumbnails, icons). Same loading rule as media files.
    MetaFile {
        id: Uuid,
        site_id: Uuid,
        extension: String,
        size: i64,
        binary: Option<Vec<u8>>,
    },
}

/// Metadata-only view of a stored file, used as the change-detection
/// baseline. Deliberately carries no binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub size: i64,
    pub content_hash: Option<String>,
}

impl SaveRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            SaveRecord::Attachment { .. } => RecordKind::Attachment,
            SaveRecord::AttachmentHistory { .. } => RecordKind::AttachmentHistory,
            SaveRecord::MediaFile { .. } => RecordKind::MediaFile,
            SaveRecord::MetaFile { .. } => RecordKind::MetaFile,
        }
    }

    pub fn site_id(&self) -> Uuid {
        match self {
            SaveRecord::Attachment { site_id, .. }
            | SaveRecord::AttachmentHistory { site_id, .. }
            | SaveRecord::MediaFile { site_id, .. }
            | SaveRecord::MetaFile { site_id, .. } => *site_id,
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            SaveRecord::Attachment { extension, .. }
            | SaveRecord::AttachmentHistory { extension, .. }
            | SaveRecord::MediaFile { extension, .. }
            | SaveRecord::MetaFile { extension, .. } => extension,
        }
    }

    pub fn size(&self) -> i64 {
        match self {
            SaveRecord::Attachment { size, .. }
            | SaveRecord::AttachmentHistory { size, .. }
            | SaveRecord::MediaFile { size, .. }
            | SaveRecord::MetaFile { size, .. } => *size,
        }
    }

    /// Metadata fingerprint of the in-flight content.
    pub fn fingerprint(&self) -> FileFingerprint {
        match self {
            SaveRecord::Attachment {
                size, content_hash, ..
            }
            | SaveRecord::AttachmentHistory {
                size, content_hash, ..
            } => FileFingerprint {
                size: *size,
                content_hash: content_hash.clone(),
            },
            SaveRecord::MediaFile { size, .. } | SaveRecord::MetaFile { size, .. } => {
                FileFingerprint {
                    size: *size,
                    content_hash: None,
                }
            }
        }
    }

    /// Overwrite the record's binary and recorded size with the compressed
    /// result. The only mutation this library ever performs.
    pub fn replace_binary(&mut self, compressed: Vec<u8>) {
        let new_size = compressed.len() as i64;
        match self {
            SaveRecord::Attachment { binary, size, .. }
            | SaveRecord::AttachmentHistory { binary, size, .. } => {
                *binary = compressed;
                *size = new_size;
            }
            SaveRecord::MediaFile { binary, size, .. }
            | SaveRecord::MetaFile { binary, size, .. } => {
                *binary = Some(compressed);
                *size = new_size;
            }
        }
    }
}
