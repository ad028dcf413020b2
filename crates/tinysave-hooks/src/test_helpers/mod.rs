//! Test helpers for hook tests

mod mocks;

pub use mocks::{
    FixedSettingsProvider, MockAttachmentStore, MockCompressor, MockDocumentStore, MockFileStore,
};
