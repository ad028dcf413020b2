//! Tinysave host integration
//!
//! This crate wires the gate logic and the Tinify client into a single
//! save-event hook. The host calls [`SaveInterceptor::on_before_save`] from
//! its "before insert/update" notifications and persists the (possibly
//! mutated) record afterwards; everything the interceptor needs from the
//! host comes in through the store traits in [`stores`].

mod interceptor;
pub mod stores;
pub mod telemetry;
pub mod test_helpers;

pub use interceptor::SaveInterceptor;
pub use stores::{AttachmentStore, DocumentStore, FileStore};
