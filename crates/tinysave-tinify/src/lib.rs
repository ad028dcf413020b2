//! Tinify compression client
//!
//! This crate defines the [`Compressor`] trait the save interceptor calls
//! through, plus the [`TinifyClient`] implementation speaking the Tinify
//! (TinyPNG) HTTP API.

mod client;
mod error;

pub use client::{Compressor, TinifyClient};
pub use error::{TinifyError, TinifyResult};
