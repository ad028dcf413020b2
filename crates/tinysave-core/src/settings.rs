//! Settings resolution
//!
//! Settings are resolved fresh on every save event; nothing is cached.
//! Hosts that keep their settings elsewhere (admin UI, database, secrets
//! manager) implement [`SettingsProvider`] and hand it to the interceptor;
//! [`EnvSettingsProvider`] is the fallback that reads process environment
//! variables.

use std::env;

use serde::{Deserialize, Serialize};

const DEFAULT_ALLOWED_EXTENSIONS: &str = ".webp,.png,.jpg,.jpeg";

/// Resolved compression settings for one save event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TinifySettings {
    /// When false, the interceptor is bypassed entirely.
    pub enabled: bool,
    /// Tinify API key. Get one from https://tinypng.com/developers.
    pub api_key: String,
    /// File extensions (e.g. ".jpg", ".png") eligible for compression.
    pub allowed_extensions: Vec<String>,
}

impl TinifySettings {
    /// Case-insensitive allow-list check. Blank extensions are never allowed.
    pub fn allows_extension(&self, extension: &str) -> bool {
        if extension.trim().is_empty() {
            return false;
        }
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Parse a delimited extension list. Delimiters: comma, semicolon, pipe, space.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '|', ' '])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Source of [`TinifySettings`], resolved once per save event.
pub trait SettingsProvider: Send + Sync {
    fn resolve(&self) -> TinifySettings;
}

/// Fallback provider reading process environment variables.
///
/// Keys: `TINYSAVE_ENABLED` (default true), `TINYSAVE_API_KEY` (default
/// empty), `TINYSAVE_ALLOWED_EXTENSIONS` (default `.webp,.png,.jpg,.jpeg`).
/// Missing or malformed values silently fall back to the defaults;
/// resolution never fails.
#[derive(Debug, Clone, Default)]
pub struct EnvSettingsProvider;

impl EnvSettingsProvider {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl SettingsProvider for EnvSettingsProvider {
    fn resolve(&self) -> TinifySettings {
        let enabled = env::var("TINYSAVE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .to_lowercase()
            .parse()
            .unwrap_or(true);

        let api_key = env::var("TINYSAVE_API_KEY").unwrap_or_default();

        let allowed_extensions = parse_extension_list(
            &env::var("TINYSAVE_ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
        );

        TinifySettings {
            enabled,
            api_key,
            allowed_extensions,
        }
    }
}
