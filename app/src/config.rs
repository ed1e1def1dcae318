//! FILENAME: app/src/config.rs
//! PURPOSE: Backend configuration - the base URL / API key pair.
//! CONTEXT: The pair is only used to decide whether a remote backend exists
//! at all and to build public storage URLs for staff photos. An absent
//! configuration is a first-class degraded mode: data sources yield
//! permanently-empty values instead of erroring.

use once_cell::sync::Lazy;

pub const BACKEND_URL_ENV: &str = "MEIBO_BACKEND_URL";
pub const BACKEND_KEY_ENV: &str = "MEIBO_BACKEND_KEY";

/// Public storage path for staff photos, relative to the backend base URL.
const PHOTO_STORAGE_PATH: &str = "storage/v1/object/public/photos";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        BackendConfig {
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// The degraded no-backend mode.
    pub fn unconfigured() -> Self {
        BackendConfig::default()
    }

    /// Reads the URL/key pair from the environment. Empty values count as
    /// absent.
    pub fn from_env() -> Self {
        fn non_empty(var: &str) -> Option<String> {
            std::env::var(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        BackendConfig {
            base_url: non_empty(BACKEND_URL_ENV),
            api_key: non_empty(BACKEND_KEY_ENV),
        }
    }

    /// True when both halves of the pair are present.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Public URL of a stored staff photo, `None` when unconfigured.
    pub fn photo_url(&self, file: &str) -> Option<String> {
        let base = self.base_url.as_deref()?;
        Some(format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            PHOTO_STORAGE_PATH,
            file
        ))
    }
}

/// Process-wide configuration, read from the environment once at startup.
static BACKEND_CONFIG: Lazy<BackendConfig> = Lazy::new(BackendConfig::from_env);

pub fn backend_config() -> &'static BackendConfig {
    &BACKEND_CONFIG
}
