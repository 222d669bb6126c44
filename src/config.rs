//! Deployment-time client configuration, read once at process start.
//! Mirrors the env-driven setup used by the server deployments: every knob is
//! an environment variable with a workable default for local development.

use std::path::{Path, PathBuf};

pub const BACKEND_URL_VAR: &str = "HEXABID_BACKEND_URL";
pub const STATE_DIR_VAR: &str = "HEXABID_STATE_DIR";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_STATE_DIR: &str = ".hexabid";

/// Fixed API prefix appended to the backend base address.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address without the `/api` prefix.
    pub backend_url: String,
    /// Directory for durable client state (the persisted bearer token).
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let backend_url = std::env::var(BACKEND_URL_VAR)
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let state_dir = std::env::var(STATE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR));
        Self { backend_url, state_dir }
    }

    pub fn new<S: Into<String>, P: Into<PathBuf>>(backend_url: S, state_dir: P) -> Self {
        Self { backend_url: backend_url.into(), state_dir: state_dir.into() }
    }

    /// Base address plus the fixed `/api` prefix, without a trailing slash.
    pub fn api_base(&self) -> String {
        let trimmed = self.backend_url.trim_end_matches('/');
        format!("{}{}", trimmed, API_PREFIX)
    }
}

// ---- Durable-state paths rooted at the state directory ----
#[inline]
pub fn token_path(state_dir: &Path) -> PathBuf { state_dir.join("token") }
