//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server and store sections. Every section defaults sensibly so a completely
//! empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Subdirectory of the static directory holding uploaded images.
pub const IMAGES_SUBDIR: &str = "images";

/// URL path under which the static directory is served.
pub const STATIC_MOUNT: &str = "/static";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if let Some(ref url) = self.server.public_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                warnings.push(format!(
                    "server.public_url '{url}' has no http:// or https:// scheme; image URLs will be relative"
                ));
            }
        }

        if self.server.max_upload_bytes == 0 {
            warnings.push("server.max_upload_bytes is 0; every upload will be rejected".into());
        }

        if self.store.path.as_os_str().is_empty() {
            warnings.push("store.path is empty".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base address prefixed to image URLs. Derived from host/port when unset.
    pub public_url: Option<String>,
    /// Directory served under `/static`; images live in its `images/` child.
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            public_url: None,
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Base address clients should use to reach this server, without a
    /// trailing slash.
    pub fn base_url(&self) -> String {
        if let Some(ref url) = self.public_url {
            return url.trim_end_matches('/').to_string();
        }
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" | "" => "localhost",
            other => other,
        };
        format!("http://{host}:{}", self.port)
    }

    /// Directory uploaded images are written to.
    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.join(IMAGES_SUBDIR)
    }

    /// URL prefix every stored image name is appended to.
    pub fn images_url_prefix(&self) -> String {
        format!("{}{STATIC_MOUNT}/{IMAGES_SUBDIR}/", self.base_url())
    }
}

/// Announcement store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// CSV file holding every announcement.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("anuncios.csv"),
        }
    }
}
