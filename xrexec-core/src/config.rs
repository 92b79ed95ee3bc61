//! # Configuration
//!
//! Loading of the device [`ConnectionTarget`] and of the YANG paths payload used by `GetConfig`.
//!
//! The target file uses the key names of the IOS-XR gRPC tooling:
//!
//! ```json
//! {
//!     "Host": "router.example.net:57777",
//!     "User": "admin",
//!     "Password": "admin",
//!     "Cert": "ems.pem",
//!     "Domain": "ems.cisco.com",
//!     "Timeout": 10
//! }
//! ```
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': '{source}'")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: '{0}'")]
    Parse(#[from] serde_json::Error),
    #[error("Config is missing the target 'Host'")]
    MissingHost,
    #[error("Config 'Timeout' must be at least one second")]
    InvalidTimeout,
    #[error("Host '{0}' asks for TLS but the config has no 'Cert'")]
    TlsWithoutCert(String),
}

/// The YANG paths file could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Couldn't read file '{path}': '{source}'")]
pub struct InputError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Everything needed to open a session against one device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionTarget {
    /// `host:port` of the device gRPC server.
    ///
    /// A full URI is used as is. An `https://` URI needs `Cert`, the scheme alone does not
    /// turn TLS on.
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// PEM encoded CA certificate. The session uses TLS only when this is set.
    #[serde(default)]
    pub cert: Option<PathBuf>,
    /// Server name expected in the device certificate, when it differs from the host.
    #[serde(default)]
    pub domain: Option<String>,
    /// Connect and per-request deadline, in seconds. Zero is rejected.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ConnectionTarget {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let target: Self = serde_json::from_str(raw)?;

        if target.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }

        if target.timeout == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if target.cert.is_none() && target.host.to_ascii_lowercase().starts_with("https://") {
            return Err(ConfigError::TlsWithoutCert(target.host));
        }

        Ok(target)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Reads the YANG paths payload sent verbatim as `GetConfig` input.
pub fn read_yang_paths(path: impl AsRef<Path>) -> Result<String, InputError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| InputError {
        path: path.to_path_buf(),
        source,
    })
}
