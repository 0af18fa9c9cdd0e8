// src/config.rs
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{HarnessError, Result};

/// TLS settings for the listening socket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TlsConfig {
    pub enabled: bool,
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key_path: PathBuf::from("./key.pem"),
            cert_path: PathBuf::from("./cert.pem"),
        }
    }
}

/// Immutable server configuration, built once at startup and handed to
/// the request handlers through `AppState`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The conjure executable.
    pub conjure_path: PathBuf,
    /// Where per-request temp files are written.
    pub work_dir: PathBuf,
    /// Directory holding the front-end assets.
    pub static_dir: PathBuf,
    /// Request paths that may be served from `static_dir`.
    pub allowed_paths: Vec<String>,
    /// Per-invocation limit for conjure; 0 disables it.
    pub tool_timeout_secs: u64,
    pub tls: TlsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            conjure_path: PathBuf::from("../conjure"),
            work_dir: PathBuf::from(".."),
            static_dir: PathBuf::from("."),
            allowed_paths: [
                "/",
                "/index.html",
                "/essenceInput.js",
                "/athanorWorker.js",
                "/athanor.js",
                "/athanor.wasm",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            tool_timeout_secs: 60,
            tls: TlsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration: defaults, then the TOML file named by
    /// `CONJURE_SERVER_CONFIG`, then individual environment variables.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("CONJURE_SERVER_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        check_loopback(&config.host)?;
        Ok(config)
    }

    /// Overrides fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CONJURE_SERVER_HOST") {
            check_loopback(&host)?;
            self.host = host;
        }
        if let Some(port) = lookup("CONJURE_SERVER_PORT") {
            self.port = port.trim().parse().map_err(|_| {
                HarnessError::Config(format!("CONJURE_SERVER_PORT is not a port number: {}", port))
            })?;
        }
        if let Some(path) = lookup("CONJURE_EXEC") {
            self.conjure_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("CONJURE_SERVER_WORK_DIR") {
            self.work_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("CONJURE_SERVER_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("CONJURE_TOOL_TIMEOUT_SECS") {
            self.tool_timeout_secs = secs.trim().parse().map_err(|_| {
                HarnessError::Config(format!("CONJURE_TOOL_TIMEOUT_SECS is not a number: {}", secs))
            })?;
        }
        if let Some(flag) = lookup("CONJURE_SERVER_TLS") {
            self.tls.enabled = parse_flag(&flag).ok_or_else(|| {
                HarnessError::Config(format!("CONJURE_SERVER_TLS is not a boolean: {}", flag))
            })?;
        }
        Ok(())
    }

    /// The positional CLI argument wins over every other source.
    pub fn with_conjure_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.conjure_path = path;
        }
        self
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }

    pub fn is_allowed(&self, path: &str) -> bool {
        self.allowed_paths.iter().any(|allowed| allowed == path)
    }
}

/// The server only ever listens on the local machine.
fn check_loopback(host: &str) -> Result<()> {
    let host = host.trim();
    let loopback = host.eq_ignore_ascii_case("localhost")
        || host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback());
    if loopback {
        Ok(())
    } else {
        Err(HarnessError::Config(format!(
            "host must be a loopback address, got: {}",
            host
        )))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
