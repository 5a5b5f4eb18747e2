//! Configuration management for the spotyauth server.
//!
//! This module handles loading and validating configuration values from
//! environment variables and `.env` files. All values are read once at startup
//! into a [`Config`]; anything malformed is reported as a [`ConfigError`] so the
//! server never starts with a half-valid setup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;
use url::Url;

pub const CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const API_URL: &str = "SPOTIFY_API_URL";
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const TOKEN_EXPIRY_LEEWAY_SECS: &str = "TOKEN_EXPIRY_LEEWAY_SECS";
pub const SESSION_SECRET: &str = "SESSION_SECRET";

const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Minimum length of a user supplied cookie signing secret.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file: {0}")]
    EnvFile(String),

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{key} is not a valid socket address ({value}): {source}")]
    InvalidAddress {
        key: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("SESSION_SECRET must be at least 64 bytes long")]
    WeakSessionSecret,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Url,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: Url,
    pub server_addr: SocketAddr,
    pub http_timeout: Duration,
    pub expiry_leeway: Duration,
    pub session_secret: Option<String>,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset, so a blank line in a `.env` file falls
    /// back to the default (or fails for required keys).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get(CLIENT_ID).ok_or(ConfigError::Missing(CLIENT_ID))?;
        let client_secret = get(CLIENT_SECRET).ok_or(ConfigError::Missing(CLIENT_SECRET))?;

        let url = |key: &'static str, default: &str| {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { key, source })
        };

        let seconds = |key: &'static str, default: u64| match get(key) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
            None => Ok(Duration::from_secs(default)),
        };

        let raw_addr = get(SERVER_ADDRESS).unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr =
            raw_addr
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidAddress {
                    key: SERVER_ADDRESS,
                    value: raw_addr.clone(),
                    source,
                })?;

        let session_secret = get(SESSION_SECRET);
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SESSION_SECRET_LEN {
                return Err(ConfigError::WeakSessionSecret);
            }
        }

        Ok(Config {
            client_id,
            client_secret,
            redirect_uri: url(REDIRECT_URI, DEFAULT_REDIRECT_URI)?,
            auth_url: url(AUTH_URL, DEFAULT_AUTH_URL)?,
            token_url: url(TOKEN_URL, DEFAULT_TOKEN_URL)?,
            api_url: url(API_URL, DEFAULT_API_URL)?,
            server_addr,
            http_timeout: seconds(HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?,
            expiry_leeway: seconds(TOKEN_EXPIRY_LEEWAY_SECS, 0)?,
            session_secret,
        })
    }
}

/// Loads environment variables from `.env` files.
///
/// The working directory `.env` is read first, then `spotyauth/.env` in the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/spotyauth/.env`
/// - macOS: `~/Library/Application Support/spotyauth/.env`
/// - Windows: `%LOCALAPPDATA%/spotyauth/.env`
///
/// `dotenv` never overrides variables that are already set, so the shell always
/// wins. A missing data-directory file is not an error; an unreadable or
/// unparsable one is.
pub async fn load_env() -> Result<(), ConfigError> {
    let _ = dotenv::dotenv();

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotyauth/.env");
    path
}
