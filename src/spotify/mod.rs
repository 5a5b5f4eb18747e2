//! # Spotify Integration Module
//!
//! Outbound HTTP client for the two external collaborators of the server:
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! Token lifecycle (management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Accounts service: authorize URL, code exchange, token refresh
//!     └── Web API: current user's playlists
//!          ↓
//! HTTP Layer (reqwest)
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] builds the authorize URL and talks to the token endpoint with
//!   `grant_type=authorization_code` and `grant_type=refresh_token`. Client
//!   credentials travel in the form body.
//! - [`playlists`] issues the bearer-authenticated `GET /me/playlists` and hands
//!   the body back untouched.
//!
//! ## Error Types
//!
//! Every call returns [`SpotifyError`]: transport failures (including the
//! configured request timeout), non-2xx statuses with the upstream body kept for
//! pass-through, and undecodable token bodies. Nothing is retried.

pub mod auth;
pub mod playlists;

use std::sync::Arc;

use reqwest::{Client, Response, header::CONTENT_TYPE};

use crate::{config::Config, error::SpotifyError};

/// Shared handle to the accounts service and Web API.
///
/// Cloning is cheap: the underlying `reqwest::Client` pools connections behind
/// an `Arc`.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(SpotifyClient { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Returns the content type and body of a successful response, or the status,
/// content type and body otherwise.
async fn read_body(response: Response) -> Result<(Option<String>, String), SpotifyError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SpotifyError::Status {
            status: status.as_u16(),
            content_type,
            body,
        });
    }

    Ok((content_type, body))
}
