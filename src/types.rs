use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body returned by the Spotify token endpoint for both grant types.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: u64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// Credentials held by an authenticated session.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Query parameters Spotify appends when redirecting back to `/callback`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Raw playlist listing as served by the Web API.
#[derive(Debug, Clone)]
pub struct ResourceBody {
    pub content_type: Option<String>,
    pub body: String,
}

/// Routes a handler can send the browser to instead of answering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    RefreshToken,
    Playlists,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::RefreshToken => "/refresh-token",
            Route::Playlists => "/playlists",
        }
    }
}

/// Outcome of a lifecycle step: either a result or a redirect to an earlier step.
#[derive(Debug)]
pub enum Step<T> {
    Done(T),
    Redirect(Route),
}
