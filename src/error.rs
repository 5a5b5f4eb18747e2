use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the Spotify accounts service or Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream answered {status}")]
    Status {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

/// Errors surfaced to the browser by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    AuthorizationDenied(String),

    #[error("callback carried neither `code` nor `error`")]
    MalformedCallback,

    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] SpotifyError),

    #[error("token refresh failed: {0}")]
    TokenRefresh(#[source] SpotifyError),

    #[error("playlist fetch failed: {0}")]
    Resource(#[source] SpotifyError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::AuthorizationDenied(_) => "authorization_denied",
            AppError::MalformedCallback => "malformed_callback",
            AppError::TokenExchange(_) => "token_exchange_failed",
            AppError::TokenRefresh(_) => "token_refresh_failed",
            AppError::Resource(_) => "resource_fetch_failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthorizationDenied(reason) => {
                tracing::info!(reason = %reason, "Authorization denied by user");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response()
            }
            AppError::MalformedCallback => {
                tracing::warn!("Callback without code or error");
                let body = json!({ "error": self.code(), "message": self.to_string() });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            // Upstream error status and body pass through untouched.
            AppError::Resource(SpotifyError::Status {
                status,
                content_type,
                body,
            }) => {
                tracing::warn!(status, "Web API rejected playlist request");
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let content_type = content_type.unwrap_or_else(|| "application/json".to_string());
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            AppError::TokenExchange(_) | AppError::TokenRefresh(_) | AppError::Resource(_) => {
                tracing::error!(error = %self, "Upstream call failed");
                let mut body = json!({ "error": self.code(), "message": self.to_string() });
                if let AppError::TokenExchange(SpotifyError::Status { status, .. })
                | AppError::TokenRefresh(SpotifyError::Status { status, .. }) = &self
                {
                    body["status"] = json!(status);
                }
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}
