use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{
    Res, api,
    config::Config,
    management::SessionStore,
    spotify::SpotifyClient,
    success, warning,
};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub sessions: SessionStore,
    key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        // Length is validated when the config is loaded.
        let key = match &config.session_secret {
            Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|_| Key::generate()),
            None => Key::generate(),
        };

        Ok(AppState {
            spotify: SpotifyClient::new(Arc::new(config))?,
            sessions: SessionStore::new(),
            key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/playlists", get(api::playlists))
        .route("/refresh-token", get(api::refresh_token))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
///
/// With `open_browser` set, the root page is opened in the default browser
/// once the listener is up.
pub async fn start_api_server(config: Config, open_browser: bool) -> Res<()> {
    let addr = config.server_addr;
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = format!("http://{}/", listener.local_addr()?);
    success!("Listening on {}", url);
    tracing::info!(%addr, "Server started");

    if open_browser && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    axum::serve(listener, router(state)).await?;
    Ok(())
}
