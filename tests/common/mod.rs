#![allow(dead_code)]

use std::{collections::HashMap, sync::Once};

use httpmock::MockServer;
use reqwest::{
    Client, Response,
    header::{COOKIE, LOCATION, SET_COOKIE},
    redirect::Policy,
};
use spotyauth::{
    config::{self, Config},
    management::Session,
    server::{self, AppState},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Configuration pointing every Spotify endpoint at the mock server.
pub fn test_config(server: &MockServer) -> Config {
    test_config_with(server, &[])
}

pub fn test_config_with(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        (config::CLIENT_ID.to_string(), CLIENT_ID.to_string()),
        (config::CLIENT_SECRET.to_string(), CLIENT_SECRET.to_string()),
        (config::REDIRECT_URI.to_string(), REDIRECT_URI.to_string()),
        (config::AUTH_URL.to_string(), server.url("/authorize")),
        (config::TOKEN_URL.to_string(), server.url("/api/token")),
        (config::API_URL.to_string(), server.url("/v1")),
        (config::SERVER_ADDRESS.to_string(), "127.0.0.1:0".to_string()),
        (config::HTTP_TIMEOUT_SECS.to_string(), "5".to_string()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned()).expect("Test configuration should be valid.")
}

pub fn token_body(access: &str, refresh: Option<&str>, expires_in: u64) -> String {
    let mut body = serde_json::json!({
        "access_token": access,
        "token_type": "Bearer",
        "expires_in": expires_in,
        "scope": "user-read-private user-read-email",
    });
    if let Some(refresh) = refresh {
        body["refresh_token"] = serde_json::json!(refresh);
    }
    body.to_string()
}

/// A running server plus a browser-like client that does not follow redirects
/// and carries the session cookie by hand.
pub struct TestApp {
    pub base: String,
    pub state: AppState,
    pub client: Client,
    pub cookie: Option<String>,
}

impl TestApp {
    pub async fn spawn(config: Config) -> Self {
        setup_tracing();

        let state = AppState::new(config).expect("App state should build.");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Test listener should bind.");
        let addr = listener.local_addr().expect("Listener should have an address.");

        let app = server::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server should run.");
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Test client should build.");

        TestApp {
            base: format!("http://{}", addr),
            state,
            client,
            cookie: None,
        }
    }

    pub async fn get(&mut self, path_and_query: &str) -> Response {
        let mut request = self.client.get(format!("{}{}", self.base, path_and_query));
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.expect("Request to test server should succeed.");

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("Set-Cookie should be ASCII.")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string();
            self.cookie = Some(pair);
        }

        response
    }

    /// Every session record currently held by the server.
    pub async fn sessions(&self) -> Vec<Session> {
        self.state
            .sessions
            .snapshot()
            .await
            .into_iter()
            .map(|(_, session)| session)
            .collect()
    }

    /// The only authenticated session, if exactly one exists.
    pub async fn authenticated_session(&self) -> Option<Session> {
        let mut authenticated: Vec<Session> = self
            .sessions()
            .await
            .into_iter()
            .filter(Session::is_authenticated)
            .collect();

        match authenticated.len() {
            1 => authenticated.pop(),
            _ => None,
        }
    }
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("Redirect should carry a Location header.")
        .to_str()
        .expect("Location should be ASCII.")
        .to_string()
}
