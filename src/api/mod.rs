//! # API Module
//!
//! HTTP endpoints of the spotyauth server. Each handler is a thin adapter: it
//! resolves the browser's session from the signed `sid` cookie, locks it, and
//! hands it to [`crate::management::TokenManager`] for the actual transition.
//!
//! ## Endpoints
//!
//! - [`index`] - static welcome page linking to `/login`
//! - [`login`] - redirects to the Spotify consent screen
//! - [`callback`] - receives `code` or `error` from Spotify and exchanges the code
//! - [`playlists`] - returns the user's playlists or redirects to the step that
//!   has to happen first
//! - [`refresh_token`] - renews an expired access token
//! - [`health`] - status, version and live session count
//!
//! ## Sessions
//!
//! `/login` and `/callback` assign a session cookie when the browser has none.
//! `/playlists` and `/refresh-token` never create sessions: without a known
//! cookie they redirect to `/login`. Cookies failing signature verification are
//! treated as absent.

mod callback;
mod health;
mod index;
mod login;
mod playlists;
mod refresh;

pub use callback::callback;
pub use health::health;
pub use index::index;
pub use login::login;
pub use playlists::playlists;
pub use refresh::refresh_token;

use std::sync::Arc;

use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use tokio::sync::Mutex;

use crate::{management::Session, server::AppState, utils};

pub const SESSION_COOKIE: &str = "sid";

fn session_id(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| utils::is_valid_session_id(id))
}

/// Returns the browser's session id, issuing a new cookie if it has none.
fn ensure_session_id(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(id) = session_id(&jar) {
        return (jar, id);
    }

    let id = utils::generate_session_id();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), id)
}

/// Looks up the browser's existing session without creating one.
async fn current_session(state: &AppState, jar: &SignedCookieJar) -> Option<Arc<Mutex<Session>>> {
    let id = session_id(jar)?;
    state.sessions.get(&id).await
}
