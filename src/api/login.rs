use axum::{extract::State, response::Redirect};
use axum_extra::extract::SignedCookieJar;

use crate::server::AppState;

use super::ensure_session_id;

/// Sends the browser to the Spotify consent screen.
///
/// The session cookie is set here so the callback lands in the same session.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    let (jar, _) = ensure_session_id(jar);
    let auth_url = state.spotify.authorize_url();

    tracing::debug!("Redirecting to authorization server");
    (jar, Redirect::to(auth_url.as_str()))
}
