use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    error::AppError,
    management::TokenManager,
    server::AppState,
    types::{ResourceBody, Route, Step},
};

use super::current_session;

pub async fn playlists(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let Some(session) = current_session(&state, &jar).await else {
        return Ok(Redirect::to(Route::Login.path()).into_response());
    };
    let record = session.lock().await;

    match TokenManager::new(&state.spotify)
        .fetch_playlists(&record)
        .await?
    {
        Step::Done(ResourceBody { content_type, body }) => {
            let content_type = content_type.unwrap_or_else(|| "application/json".to_string());
            Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
        }
        Step::Redirect(route) => {
            tracing::debug!(to = route.path(), "Playlists not reachable yet");
            Ok(Redirect::to(route.path()).into_response())
        }
    }
}
