use axum::{extract::State, response::Redirect};
use axum_extra::extract::SignedCookieJar;

use crate::{error::AppError, management::TokenManager, server::AppState, types::Route};

use super::current_session;

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Redirect, AppError> {
    let Some(session) = current_session(&state, &jar).await else {
        return Ok(Redirect::to(Route::Login.path()));
    };
    let mut record = session.lock().await;

    let next = TokenManager::new(&state.spotify)
        .refresh(&mut record)
        .await?;

    Ok(Redirect::to(next.path()))
}
