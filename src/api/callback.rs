use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Redirect,
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    error::AppError,
    management::{Session, TokenManager},
    server::AppState,
    types::CallbackParams,
};

use super::ensure_session_id;

/// Completes the authorization-code flow.
///
/// `error` wins over `code` when Spotify sends both. A callback with neither,
/// or with a query that does not parse, is answered with `400` instead of
/// silence. A session record is only stored once an exchange has succeeded.
pub async fn callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(%rejection, "Unparsable callback query");
        AppError::MalformedCallback
    })?;

    if let Some(error) = params.error {
        return Err(AppError::AuthorizationDenied(error));
    }

    let Some(code) = params.code else {
        return Err(AppError::MalformedCallback);
    };

    let (jar, id) = ensure_session_id(jar);
    let manager = TokenManager::new(&state.spotify);

    // Re-login on a known session: the old token stays if the exchange fails.
    if let Some(session) = state.sessions.get(&id).await {
        let mut record = session.lock().await;
        let next = manager.exchange_code(&mut record, &code).await?;
        return Ok((jar, Redirect::to(next.path())));
    }

    let mut record = Session::default();
    let next = manager.exchange_code(&mut record, &code).await?;
    state.sessions.insert(&id, record).await;

    Ok((jar, Redirect::to(next.path())))
}
