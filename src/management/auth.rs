use chrono::{TimeDelta, Utc};

use crate::{
    error::AppError,
    spotify::SpotifyClient,
    types::{ResourceBody, Route, Step},
};

use super::state::{Session, TokenState};

/// Drives a session through the token lifecycle.
///
/// ```text
/// UNAUTHENTICATED --exchange--> VALID --(time)--> EXPIRED --refresh--> VALID
/// ```
///
/// Callers hand in the session already locked, so every transition below runs
/// to completion (outbound calls included) before anyone else touches it.
pub struct TokenManager<'a> {
    spotify: &'a SpotifyClient,
    leeway: TimeDelta,
}

impl<'a> TokenManager<'a> {
    pub fn new(spotify: &'a SpotifyClient) -> Self {
        let leeway =
            TimeDelta::from_std(spotify.config().expiry_leeway).unwrap_or(TimeDelta::zero());
        TokenManager { spotify, leeway }
    }

    pub fn state(&self, session: &Session) -> TokenState {
        session.state_at(Utc::now(), self.leeway)
    }

    /// Exchanges an authorization code and replaces the session's token.
    ///
    /// On failure the session keeps whatever it held before.
    pub async fn exchange_code(&self, session: &mut Session, code: &str) -> Result<Route, AppError> {
        let response = self
            .spotify
            .exchange_code(code)
            .await
            .map_err(AppError::TokenExchange)?;

        session
            .establish(response, Utc::now())
            .map_err(AppError::TokenExchange)?;

        tracing::info!("Authorization code exchanged");
        Ok(Route::Playlists)
    }

    /// Fetches the playlist listing, or names the step that has to run first.
    ///
    /// An expired access token is never sent upstream.
    pub async fn fetch_playlists(&self, session: &Session) -> Result<Step<ResourceBody>, AppError> {
        let token = match (self.state(session), session.token()) {
            (TokenState::Valid, Some(token)) => token,
            (TokenState::Expired, _) => return Ok(Step::Redirect(Route::RefreshToken)),
            _ => return Ok(Step::Redirect(Route::Login)),
        };

        let playlists = self
            .spotify
            .get_playlists(&token.access_token)
            .await
            .map_err(AppError::Resource)?;

        Ok(Step::Done(playlists))
    }

    /// Refreshes an expired access token.
    ///
    /// A still-valid token is left alone and the caller is sent straight on to
    /// the playlists; a session without a refresh token has to log in again.
    pub async fn refresh(&self, session: &mut Session) -> Result<Route, AppError> {
        let refresh_token = match (self.state(session), session.token()) {
            (TokenState::Expired, Some(token)) => token.refresh_token.clone(),
            (TokenState::Valid, _) => {
                tracing::debug!("Access token still valid, skipping refresh");
                return Ok(Route::Playlists);
            }
            _ => return Ok(Route::Login),
        };

        let response = self
            .spotify
            .refresh_token(&refresh_token)
            .await
            .map_err(AppError::TokenRefresh)?;

        if !session.renew(response, Utc::now()) {
            return Ok(Route::Login);
        }

        tracing::info!("Access token refreshed");
        Ok(Route::Playlists)
    }
}
