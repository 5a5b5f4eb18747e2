use url::Url;

use crate::{error::SpotifyError, types::TokenResponse};

use super::{SpotifyClient, read_body};

/// Read-only scopes requested during authorization.
pub const SCOPE: &str = "user-read-private user-read-email";

impl SpotifyClient {
    /// Builds the accounts service URL the browser is sent to on `/login`.
    ///
    /// The consent dialog is forced with `show_dialog=true` so switching
    /// accounts is always possible.
    pub fn authorize_url(&self) -> Url {
        let config = self.config();
        let mut url = config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", config.client_id.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE)
            .append_pair("redirect_uri", config.redirect_uri.as_str())
            .append_pair("show_dialog", "true");
        url
    }

    /// Exchanges an authorization code for an access and refresh token.
    ///
    /// The code is single-use and short-lived, so this happens right when the
    /// callback arrives. The `redirect_uri` must be byte-identical to the one
    /// sent in [`SpotifyClient::authorize_url`].
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, SpotifyError> {
        let config = self.config();
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .await
    }

    /// Trades a refresh token for a fresh access token.
    ///
    /// Spotify may or may not rotate the refresh token; callers decide what to
    /// do with an absent `refresh_token` in the response.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, SpotifyError> {
        let config = self.config();
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, SpotifyError> {
        let response = self
            .http
            .post(self.config().token_url.as_str())
            .form(form)
            .send()
            .await?;

        let (_, body) = read_body(response).await?;
        let token = serde_json::from_str::<TokenResponse>(&body)?;

        Ok(token)
    }
}
