use crate::{error::SpotifyError, types::ResourceBody};

use super::{SpotifyClient, read_body};

impl SpotifyClient {
    /// Fetches the current user's playlists from `GET {api}/me/playlists`.
    ///
    /// The body is returned verbatim together with its content type; no
    /// pagination is followed.
    pub async fn get_playlists(&self, access_token: &str) -> Result<ResourceBody, SpotifyError> {
        let api_url = format!(
            "{uri}/me/playlists",
            uri = self.config().api_url.as_str().trim_end_matches('/')
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let (content_type, body) = read_body(response).await?;

        Ok(ResourceBody { content_type, body })
    }
}
