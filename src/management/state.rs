use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::{
    error::SpotifyError,
    types::{Token, TokenResponse},
};

/// Where a session stands in the token lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Unauthenticated,
    Valid,
    Expired,
}

/// Per-browser session record.
///
/// Empty until a code exchange succeeds. A new exchange replaces the whole
/// token; a refresh only replaces the access token and expiry (plus the refresh
/// token and scope when the accounts service sends new ones).
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<Token>,
}

impl Session {
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Derives the lifecycle state at `now`, treating the token as expired
    /// `leeway` early.
    pub fn state_at(&self, now: DateTime<Utc>, leeway: TimeDelta) -> TokenState {
        match &self.token {
            None => TokenState::Unauthenticated,
            Some(token) if now + leeway >= token.expires_at => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }

    /// Stores the result of an authorization-code exchange.
    ///
    /// The response must carry a refresh token; without one the session could
    /// never recover from expiry, so it is rejected and the record left as is.
    pub fn establish(
        &mut self,
        response: TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<(), SpotifyError> {
        let refresh_token = response
            .refresh_token
            .ok_or(SpotifyError::MissingField("refresh_token"))?;

        self.token = Some(Token {
            access_token: response.access_token,
            refresh_token,
            scope: response.scope,
            expires_at: expires_at(now, response.expires_in),
        });

        Ok(())
    }

    /// Applies a refresh-token grant response. Returns `false` when there was no
    /// token to renew.
    pub fn renew(&mut self, response: TokenResponse, now: DateTime<Utc>) -> bool {
        let Some(token) = self.token.as_mut() else {
            return false;
        };

        token.access_token = response.access_token;
        token.expires_at = expires_at(now, response.expires_in);
        if let Some(rotated) = response.refresh_token {
            token.refresh_token = rotated;
        }
        if response.scope.is_some() {
            token.scope = response.scope;
        }

        true
    }
}

fn expires_at(now: DateTime<Utc>, expires_in: u64) -> DateTime<Utc> {
    i64::try_from(expires_in)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// In-memory session records keyed by session identifier.
///
/// Each record sits behind its own mutex so read-modify-write cycles on one
/// session (which span outbound HTTP calls) never interleave, while different
/// sessions proceed independently.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Stores `session` under `id`, replacing any record already there.
    pub async fn insert(&self, id: &str, session: Session) -> Arc<Mutex<Session>> {
        let record = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .await
            .insert(id.to_string(), Arc::clone(&record));
        record
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Copies every session record. Waits for in-flight operations on each
    /// record to finish.
    pub async fn snapshot(&self) -> Vec<(String, Session)> {
        let handles: Vec<(String, Arc<Mutex<Session>>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, session)| (id.clone(), Arc::clone(session)))
            .collect();

        let mut records = Vec::with_capacity(handles.len());
        for (id, session) in handles {
            records.push((id, session.lock().await.clone()));
        }
        records
    }
}
