//! GitHub SSH key fetch workflow
//!
//! States: idle (no session) and requesting (exactly one session). A session
//! ends through exactly one of `complete` or `time_out`; whichever arrives
//! second carries an id that no longer matches and is ignored without
//! touching the store.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::authorized;
use super::source::{FetchError, KeySource};
use crate::error::{Result, SettingsError};
use crate::params::{keys, ParamStore};

/// Fixed bound on a single key request
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

pub type SessionId = u64;

/// One in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSession {
    pub id: SessionId,
    pub username: String,
    pub deadline: Instant,
}

/// What the settings row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDisplay {
    Empty,
    Loading,
    Configured { username: String },
}

impl KeyDisplay {
    pub fn button_label(&self) -> &'static str {
        match self {
            KeyDisplay::Empty => "ADD",
            KeyDisplay::Loading => "LOADING",
            KeyDisplay::Configured { .. } => "REMOVE",
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved { username: String, key_count: usize },
    NoKeys { username: String },
    NotFound { username: String },
    Failed { username: String, reason: String },
    TimedOut,
}

impl FetchOutcome {
    /// One-shot alert text; `None` on success
    pub fn message(&self) -> Option<String> {
        match self {
            FetchOutcome::Saved { .. } => None,
            FetchOutcome::NoKeys { username } => {
                Some(format!("Username '{}' has no keys on GitHub", username))
            }
            FetchOutcome::NotFound { username } => {
                Some(format!("Username '{}' doesn't exist on GitHub", username))
            }
            FetchOutcome::Failed { username, reason } => {
                Some(format!("Failed to fetch keys for '{}': {}", username, reason))
            }
            FetchOutcome::TimedOut => Some("Request timed out".to_string()),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// Drives key lookups for the settings screen and persists the result
pub struct SshKeyFetcher<P> {
    params: P,
    session: Option<FetchSession>,
    last_id: SessionId,
}

impl<P: ParamStore> SshKeyFetcher<P> {
    pub fn new(params: P) -> Self {
        Self {
            params,
            session: None,
            last_id: 0,
        }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn into_params(self) -> P {
        self.params
    }

    /// The in-flight session, if any
    pub fn session(&self) -> Option<&FetchSession> {
        self.session.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.session.is_none()
    }

    pub fn display(&self) -> Result<KeyDisplay> {
        if self.session.is_some() {
            return Ok(KeyDisplay::Loading);
        }

        let stored = self.params.get_or_default(keys::GITHUB_SSH_KEYS)?;
        if stored.is_empty() {
            Ok(KeyDisplay::Empty)
        } else {
            Ok(KeyDisplay::Configured {
                username: self.params.get_or_default(keys::GITHUB_USERNAME)?,
            })
        }
    }

    /// Start a session for `username`. The caller issues the request and
    /// reports back through `complete` or `time_out`.
    pub fn submit(&mut self, username: &str) -> Result<FetchSession> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SettingsError::EmptyUsername);
        }
        if self.session.is_some() {
            return Err(SettingsError::FetchInFlight);
        }

        self.last_id += 1;
        let session = FetchSession {
            id: self.last_id,
            username: username.to_string(),
            deadline: Instant::now() + FETCH_TIMEOUT,
        };
        debug!(id = session.id, username, "key fetch started");

        self.session = Some(session.clone());
        Ok(session)
    }

    /// Response (or transport error) for session `id`. `None` when the
    /// session already ended; nothing is touched in that case.
    pub fn complete(
        &mut self,
        id: SessionId,
        response: std::result::Result<String, FetchError>,
    ) -> Result<Option<FetchOutcome>> {
        match self.take_session(id) {
            Some(session) => self.resolve_response(session, response).map(Some),
            None => Ok(None),
        }
    }

    /// Deadline passed for session `id`; the request must already be aborted
    pub fn time_out(&mut self, id: SessionId) -> Option<FetchOutcome> {
        self.take_session(id).map(|session| self.resolve_timeout(session))
    }

    /// Forget the stored username and keys
    pub fn clear(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(SettingsError::RemoveWhileFetching);
        }
        self.params.remove(keys::GITHUB_SSH_KEYS)?;
        self.params.remove(keys::GITHUB_USERNAME)?;
        info!("cleared GitHub SSH keys");
        Ok(())
    }

    /// Full round trip: submit, race the request against the deadline,
    /// resolve. On timeout the request future is dropped, so no response is
    /// ever delivered for it.
    pub async fn fetch(&mut self, source: &dyn KeySource, username: &str) -> Result<FetchOutcome> {
        let session = self.submit(username)?;
        let response =
            tokio::time::timeout_at(session.deadline, source.fetch_keys(&session.username)).await;

        // &mut self is held across the await, the session is still ours
        self.session = None;
        match response {
            Ok(response) => self.resolve_response(session, response),
            Err(_) => Ok(self.resolve_timeout(session)),
        }
    }

    fn take_session(&mut self, id: SessionId) -> Option<FetchSession> {
        match self.session.take() {
            Some(session) if session.id == id => Some(session),
            other => {
                self.session = other;
                warn!(id, "ignoring callback for inactive key fetch");
                None
            }
        }
    }

    fn resolve_response(
        &mut self,
        session: FetchSession,
        response: std::result::Result<String, FetchError>,
    ) -> Result<FetchOutcome> {
        let FetchSession { id, username, .. } = session;

        let outcome = match response {
            Ok(body) if body.trim().is_empty() => FetchOutcome::NoKeys { username },
            Ok(body) => {
                self.persist(&username, &body)?;
                let key_count = authorized::count_lines(&body);
                info!(%username, key_count, "stored GitHub SSH keys");
                FetchOutcome::Saved { username, key_count }
            }
            Err(FetchError::NotFound) => FetchOutcome::NotFound { username },
            Err(e) => FetchOutcome::Failed {
                username,
                reason: e.to_string(),
            },
        };

        debug!(id, ?outcome, "key fetch finished");
        Ok(outcome)
    }

    fn resolve_timeout(&self, session: FetchSession) -> FetchOutcome {
        debug!(id = session.id, username = %session.username, "key fetch timed out");
        FetchOutcome::TimedOut
    }

    /// Write username and keys as a pair. If the keys cannot be written the
    /// previous username is put back.
    fn persist(&self, username: &str, body: &str) -> Result<()> {
        let previous = self.params.get(keys::GITHUB_USERNAME)?;
        self.params.put(keys::GITHUB_USERNAME, username)?;

        if let Err(e) = self.params.put(keys::GITHUB_SSH_KEYS, body) {
            let restored = match &previous {
                Some(value) => self.params.put(keys::GITHUB_USERNAME, value),
                None => self.params.remove(keys::GITHUB_USERNAME),
            };
            if let Err(restore_err) = restored {
                warn!(error = %restore_err, "could not restore GitHub username");
            }
            return Err(e);
        }
        Ok(())
    }
}
