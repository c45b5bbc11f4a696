//! Session-keyed credential storage.
//!
//! Credentials obtained from a completed login are held in memory against an
//! opaque session id rather than in a process-wide slot, so concurrent logins
//! never overwrite each other. The session id doubles as the browser cookie
//! value; rows live until the process restarts or the session is removed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::oauth_state;

/// Length of a session id. Longer than the CSRF state token since a session
/// outlives a single browser round trip.
pub const SESSION_ID_LENGTH: usize = 32;

/// The bearer token pair captured from a successful code exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// In-memory store mapping session ids to credentials.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Credentials>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store credentials under a freshly minted session id and return the id.
    pub fn insert(&self, credentials: Credentials) -> String {
        let session_id = oauth_state::generate_token(SESSION_ID_LENGTH);

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(session_id.clone(), credentials);

        session_id
    }

    /// Look up the credentials held for a session, if any.
    pub fn get(&self, session_id: &str) -> Option<Credentials> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(session_id).cloned()
    }

    /// Replace a session's access token after a refresh. The refresh token is
    /// only replaced when the provider rotated it.
    pub fn update_tokens(
        &self,
        session_id: &str,
        access_token: &str,
        rotated_refresh_token: Option<&str>,
    ) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(credentials) = sessions.get_mut(session_id) {
            credentials.access_token = access_token.to_string();
            if let Some(refresh_token) = rotated_refresh_token {
                credentials.refresh_token = Some(refresh_token.to_string());
            }
        }
    }

    /// Drop a session's credentials, returning them if the session existed.
    pub fn remove(&self, session_id: &str) -> Option<Credentials> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(session_id)
    }
}
