//! Spotify login orchestration.
//!
//! One login attempt walks a strict sequence: a state token is issued and sent
//! with the authorization redirect; the echoed state is verified before
//! anything else happens; only then is the single-use code exchanged for
//! tokens, which are stored under a new session id.

use crate::error::{AuthErrorKind, DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::spotify::SpotifyClient;
use crate::oauth_state::{self, STATE_TOKEN_LENGTH};
use crate::session_store::{Credentials, SessionStore};
use log::*;

pub use crate::oauth_state::verify_state;

/// The authorization URL to redirect the user to, paired with the state token
/// the caller must hold against the browser session for the callback leg.
#[derive(Debug)]
pub struct LoginAttempt {
    pub authorization_url: String,
    pub state: String,
}

/// The outcome of a successful code exchange: the minted session id and the
/// credentials now stored under it.
#[derive(Debug)]
pub struct CompletedLogin {
    pub session_id: String,
    pub credentials: Credentials,
}

/// Start a login attempt: mint a state token and build the authorization URL.
/// Cannot fail; persisting the state against the browser session is the
/// caller's job.
pub fn begin_login(spotify: &SpotifyClient, scope: &str) -> LoginAttempt {
    info!("Requesting scope access: {scope}");
    let state = oauth_state::generate_token(STATE_TOKEN_LENGTH);

    LoginAttempt {
        authorization_url: spotify.authorization_url(scope, &state),
        state,
    }
}

/// Exchange a verified authorization code for tokens and store them under a
/// fresh session id.
///
/// Must only be called after `verify_state` returned true for this attempt;
/// the web layer enforces that ordering.
pub async fn complete_login(
    spotify: &SpotifyClient,
    sessions: &SessionStore,
    code: &str,
) -> Result<CompletedLogin, Error> {
    let tokens = spotify
        .exchange_code(code)
        .await
        .inspect_err(|e| warn!("Spotify code exchange failed: {:?}", e))?;

    let credentials = Credentials {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };
    let session_id = sessions.insert(credentials.clone());

    info!("Stored Spotify credentials for a new session");

    Ok(CompletedLogin {
        session_id,
        credentials,
    })
}

/// Whether the given session currently holds credentials.
pub fn session_authenticated(sessions: &SessionStore, session_id: Option<&str>) -> bool {
    session_id.is_some_and(|id| sessions.get(id).is_some())
}

/// Make a bearer-authenticated GET on behalf of a session.
///
/// Fails fast with `NotAuthenticated` (zero network calls) when the session
/// holds no credentials. When the access token is rejected with a 401 and a
/// refresh token is held, performs exactly one refresh-and-retry cycle,
/// updating the stored credentials; every other failure surfaces unchanged.
pub async fn session_get(
    spotify: &SpotifyClient,
    sessions: &SessionStore,
    session_id: Option<&str>,
    url: &str,
) -> Result<serde_json::Value, Error> {
    let session_id = session_id.ok_or(Error::auth(AuthErrorKind::NotAuthenticated))?;
    let credentials = sessions
        .get(session_id)
        .ok_or(Error::auth(AuthErrorKind::NotAuthenticated))?;

    let err = match spotify.get(url, &credentials.access_token).await {
        Ok(body) => return Ok(body),
        Err(err) => err,
    };

    let expired =
        err.error_kind == DomainErrorKind::External(ExternalErrorKind::Status(401));
    let Some(refresh_token) = credentials.refresh_token.filter(|_| expired) else {
        return Err(err);
    };

    info!("Access token rejected, attempting one refresh-and-retry cycle");

    let refreshed = spotify.refresh_access_token(&refresh_token).await?;
    sessions.update_tokens(
        session_id,
        &refreshed.access_token,
        refreshed.refresh_token.as_deref(),
    );

    spotify.get(url, &refreshed.access_token).await
}
