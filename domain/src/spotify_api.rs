//! Spotify Web API relay operations for logged-in sessions.
//!
//! These are thin read passthroughs: build the target URL, make one
//! bearer-authenticated GET through the session's credentials, hand the JSON
//! body back. Attribute values are forwarded to Spotify unvalidated; the
//! provider rejects out-of-range values itself.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::gateway::spotify::SpotifyClient;
use crate::session_store::SessionStore;
use crate::spotify_auth;
use url::Url;

/// The tunable audio attributes a caller may target on a recommendations
/// query. Each is forwarded as a `target_<attribute>` parameter.
pub const RECOMMENDATION_ATTRIBUTES: &[&str] = &[
    "acousticness",
    "danceability",
    "duration_ms",
    "energy",
    "instrumentalness",
    "key",
    "liveness",
    "loudness",
    "mode",
    "popularity",
    "speechiness",
    "tempo",
    "valence",
];

const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

/// A recommendations request: seed tracks plus optional tuning.
#[derive(Debug, Default)]
pub struct RecommendationQuery {
    pub seed_tracks: Vec<String>,
    pub limit: Option<u32>,
    pub market: Option<String>,
    /// `(attribute, value)` pairs; attribute names come from
    /// [`RECOMMENDATION_ATTRIBUTES`].
    pub targets: Vec<(String, String)>,
}

fn build_url(base: &str, path: &str, params: &[(String, String)]) -> Result<String, Error> {
    Url::parse_with_params(&format!("{base}/{path}"), params)
        .map(|url| url.to_string())
        .map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to construct Spotify Web API URL".to_string(),
            )),
        })
}

fn recommendations_url(base: &str, query: &RecommendationQuery) -> Result<String, Error> {
    let mut params = vec![(
        "limit".to_string(),
        query
            .limit
            .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT)
            .to_string(),
    )];

    if !query.seed_tracks.is_empty() {
        params.push(("seed_tracks".to_string(), query.seed_tracks.join(",")));
    }
    if let Some(market) = &query.market {
        params.push(("market".to_string(), market.clone()));
    }
    for (attribute, value) in &query.targets {
        params.push((format!("target_{attribute}"), value.clone()));
    }

    build_url(base, "recommendations", &params)
}

fn search_url(base: &str, query: &str, limit: Option<u32>) -> Result<String, Error> {
    let mut params = vec![
        ("q".to_string(), query.to_string()),
        ("type".to_string(), "track".to_string()),
    ];
    if let Some(limit) = limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    build_url(base, "search", &params)
}

/// Fetch a set of track recommendations for the session.
pub async fn recommendations(
    spotify: &SpotifyClient,
    sessions: &SessionStore,
    session_id: Option<&str>,
    query: &RecommendationQuery,
) -> Result<serde_json::Value, Error> {
    let url = recommendations_url(spotify.api_url(), query)?;
    spotify_auth::session_get(spotify, sessions, session_id, &url).await
}

/// Search tracks matching a free-text query.
pub async fn search(
    spotify: &SpotifyClient,
    sessions: &SessionStore,
    session_id: Option<&str>,
    query: &str,
    limit: Option<u32>,
) -> Result<serde_json::Value, Error> {
    let url = search_url(spotify.api_url(), query, limit)?;
    spotify_auth::session_get(spotify, sessions, session_id, &url).await
}

/// Fetch the logged-in user's profile.
pub async fn profile(
    spotify: &SpotifyClient,
    sessions: &SessionStore,
    session_id: Option<&str>,
) -> Result<serde_json::Value, Error> {
    let url = format!("{}/me", spotify.api_url());
    spotify_auth::session_get(spotify, sessions, session_id, &url).await
}
