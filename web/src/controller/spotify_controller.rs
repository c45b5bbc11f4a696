//! Read relays against the Spotify Web API on behalf of a logged-in session.

use crate::controller::ApiResponse;
use crate::extractors::{
    compare_api_version::CompareApiVersion, session_identity::SessionIdentity,
};
use crate::params::recommendation::RecommendationsParams;
use crate::params::search::SearchParams;
use crate::{AppState, Error};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::spotify_api;
use service::config::ApiVersion;

use log::*;

/// GET a set of track recommendations for the session
#[utoipa::path(
    get,
    path = "/recommendations",
    params(
        ApiVersion,
        ("tracks" = Option<String>, Query, description = "Comma-separated seed track ids"),
        ("limit" = Option<u32>, Query, description = "Number of tracks to return, defaults to 20"),
        ("market" = Option<String>, Query, description = "Destination market country code"),
    ),
    responses(
        (status = 200, description = "Successfully retrieved recommendations"),
        (status = 401, description = "Unauthorized: no Spotify credentials held for the session"),
        (status = 502, description = "Spotify Web API request failed"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn recommendations(
    CompareApiVersion(_v): CompareApiVersion,
    SessionIdentity(session_id): SessionIdentity,
    State(app_state): State<AppState>,
    Query(params): Query<RecommendationsParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET recommendations relay: {:?}", params);

    let body = spotify_api::recommendations(
        &app_state.spotify,
        &app_state.sessions,
        session_id.as_deref(),
        &params.into_query(),
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), body)))
}

/// GET tracks matching a free-text query
#[utoipa::path(
    get,
    path = "/search",
    params(
        ApiVersion,
        ("query" = String, Query, description = "Free-text track query"),
        ("limit" = Option<u32>, Query, description = "Number of tracks to return"),
    ),
    responses(
        (status = 200, description = "Successfully retrieved matching tracks"),
        (status = 401, description = "Unauthorized: no Spotify credentials held for the session"),
        (status = 502, description = "Spotify Web API request failed"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn search(
    CompareApiVersion(_v): CompareApiVersion,
    SessionIdentity(session_id): SessionIdentity,
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET search relay for query: {}", params.query);

    let body = spotify_api::search(
        &app_state.spotify,
        &app_state.sessions,
        session_id.as_deref(),
        &params.query,
        params.limit,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), body)))
}

/// GET the logged-in user's Spotify profile
#[utoipa::path(
    get,
    path = "/profile",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved the user profile"),
        (status = 401, description = "Unauthorized: no Spotify credentials held for the session"),
        (status = 502, description = "Spotify Web API request failed"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn profile(
    CompareApiVersion(_v): CompareApiVersion,
    SessionIdentity(session_id): SessionIdentity,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET profile relay");

    let body = spotify_api::profile(
        &app_state.spotify,
        &app_state.sessions,
        session_id.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), body)))
}
