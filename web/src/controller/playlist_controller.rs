use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{playlist as PlaylistApi, playlists};
use service::config::ApiVersion;

use log::*;

/// GET all shared Playlists
#[utoipa::path(
    get,
    path = "/playlists",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Playlists", body = [playlists::Model]),
        (status = 400, description = "Missing or unsupported API version"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Playlists");

    let playlists = PlaylistApi::find_all(app_state.db_conn_ref()).await?;

    debug!("Found Playlists: {:?}", playlists);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), playlists)))
}

/// POST create a new shared Playlist link
#[utoipa::path(
    post,
    path = "/playlists",
    params(ApiVersion),
    request_body = playlists::Model,
    responses(
        (status = 201, description = "Successfully shared a new Playlist link", body = playlists::Model),
        (status = 400, description = "Missing or unsupported API version"),
        (status = 422, description = "Unprocessable Entity: link is not a Spotify web player link"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(playlist_model): Json<playlists::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Playlist from: {:?}", playlist_model);

    let playlist = PlaylistApi::create(app_state.db_conn_ref(), playlist_model).await?;

    debug!("New Playlist: {:?}", playlist);

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        playlist,
    )))
}
