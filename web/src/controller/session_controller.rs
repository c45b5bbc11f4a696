use crate::controller::ApiResponse;
use crate::extractors::{
    compare_api_version::CompareApiVersion, session_identity::SessionIdentity,
};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::spotify_auth;
use serde_json::json;
use service::config::ApiVersion;

/// GET whether the caller's session currently holds Spotify credentials
#[utoipa::path(
    get,
    path = "/session",
    params(ApiVersion),
    responses(
        (status = 200, description = "Whether the session is authenticated"),
        (status = 400, description = "Missing or unsupported API version"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn show(
    CompareApiVersion(_v): CompareApiVersion,
    SessionIdentity(session_id): SessionIdentity,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    let authenticated =
        spotify_auth::session_authenticated(&app_state.sessions, session_id.as_deref());

    Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "authenticated": authenticated }),
    ))
}
