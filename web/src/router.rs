use crate::controller::{
    auth_controller, error_controller, health_check_controller, playlist_controller,
    session_controller, spotify_controller,
};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Mixtape Platform API"
        ),
        paths(
            health_check_controller::health_check,
            session_controller::show,
            playlist_controller::index,
            playlist_controller::create,
            spotify_controller::recommendations,
            spotify_controller::search,
            spotify_controller::profile,
        ),
        components(
            schemas(
                domain::playlists::Model,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "mixtape_platform", description = "Mixtape playlist sharing & recommendations API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to
// the Spotify relay endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "Session id value set via Set-Cookie header by a successful /callback",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(auth_routes(app_state.clone()))
        .merge(session_routes(app_state.clone()))
        .merge(playlist_routes(app_state.clone()))
        .merge(spotify_relay_routes(app_state.clone()))
        .merge(health_routes())
        .merge(error_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&app_state))
}

/// Routes for the browser-facing OAuth flow. Driven entirely by redirects,
/// which cannot set custom headers, so no x-version check applies here.
fn auth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/login", get(auth_controller::login))
        .route("/callback", get(auth_controller::callback))
        .with_state(app_state)
}

fn session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/session", get(session_controller::show))
        .with_state(app_state)
}

fn playlist_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/playlists", get(playlist_controller::index))
        .route("/playlists", post(playlist_controller::create))
        .with_state(app_state)
}

/// Routes relaying read queries to the Spotify Web API for a logged-in session.
fn spotify_relay_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/recommendations", get(spotify_controller::recommendations))
        .route("/search", get(spotify_controller::search))
        .route("/profile", get(spotify_controller::profile))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn error_routes() -> Router {
    Router::new().route("/error", get(error_controller::show))
}

// This will serve the static frontend files as the fallback for unmatched paths
fn static_routes(app_state: &AppState) -> ServeDir {
    ServeDir::new(app_state.config().public_dir())
}
