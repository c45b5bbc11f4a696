#![allow(dead_code)]

use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use clap::Parser as _;
use domain::gateway::spotify::SpotifyClient;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;

pub const CLIENT_ID: &str = "cid123";
pub const CLIENT_SECRET: &str = "secret456";
pub const REDIRECT_URI: &str = "https://app/cb";
pub const SCOPE: &str = "scope-x";
pub const API_VERSION: &str = "0.1.0";

/// A Config pointing the Spotify client at the given (usually mock) base URLs.
pub fn test_config(accounts_url: &str, api_url: &str) -> Config {
    Config::parse_from([
        "mixtape_platform_rs",
        "--spotify-client-id",
        CLIENT_ID,
        "--spotify-client-secret",
        CLIENT_SECRET,
        "--spotify-redirect-uri",
        REDIRECT_URI,
        "--spotify-scope",
        SCOPE,
        "--spotify-accounts-url",
        accounts_url,
        "--spotify-api-url",
        api_url,
    ])
}

/// Builds the full application state and router. The database connection is a
/// disconnected stub; none of these tests touch persistence.
pub fn test_app(config: Config) -> (web::AppState, axum::Router) {
    let credentials = config.spotify_credentials().unwrap();
    let spotify = SpotifyClient::from_config(&config, &credentials).unwrap();
    let db = Arc::new(DatabaseConnection::default());
    let service_state = service::AppState::new(config, &db);
    let app_state = web::AppState::new(service_state, spotify);
    let router = web::router::define_routes(app_state.clone());
    (app_state, router)
}

/// Extracts the value of a named cookie from the response's Set-Cookie headers.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let (cookie_name, rest) = cookie.split_once('=')?;
            if cookie_name != name {
                return None;
            }
            Some(
                rest.split(';')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            )
        })
}

/// Reads a response body to completion and parses it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body to completion as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
