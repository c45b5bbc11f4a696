use axum::http::{header, HeaderName, HeaderValue, Method};
use domain::gateway::spotify::SpotifyClient;
use domain::session_store::SessionStore;
use log::info;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub(crate) mod controller;
mod error;
pub(crate) mod extractors;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};

/// Web-level state shared by every request handler: the infrastructure state
/// from `service` plus the Spotify client and the session-keyed credential
/// store. Needs to implement Clone to be able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    service: service::AppState,
    pub spotify: Arc<SpotifyClient>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(service_state: service::AppState, spotify: SpotifyClient) -> Self {
        Self {
            service: service_state,
            spotify: Arc::new(spotify),
            sessions: SessionStore::new(),
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.service.db_conn_ref()
    }

    pub fn config(&self) -> &Config {
        &self.service.config
    }
}

/// Binds the configured interface/port and serves the router until shutdown.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config();

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-version"),
        ])
        .allow_origin(allowed_origins);

    let host = config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = config.port;

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server starting... listening on {host}:{port}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}
