use domain::gateway::spotify::SpotifyClient;
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    // Client credentials are the one piece of configuration whose absence is
    // fatal: nothing in the login flow works without them.
    let spotify_credentials = match config.spotify_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Failed to load Spotify client credentials: {e}");
            std::process::exit(1);
        }
    };

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);

    let spotify = match SpotifyClient::from_config(&service_state.config, &spotify_credentials) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build Spotify client: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Serving static frontend files from {}",
        service_state.config.public_dir()
    );

    let app_state = web::AppState::new(service_state, spotify);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
