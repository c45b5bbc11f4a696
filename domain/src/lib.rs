//! Business logic for the Mixtape platform: the Spotify login flow, the
//! session-scoped API relay operations, and playlist persistence.
//!
//! This crate re-exports entity items via `entity_api` so that consumers
//! (the `web` crate) do not need to depend on the entity crates directly.

pub use entity_api::{playlists, Id};

pub mod error;
pub mod gateway;
pub mod oauth_state;
pub mod playlist;
pub mod session_store;
pub mod spotify_api;
pub mod spotify_auth;
