//! Controller for the Spotify OAuth login flow.
//!
//! Note: these endpoints don't use CompareApiVersion because they work via
//! browser redirects which cannot set custom headers.

use crate::extractors::session_identity::SESSION_COOKIE;
use crate::AppState;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use domain::spotify_auth;
use log::*;
use serde::Deserialize;

/// Cookie holding the anti-forgery state for one login round trip.
pub(crate) const STATE_COOKIE: &str = "spotify_auth_state";

/// Query parameters Spotify sends to the callback endpoint.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// GET /login
///
/// Starts a login attempt: issues the anti-forgery state, stores it as a
/// cookie for the browser round trip, and redirects to Spotify's
/// authorization page with the configured scope.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 307, description = "Redirect to the Spotify authorization page"),
    )
)]
pub async fn login(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    let attempt =
        spotify_auth::begin_login(&app_state.spotify, app_state.config().spotify_scope());

    debug!("Redirecting login attempt to {}", attempt.authorization_url);

    let state_cookie = Cookie::build((STATE_COOKIE, attempt.state))
        .path("/")
        .http_only(true)
        .build();

    (
        jar.add(state_cookie),
        Redirect::temporary(&attempt.authorization_url),
    )
        .into_response()
}

/// GET /callback
///
/// Handles the redirect back from Spotify. The echoed state must match the
/// cookie issued by /login before the code exchange runs; every failure ends
/// in a redirect to the error page rather than an error status, since the
/// caller is a browser mid-redirect.
#[utoipa::path(
    get,
    path = "/callback",
    params(
        ("code" = Option<String>, Query, description = "Single-use authorization code from Spotify"),
        ("state" = Option<String>, Query, description = "Echoed anti-forgery state"),
    ),
    responses(
        (status = 307, description = "Redirect to the application root on success, or to /error"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let issued_state = jar.get(STATE_COOKIE).map(|cookie| cookie.value().to_string());

    if !spotify_auth::verify_state(params.state.as_deref(), issued_state.as_deref()) {
        warn!("State mismatch on OAuth callback");
        return (jar, Redirect::temporary("/error?err=state-mismatch")).into_response();
    }

    // The state is single-use: drop the cookie whatever happens next.
    let jar = jar.remove(Cookie::build(STATE_COOKIE).path("/"));

    let Some(code) = params.code else {
        warn!("OAuth callback arrived without an authorization code");
        return (jar, Redirect::temporary("/error?err=missing-code")).into_response();
    };

    match spotify_auth::complete_login(&app_state.spotify, &app_state.sessions, &code).await {
        Ok(login) => {
            info!("Login attempt completed, session established");

            let session_cookie = Cookie::build((SESSION_COOKIE, login.session_id))
                .path("/")
                .http_only(true)
                .build();

            // The fragment hands the tokens to the static frontend; the cookie
            // keys the server-side credential store for the relay endpoints.
            let target = format!(
                "/#access={}&refresh={}",
                login.credentials.access_token,
                login.credentials.refresh_token.unwrap_or_default()
            );

            (jar.add(session_cookie), Redirect::temporary(&target)).into_response()
        }
        Err(err) => {
            warn!("Spotify code exchange failed: {err}");

            let target = match err.upstream_status() {
                Some(status) => format!("/error?err=exchange-failed&st={status}"),
                None => "/error?err=exchange-failed".to_string(),
            };

            (jar, Redirect::temporary(&target)).into_response()
        }
    }
}
