//! Plain-text error display targeted by the OAuth flow's failure redirects.

use axum::extract::Query;
use axum::response::IntoResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ErrorParams {
    pub err: Option<String>,
    pub st: Option<String>,
}

/// GET /error
pub async fn show(Query(params): Query<ErrorParams>) -> impl IntoResponse {
    let err = params.err.unwrap_or_else(|| "unknown".to_string());

    match params.st {
        Some(st) => format!("error {st}: {err}"),
        None => format!("error: {err}"),
    }
}
