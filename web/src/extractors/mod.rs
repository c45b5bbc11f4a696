pub(crate) mod compare_api_version;
pub(crate) mod session_identity;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
