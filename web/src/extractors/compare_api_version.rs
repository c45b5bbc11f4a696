use crate::extractors::RejectionType;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use log::*;
use service::config::ApiVersion;

/// Checks that the `x-version` request header names a supported API version.
///
/// JSON endpoints require this header; the browser-redirect endpoints of the
/// OAuth flow are exempt since redirects cannot set custom headers.
pub(crate) struct CompareApiVersion(pub ApiVersion);

impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("Missing {} header", ApiVersion::field_name()),
            ))?;

        if !ApiVersion::versions().iter().any(|version| *version == header) {
            warn!("Rejecting unsupported API version: {header}");
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version {header}"),
            ));
        }

        let version = ApiVersion::try_parse(header).ok_or((
            StatusCode::BAD_REQUEST,
            format!("Invalid {} header", ApiVersion::field_name()),
        ))?;

        Ok(CompareApiVersion(version))
    }
}
