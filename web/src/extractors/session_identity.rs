use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

/// Name of the cookie carrying the opaque session id minted at login completion.
pub(crate) const SESSION_COOKIE: &str = "session";

/// Extracts the session id cookie, if one was sent.
///
/// Presence of a cookie does not imply credentials exist for it; the domain
/// layer makes that call, so this extractor never rejects.
pub(crate) struct SessionIdentity(pub Option<String>);

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        Ok(SessionIdentity(
            jar.get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string()),
        ))
    }
}
