//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `domain` is dependent on `entity_api`, and `web` is dependent on
/// `domain`, but `web` should not be dependent, directly, on `entity_api`. Ultimately the
/// various `error_kind`s are used by `web` to return appropriate HTTP status codes or
/// redirect targets to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
    Auth(AuthErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Other(String),
}

/// Enum representing the various kinds of entity errors that can bubble up from the
/// "Entity" layer (`entity_api` and `entity`). These errors are translated from the
/// `entity_api` layer to the `domain` layer and reduced to a subset of error kinds
/// that are relevant to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
/// `Status` carries the HTTP status returned by the upstream provider when the request
/// itself completed but was not successful.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    Status(u16),
    Other(String),
}

/// Enum representing failures of the login flow itself, as opposed to failures
/// of the infrastructure around it. These are expected outcomes the web layer
/// translates into redirects or 401 responses, never retries.
#[derive(Debug, PartialEq)]
pub enum AuthErrorKind {
    /// The anti-forgery state echoed back by the provider was absent or did not
    /// match the one issued for this login attempt.
    StateMismatch,
    /// An authenticated call was attempted while the session holds no credentials.
    NotAuthenticated,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            _ => EntityErrorKind::Other("EntityApiErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl Error {
    /// Shorthand for the two expected login-flow failures.
    pub fn auth(kind: AuthErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Auth(kind),
        }
    }

    /// The upstream HTTP status carried by this error, when one was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self.error_kind {
            DomainErrorKind::External(ExternalErrorKind::Status(status)) => Some(status),
            _ => None,
        }
    }
}
