//! Spotify accounts service and Web API client.
//!
//! This module provides the HTTP client for the OAuth2 authorization-code
//! exchange against the Spotify accounts service and for bearer-authenticated
//! GET requests against the Spotify Web API.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::{ClientCredentials, Config};

/// OAuth token response from the Spotify accounts service.
///
/// The refresh grant omits `refresh_token` unless Spotify decides to rotate it,
/// so everything beyond `access_token` is optional or defaulted.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// Form body sent to exchange an authorization code for tokens.
/// The client id and secret travel in the Basic auth header, not the form.
#[derive(Debug, Serialize)]
struct TokenExchangeRequest {
    code: String,
    redirect_uri: String,
    grant_type: String,
}

/// Form body sent to refresh an access token.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest {
    refresh_token: String,
    grant_type: String,
}

/// Configuration for Spotify base URLs. Tests point these at a mock server.
#[derive(Debug, Clone)]
pub struct SpotifyUrls {
    /// Accounts service base, hosting `/authorize` and `/api/token`.
    pub accounts_url: String,
    /// Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
}

/// Spotify client handling the authorization-code exchange and authenticated
/// Web API requests.
pub struct SpotifyClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    urls: SpotifyUrls,
}

impl SpotifyClient {
    /// Create a new Spotify client with configurable URLs.
    pub fn new(
        credentials: &ClientCredentials,
        redirect_uri: &str,
        urls: SpotifyUrls,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            redirect_uri: redirect_uri.to_string(),
            urls,
        })
    }

    /// Create a client from process configuration. The redirect URI used here is
    /// the same value later sent in the exchange form, which keeps the two legs
    /// byte-for-byte identical as the provider requires.
    pub fn from_config(config: &Config, credentials: &ClientCredentials) -> Result<Self, Error> {
        Self::new(
            credentials,
            config.spotify_redirect_uri(),
            SpotifyUrls {
                accounts_url: config.spotify_accounts_url().to_string(),
                api_url: config.spotify_api_url().to_string(),
            },
        )
    }

    /// The Web API base URL this client targets.
    pub fn api_url(&self) -> &str {
        &self.urls.api_url
    }

    /// Generate the OAuth authorization URL for user consent.
    pub fn authorization_url(&self, scope: &str, state: &str) -> String {
        format!(
            "{}/authorize?\
            response_type=code&\
            client_id={}&\
            scope={}&\
            redirect_uri={}&\
            state={}",
            self.urls.accounts_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(scope),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(state)
        )
    }

    /// The `Authorization` header value for the accounts service:
    /// `Basic base64(client_id:client_secret)`.
    fn basic_auth_header(&self) -> String {
        format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
        )
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.urls.accounts_url)
    }

    /// Exchange an authorization code for access and refresh tokens.
    ///
    /// Never retried here: the code is single-use and retry policy belongs to
    /// the caller (a user repeating `/login`).
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let request = TokenExchangeRequest {
            code: code.to_string(),
            redirect_uri: self.redirect_uri.clone(),
            grant_type: "authorization_code".to_string(),
        };

        debug!("Exchanging Spotify authorization code for tokens");

        let response = self
            .client
            .post(self.token_url())
            .header(reqwest::header::AUTHORIZATION, self.basic_auth_header())
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to exchange Spotify authorization code: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        self.parse_token_response(response).await
    }

    /// Refresh an expired access token using the refresh token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let request = TokenRefreshRequest {
            refresh_token: refresh_token.to_string(),
            grant_type: "refresh_token".to_string(),
        };

        debug!("Refreshing Spotify access token");

        let response = self
            .client
            .post(self.token_url())
            .header(reqwest::header::AUTHORIZATION, self.basic_auth_header())
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to refresh Spotify access token: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        self.parse_token_response(response).await
    }

    async fn parse_token_response(&self, response: reqwest::Response) -> Result<TokenResponse, Error> {
        let status = response.status();

        if status.is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Spotify token response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Spotify accounts service".to_string(),
                    )),
                }
            })?;
            info!("Received token pair from Spotify accounts service");
            Ok(tokens)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Spotify accounts service error ({status}): {error_text}");
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Status(status.as_u16())),
            })
        }
    }

    /// Make a bearer-authenticated GET request against a Spotify URL and
    /// JSON-decode the body.
    pub async fn get(&self, url: &str, access_token: &str) -> Result<serde_json::Value, Error> {
        debug!("Making request to Spotify url {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!("Spotify Web API request failed: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let body: serde_json::Value = response.json().await.map_err(|e| {
                warn!("Failed to parse Spotify Web API response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Spotify Web API".to_string(),
                    )),
                }
            })?;
            Ok(body)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Spotify Web API error ({status}): {error_text}");
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Status(status.as_u16())),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_client(accounts_url: &str, api_url: &str) -> SpotifyClient {
        SpotifyClient::new(
            &ClientCredentials {
                client_id: "cid123".to_string(),
                client_secret: "secret456".to_string(),
            },
            "https://app/cb",
            SpotifyUrls {
                accounts_url: accounts_url.to_string(),
                api_url: api_url.to_string(),
            },
        )
        .unwrap()
    }

    fn expected_basic_auth() -> String {
        format!("Basic {}", BASE64_STANDARD.encode("cid123:secret456"))
    }

    #[test]
    fn basic_auth_header_is_base64_of_id_colon_secret() {
        let client = test_client("https://accounts.example", "https://api.example/v1");
        assert_eq!(client.basic_auth_header(), expected_basic_auth());
    }

    #[test]
    fn authorization_url_percent_encodes_every_parameter() {
        let client = test_client("https://accounts.example", "https://api.example/v1");
        let url = client.authorization_url("scope-x scope-y", "st4te");

        assert!(url.starts_with("https://accounts.example/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=cid123"));
        assert!(url.contains("scope=scope-x%20scope-y"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp%2Fcb"));
        assert!(url.contains("state=st4te"));
    }

    #[tokio::test]
    async fn exchange_code_returns_token_pair_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", expected_basic_auth().as_str())
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "code1".into()),
                Matcher::UrlEncoded("redirect_uri".into(), "https://app/cb".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"AT1","refresh_token":"RT1"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), "https://api.example/v1");
        let tokens = client.exchange_code("code1").await.unwrap();

        assert_eq!(tokens.access_token, "AT1");
        assert_eq!(tokens.refresh_token, Some("RT1".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn exchange_code_surfaces_the_provider_status_on_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), "https://api.example/v1");
        let err = client.exchange_code("stale-code").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Status(400))
        );
        assert_eq!(err.upstream_status(), Some(400));
    }

    #[tokio::test]
    async fn refresh_access_token_sends_the_refresh_grant() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", expected_basic_auth().as_str())
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("refresh_token".into(), "RT1".into()),
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"AT2"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), "https://api.example/v1");
        let tokens = client.refresh_access_token("RT1").await.unwrap();

        assert_eq!(tokens.access_token, "AT2");
        assert_eq!(tokens.refresh_token, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_attaches_the_bearer_token_and_decodes_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/me")
            .match_header("authorization", "Bearer AT1")
            .with_status(200)
            .with_body(r#"{"id":"spotify-user-1"}"#)
            .create_async()
            .await;

        let client = test_client("https://accounts.example", &server.url());
        let body = client
            .get(&format!("{}/v1/me", server.url()), "AT1")
            .await
            .unwrap();

        assert_eq!(body["id"], "spotify-user-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_surfaces_non_success_statuses() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/me")
            .with_status(404)
            .create_async()
            .await;

        let client = test_client("https://accounts.example", &server.url());
        let err = client
            .get(&format!("{}/v1/me", server.url()), "AT1")
            .await
            .unwrap_err();

        assert_eq!(err.upstream_status(), Some(404));
    }
}
