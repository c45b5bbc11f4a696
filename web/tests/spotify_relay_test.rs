//! Tests for the Spotify Web API relay endpoints against a stubbed API server.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use domain::session_store::Credentials;
use mockito::Matcher;
use tower::ServiceExt;

use common::{body_json, test_app, test_config, API_VERSION};

fn logged_in_cookie(app_state: &web::AppState) -> String {
    let session_id = app_state.sessions.insert(Credentials {
        access_token: "AT1".to_string(),
        refresh_token: Some("RT1".to_string()),
    });
    format!("session={session_id}")
}

#[tokio::test]
async fn recommendations_relay_forwards_seeds_and_target_attributes() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let api_mock = server
        .mock("GET", "/v1/recommendations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("seed_tracks".into(), "trackA".into()),
            Matcher::UrlEncoded("target_energy".into(), "0.8".into()),
        ]))
        .match_header("authorization", "Bearer AT1")
        .with_status(200)
        .with_body(r#"{"tracks":[{"name":"One More Time"}]}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/v1", server.url()));
    let (app_state, router) = test_app(config);
    let cookie = logged_in_cookie(&app_state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/recommendations?tracks=trackA&energy=0.8")
                .header("x-version", API_VERSION)
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["tracks"][0]["name"], "One More Time");

    api_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn search_relay_targets_tracks() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let api_mock = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "discovery".into()),
            Matcher::UrlEncoded("type".into(), "track".into()),
            Matcher::UrlEncoded("limit".into(), "3".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"tracks":{"items":[]}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/v1", server.url()));
    let (app_state, router) = test_app(config);
    let cookie = logged_in_cookie(&app_state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/search?query=discovery&limit=3")
                .header("x-version", API_VERSION)
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    api_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn profile_relay_fetches_the_current_user() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let api_mock = server
        .mock("GET", "/v1/me")
        .match_header("authorization", "Bearer AT1")
        .with_status(200)
        .with_body(r#"{"id":"spotify-user-1","display_name":"Test User"}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/v1", server.url()));
    let (app_state, router) = test_app(config);
    let cookie = logged_in_cookie(&app_state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header("x-version", API_VERSION)
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "spotify-user-1");

    api_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn relays_without_a_login_return_401_and_make_no_calls() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let api_mock = server
        .mock("GET", "/v1/me")
        .expect(0)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/v1", server.url()));
    let (_app_state, router) = test_app(config);

    let no_cookie = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header("x-version", API_VERSION)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(no_cookie.status(), StatusCode::UNAUTHORIZED);

    let unknown_session = router
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header("x-version", API_VERSION)
                .header(header::COOKIE, "session=not-a-session")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(unknown_session.status(), StatusCode::UNAUTHORIZED);

    api_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn relay_failures_surface_as_bad_gateway() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/me")
        .with_status(500)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/v1", server.url()));
    let (app_state, router) = test_app(config);
    let cookie = logged_in_cookie(&app_state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header("x-version", API_VERSION)
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    Ok(())
}
