mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use playport::{
    adapters::{
        repositories::{InMemoryConnectionRepository, InMemoryStateRepository},
        router::build_router,
        state::{AppState, CurrentUser},
    },
    application::repositories::connection_repository::ConnectionRepository,
    domain::config::spotify::SpotifyConfig,
    services::create_providers,
};
use reqwest::Url;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{spotify_config, USER};

fn app(spotify: Option<SpotifyConfig>) -> (Router, Arc<dyn ConnectionRepository>) {
    let connections: Arc<dyn ConnectionRepository> = Arc::new(InMemoryConnectionRepository::new());
    let (transfer_service, spotify) = create_providers(spotify, connections.clone()).unwrap();

    let app_state = AppState {
        current_user: CurrentUser(USER.to_string()),
        state_repository: Arc::new(InMemoryStateRepository::new()),
        connection_repository: connections.clone(),
        transfer_service: Arc::new(transfer_service),
        spotify,
    };
    (build_router(app_state), connections)
}

async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(router: &Router, uri: &str, body: Value) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

async fn mount_token_and_profile(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "spotify-user",
            "display_name": "Sam",
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_reports_registered_providers() {
    let (router, _) = app(None);

    let response = get(&router, "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"], json!(["mock"]));
    assert_eq!(body["spotifyEnabled"], false);
}

#[tokio::test]
async fn providers_are_listed_with_spotify_when_configured() {
    let server = MockServer::start().await;
    let (router, _) = app(Some(spotify_config(&server)));

    let body = body_json(get(&router, "/api/v1/providers").await).await;
    assert_eq!(body["providers"], json!(["mock", "spotify"]));
}

#[tokio::test]
async fn mock_playlists_are_served() {
    let (router, _) = app(None);

    let response = get(&router, "/api/v1/providers/mock/playlists").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["provider"], "mock");
    assert_eq!(body["playlists"].as_array().unwrap().len(), 3);

    let response = get(&router, "/api/v1/providers/mock/playlists/mock-2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Workout Mix");
    assert_eq!(body["trackCount"], 2);
}

#[tokio::test]
async fn unknown_provider_or_playlist_is_404() {
    let (router, _) = app(None);

    let response = get(&router, "/api/v1/providers/nowhere/playlists").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&router, "/api/v1/providers/mock/playlists/mock-99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unconnected_spotify_asks_to_reconnect() {
    let server = MockServer::start().await;
    let (router, _) = app(Some(spotify_config(&server)));

    let response = get(&router, "/api/v1/providers/spotify/playlists").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please connect your account and try again");
}

#[tokio::test]
async fn transfer_between_mock_accounts_is_created() {
    let (router, _) = app(None);

    let response = post_json(
        &router,
        "/api/v1/transfers",
        json!({ "source": "mock", "target": "mock", "playlistId": "mock-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["playlistName"], "Summer Vibes 2024");
    assert_eq!(body["trackCount"], 3);

    let listing = body_json(get(&router, "/api/v1/providers/mock/playlists").await).await;
    assert_eq!(listing["playlists"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn transfer_failures_name_their_stage() {
    let (router, _) = app(None);

    let response = post_json(
        &router,
        "/api/v1/transfers",
        json!({ "source": "mock", "target": "nowhere", "playlistId": "mock-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["stage"], "provider");

    let response = post_json(
        &router,
        "/api/v1/transfers",
        json!({ "source": "mock", "target": "mock", "playlistId": "missing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["stage"], "export");

    let response = post_json(
        &router,
        "/api/v1/transfers",
        json!({ "source": "mock", "target": " ", "playlistId": "mock-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn spotify_routes_are_unavailable_when_not_configured() {
    let (router, _) = app(None);

    let response = get(&router, "/auth/spotify/start").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = get(&router, "/auth/spotify/callback?state=x&code=y").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn callback_with_unknown_state_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (router, _) = app(Some(spotify_config(&server)));

    let response = get(&router, "/auth/spotify/callback?state=forged&code=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid state parameter");

    let response = get(&router, "/auth/spotify/callback?code=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oauth_round_trip_connects_the_account() {
    let server = MockServer::start().await;
    mount_token_and_profile(&server).await;
    let (router, connections) = app(Some(spotify_config(&server)));

    let response = get(&router, "/auth/spotify/start").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let authorize = Url::parse(&location(&response)).unwrap();
    assert_eq!(authorize.path(), "/authorize");
    let state = authorize
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let callback = format!("/auth/spotify/callback?state={}&code=abc", state);
    let response = get(&router, &callback).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/connections");

    let stored = connections.get("spotify", USER).await.unwrap();
    assert!(stored.connected);
    assert_eq!(stored.access_token, "access-1");

    let listing = body_json(get(&router, "/api/v1/connections").await).await;
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["provider"], "spotify");
    assert_eq!(entries[0]["externalUserName"], "Sam");
    assert_eq!(entries[0]["connected"], true);
    assert!(entries[0].get("accessToken").is_none());
    assert!(entries[0].get("refreshToken").is_none());

    // a state token is good for one callback only
    let response = get(&router, &callback).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn denied_authorization_consumes_state_without_exchanging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (router, connections) = app(Some(spotify_config(&server)));

    let response = get(&router, "/auth/spotify/start").await;
    let authorize = Url::parse(&location(&response)).unwrap();
    let state = authorize
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let response = get(
        &router,
        &format!("/auth/spotify/callback?state={}&error=access_denied", state),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(connections.list(USER).await.unwrap().is_empty());

    let response = get(
        &router,
        &format!("/auth/spotify/callback?state={}&code=abc", state),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disconnect_removes_the_connection() {
    let server = MockServer::start().await;
    let (router, connections) = app(Some(spotify_config(&server)));
    connections
        .save(common::live_connection("access-1"))
        .await
        .unwrap();

    let disconnect = || {
        router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/spotify/disconnect")
                .body(Body::empty())
                .unwrap(),
        )
    };

    let response = disconnect().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(connections.list(USER).await.unwrap().is_empty());

    let response = disconnect().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transfer_with_absent_field_gets_a_json_error() {
    let (router, _) = app(None);

    let response = post_json(
        &router,
        "/api/v1/transfers",
        json!({ "source": "mock", "target": "mock" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Bad request");
}

#[tokio::test]
async fn spotify_status_reflects_the_stored_connection() {
    let server = MockServer::start().await;
    let (router, connections) = app(Some(spotify_config(&server)));

    let response = get(&router, "/auth/spotify/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["provider"], "spotify");
    assert_eq!(body["connected"], false);
    assert!(body.get("userName").is_none());

    connections
        .save(common::live_connection("access-1"))
        .await
        .unwrap();

    let body = body_json(get(&router, "/auth/spotify/status").await).await;
    assert_eq!(body["connected"], true);
    assert_eq!(body["userName"], "Sam");

    let (router, _) = app(None);
    let response = get(&router, "/auth/spotify/status").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
