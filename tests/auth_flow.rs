//! End-to-end tests for sign-in and transparent token refresh.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{Value, json};
use wayfinder::{
    AuthRepository, BaseUrl, Credentials, InMemoryTokenStore, NetworkingError, OAuthTokens,
    PoiRepository, TokenStore, Wayfinder,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poi_body(id: u64, name: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "name": name,
            "coordinates": { "lat": 55.95, "lon": -3.19 },
            "category": "park",
            "pictures": []
        }
    })
}

fn client_for(server: &MockServer, store: &Arc<InMemoryTokenStore>) -> Wayfinder {
    let base_url = BaseUrl::parse(&format!("{}/api/v1", server.uri()))
        .expect("mock server URL should parse");
    Wayfinder::builder(base_url)
        .token_store(Arc::clone(store) as Arc<dyn TokenStore>)
        .build()
        .expect("client should build")
}

fn expired_store() -> Arc<InMemoryTokenStore> {
    Arc::new(InMemoryTokenStore::with_tokens(OAuthTokens::new(
        "old",
        Some("r1".to_owned()),
    )))
}

async fn mount_expired_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/pois/42"))
        .and(header("authorization", "Bearer old"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "token expired" })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_stores_tokens_used_by_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": { "id": 7, "email": "ada@example.com", "first_name": "Ada" },
                "access_token": "a1",
                "refresh_token": "r1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pois/42"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body(42, "Quay")))
        .expect(1)
        .mount(&server)
        .await;
    let store = Arc::new(InMemoryTokenStore::new());
    let client = client_for(&server, &store);

    let session = client
        .auth()
        .login(&Credentials::new("ada@example.com", "pw"))
        .await
        .expect("login should succeed");
    let poi = client.pois().poi("42").await.expect("lookup should succeed");

    assert_eq!(session.user.id, "7");
    assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    assert_eq!(poi.name, "Quay");
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;
    mount_expired_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "r1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "a2", "refresh_token": "r2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pois/42"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body(42, "Quay")))
        .expect(1)
        .mount(&server)
        .await;
    let store = expired_store();
    let client = client_for(&server, &store);

    let poi = client.pois().poi("42").await.expect("replay should succeed");

    assert_eq!(poi.name, "Quay");
    assert_eq!(store.access_token().as_deref(), Some("a2"));
    assert_eq!(store.refresh_token().as_deref(), Some("r2"));
}

#[tokio::test]
async fn concurrent_expiries_share_one_refresh() {
    let server = MockServer::start().await;
    mount_expired_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "access_token": "a2", "refresh_token": "r2" } }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pois/42"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body(42, "Quay")))
        .expect(4)
        .mount(&server)
        .await;
    let store = expired_store();
    let client = client_for(&server, &store);
    let pois = client.pois();

    let results = join_all((0..4).map(|_| pois.poi("42"))).await;

    assert!(
        results.iter().all(Result::is_ok),
        "every request should succeed, got {results:?}"
    );
}

#[tokio::test]
async fn rejected_refresh_clears_tokens() {
    let server = MockServer::start().await;
    mount_expired_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "refresh token revoked" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let store = expired_store();
    let client = client_for(&server, &store);

    let result = client.pois().poi("42").await;

    assert!(
        matches!(
            &result,
            Err(NetworkingError::Server { code: 401, message: Some(message) })
                if message == "refresh token revoked"
        ),
        "expected Server 401, got {result:?}"
    );
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

#[tokio::test]
async fn second_rejection_after_refresh_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pois/42"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "not allowed" })),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "a2", "refresh_token": "r2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let store = expired_store();
    let client = client_for(&server, &store);

    let result = client.pois().poi("42").await;

    assert!(
        matches!(result, Err(NetworkingError::Server { code: 401, .. })),
        "expected Server 401, got {result:?}"
    );
    assert_eq!(store.access_token().as_deref(), Some("a2"));
}
