//! HTTP server for pwhash.
//!
//! Accepts clear-text passwords, stores their SHA-512 digests under integer
//! keys, serves them back by key, and drains gracefully on request: once
//! `/shutdown` is called no new work is admitted, and the server stops only
//! after every admitted hash has been stored.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod service;
pub mod stats;

pub use config::{ResponseMode, ServerConfig};
pub use error::{ServerError, ServerResult, ServiceError, ServiceResult};
pub use handler::AppState;
pub use server::HashServer;
pub use service::{HashService, PendingHash};
pub use stats::{Stats, StatsSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use pwhash_protocol::{HealthResponse, StatsResponse};

    const ANGRY_MONKEY: &str =
        "ZEHhWB65gUlzdVwtDQArEyx-KVLzp_aTaRaPlBzYRIFj6vjFdqEb0Q5B8zVKCZ0vKbZPZklJz0Fd7su2A-gf7Q==";

    fn app(delay_ms: u64, mode: ResponseMode) -> (Router, HashService) {
        let service = HashService::new(Duration::from_millis(delay_ms));
        let router = router::build_router(AppState {
            service: service.clone(),
            mode,
        });
        (router, service)
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/hash")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn put(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn wait_idle(service: &HashService) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while service.gate().in_flight() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("hashes did not finish");
    }

    #[tokio::test]
    async fn deferred_submit_returns_key() {
        let (app, service) = app(0, ResponseMode::Deferred);
        let (status, body) = send(&app, post_form("password=angryMonkey")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0\n");

        wait_idle(&service).await;
        let (status, body) = send(&app, get("/hash/0")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{ANGRY_MONKEY}\n"));
    }

    #[tokio::test]
    async fn synchronous_submit_returns_digest() {
        let (app, service) = app(0, ResponseMode::Synchronous);
        let (status, body) = send(&app, post_form("password=angryMonkey")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{ANGRY_MONKEY}\n"));
        assert_eq!(service.gate().in_flight(), 0);
    }

    #[tokio::test]
    async fn lookup_while_pending() {
        let (app, service) = app(300, ResponseMode::Deferred);
        let (_, key) = send(&app, post_form("password=slow")).await;
        assert_eq!(key, "0\n");

        let (status, body) = send(&app, get("/hash/0")).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, "pending\n");

        wait_idle(&service).await;
        let (status, _) = send(&app, get("/hash/0")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_password_is_bad_request() {
        let (app, service) = app(0, ResponseMode::Deferred);
        let (status, _) = send(&app, post_form("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, post_form("password=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, post_form("user=bob")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(service.lookup(0).unwrap(), pwhash_store::Lookup::NotFound);
    }

    #[tokio::test]
    async fn lookup_errors() {
        let (app, _) = app(0, ResponseMode::Deferred);
        let (status, _) = send(&app, get("/hash/999999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, get("/hash/-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, get("/hash/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let (app, _) = app(0, ResponseMode::Deferred);
        let (status, _) = send(&app, get("/hash")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _) = send(&app, get("/shutdown")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn stats_endpoint() {
        let (app, service) = app(0, ResponseMode::Synchronous);
        let (_, body) = send(&app, get("/stats")).await;
        let stats: StatsResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(stats, StatsResponse { total: 0, average: 0 });

        send(&app, post_form("password=a")).await;
        send(&app, post_form("password=b")).await;
        wait_idle(&service).await;

        let (status, body) = send(&app, get("/stats")).await;
        assert_eq!(status, StatusCode::OK);
        let stats: StatsResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(stats.total, 2);
    }

    #[tokio::test]
    async fn shutdown_drains_then_rejects() {
        let (app, service) = app(200, ResponseMode::Deferred);
        for pw in ["a", "b", "c"] {
            let (status, _) = send(&app, post_form(&format!("password={pw}"))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, put("/shutdown")).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, r#"{"status":"draining","in_flight":3}"#);

        let (status, _) = send(&app, post_form("password=late")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!service.gate().is_terminated());

        tokio::time::timeout(Duration::from_secs(2), service.gate().terminated())
            .await
            .expect("termination not signalled");
        assert_eq!(service.stats().total, 3);

        let (status, body) = send(&app, put("/shutdown")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"terminated"}"#);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, service) = app(0, ResponseMode::Deferred);
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_str(&body).unwrap();
        assert!(health.accepting);
        assert_eq!(health.status, "ok");

        service.shutdown();
        let (_, body) = send(&app, get("/health")).await;
        let health: HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "draining");
    }
}
