//! In-process test harness
//!
//! Drives the real router as a `tower::Service` against an in-memory store
//! and a throwaway work directory, no sockets involved.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use order_server::db::DbService;
use order_server::{Config, ServerState, app};
use serde_json::Value;
use surrealdb::Surreal;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestServer {
    pub app: Router,
    pub state: ServerState,
    // Held so the uploads/work dir outlives the test
    _work_dir: TempDir,
}

/// A server over a fresh in-memory store.
pub async fn spawn() -> TestServer {
    let work_dir = TempDir::new().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config
        .ensure_work_dir_structure()
        .expect("work dir structure");

    let db = Surreal::init();
    DbService::connect_memory(&db).await.expect("memory store");

    let state = ServerState::with_db(config, db);
    TestServer {
        app: app(state.clone()),
        state,
        _work_dir: work_dir,
    }
}

/// A server whose store never connected; `/api/*` must answer 503.
pub async fn spawn_disconnected() -> TestServer {
    let work_dir = TempDir::new().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config
        .ensure_work_dir_structure()
        .expect("work dir structure");

    let state = ServerState::with_disconnected_db(config);
    TestServer {
        app: app(state.clone()),
        state,
        _work_dir: work_dir,
    }
}

impl TestServer {
    /// Send a JSON request and parse the JSON response (Null when empty).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(json.to_string())).expect("request")
            }
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router call");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request("PATCH", uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Send a multipart request built with [`multipart_body`].
    pub async fn post_multipart(
        &self,
        uri: &str,
        boundary: &str,
        body: Vec<u8>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router call");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

/// One multipart part: field name, optional (filename, content type), bytes.
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

/// Assemble a multipart/form-data body by hand.
pub fn multipart_body(boundary: &str, parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file {
            Some((filename, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Smallest valid 1x1 PNG, for upload tests.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Create a product, returning its id.
pub async fn seed_product(server: &TestServer, name: &str, price: f64) -> String {
    let (status, body) = server
        .post(
            "/api/products",
            serde_json::json!({
                "name": name,
                "category": "Chair",
                "price": price,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed product: {body}");
    body["id"].as_str().expect("product id").to_string()
}

/// Create a customer, returning its id.
pub async fn seed_customer(server: &TestServer, name: &str) -> String {
    let (status, body) = server
        .post(
            "/api/customers",
            serde_json::json!({
                "name": name,
                "phone": "555-0100",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed customer: {body}");
    body["id"].as_str().expect("customer id").to_string()
}
