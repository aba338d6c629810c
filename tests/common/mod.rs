#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use cbam_audit::config::Config;
use cbam_audit::state::SharedState;

/// A running test server instance bound to a random local port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Submit a JSON body to /submit_data, return (body, status).
    pub async fn submit(&self, body: &Value) -> (Value, StatusCode) {
        self.post("/submit_data", body).await
    }

    /// Submit and return the new submission id, asserting success.
    pub async fn submit_ok(&self, client_id: &str, data: Value) -> String {
        let (body, status) = self.submit(&json!({ "client_id": client_id, "data": data })).await;
        assert_eq!(status, StatusCode::OK, "submit failed: {body}");
        body["submission_id"].as_str().unwrap().to_string()
    }

    pub async fn approve(&self, submission_id: &str) -> (Value, StatusCode) {
        self.post("/approve_submission", &json!({ "submission_id": submission_id }))
            .await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn dashboard(&self) -> Value {
        let (body, status) = self.get("/compliance_dashboard").await;
        assert_eq!(status, StatusCode::OK);
        body["dashboard"].clone()
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 64 * 1024,
        submit_rate_limit: 1_000,
        log_level: "warn".to_string(),
        ..Config::default()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let (app, state) = cbam_audit::build_app(config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
    }
}
