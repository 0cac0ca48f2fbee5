//! Test support: an in-process stand-in for the forecasting backend.

use crate::api::{ApiClient, ClientConfig};
use crate::session::{MemoryTokenStore, Session};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret1";
pub const TOKEN: &str = "tok-ada";
/// Token the backend answers with 500 on every authenticated route
pub const BROKEN_TOKEN: &str = "tok-broken";

pub const INVALID_LOGIN_BODY: &str = r#"{"error": "Invalid email or password"}"#;
pub const MISSING_AUTH_BODY: &str = r#"{"msg": "Missing Authorization Header"}"#;
pub const USERNAME_TAKEN_BODY: &str = r#"{"error": "Username already taken"}"#;
pub const WRONG_PASSWORD_BODY: &str = r#"{"error": "Old password is incorrect"}"#;
pub const SERVER_ERROR_BODY: &str = r#"{"error": "Internal server error"}"#;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

type RequestLog = Arc<Mutex<Vec<Recorded>>>;

/// Running mock backend
pub struct MockBackend {
    pub base_url: String,
    log: RequestLog,
}

impl MockBackend {
    /// Number of requests received on `path`
    pub fn hits(&self, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Authorization header of the last request on `path`
    pub fn authorization_for(&self, path: &str) -> Option<String> {
        self.last(path).and_then(|r| r.authorization)
    }

    /// JSON body of the last request on `path`
    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.last(path).and_then(|r| r.body)
    }

    fn last(&self, path: &str) -> Option<Recorded> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }

    /// Client pointed at this backend
    pub fn client(&self, session: Session) -> ApiClient {
        ApiClient::new(
            ClientConfig {
                base_url: self.base_url.clone(),
            },
            session,
        )
        .unwrap()
    }
}

/// Start a mock backend on an ephemeral port
pub async fn spawn_backend() -> MockBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::default();

    let app = Router::new().fallback(handle).with_state(Arc::clone(&log));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        log,
    }
}

/// Base URL with nothing listening behind it
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn logged_in_session() -> Session {
    Session::new(MemoryTokenStore::with_token(TOKEN))
}

fn raw(status: StatusCode, body: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

fn ok(status: StatusCode, body: Value) -> Response {
    raw(status, &body.to_string())
}

async fn handle(
    State(log): State<RequestLog>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body: Option<Value> = serde_json::from_slice(&body).ok();

    log.lock().unwrap().push(Recorded {
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let body = body.unwrap_or(Value::Null);
    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
    let bearer = authorization
        .as_deref()
        .and_then(|a| a.strip_prefix("Bearer "));

    match path.as_str() {
        "/api/health" => ok(
            StatusCode::OK,
            json!({"status": "OK", "message": "Load Forecasting API is running"}),
        ),
        "/api/status" => ok(
            StatusCode::OK,
            json!({
                "status": "running",
                "version": "1.0.0",
                "database": "connected",
                "environment": "development"
            }),
        ),
        "/api/auth/login" => {
            if field("email") == "boom@example.com" {
                raw(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
            } else if field("email") == EMAIL && field("password") == PASSWORD {
                ok(
                    StatusCode::OK,
                    json!({
                        "access_token": TOKEN,
                        "user_id": 1,
                        "username": "ada",
                        "email": EMAIL,
                        "role": "user",
                        "message": "Login successful"
                    }),
                )
            } else {
                raw(StatusCode::UNAUTHORIZED, INVALID_LOGIN_BODY)
            }
        }
        "/api/auth/register" => {
            if field("username") == "taken" {
                raw(StatusCode::CONFLICT, USERNAME_TAKEN_BODY)
            } else {
                ok(
                    StatusCode::CREATED,
                    json!({
                        "message": "User registered successfully",
                        "user_id": 2,
                        "email": field("email"),
                        "username": field("username")
                    }),
                )
            }
        }
        "/api/auth/logout" => ok(
            StatusCode::OK,
            json!({"message": "Logout successful. Please delete token from client"}),
        ),
        _ if bearer == Some(BROKEN_TOKEN) => {
            raw(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
        }
        _ if bearer != Some(TOKEN) => raw(StatusCode::UNAUTHORIZED, MISSING_AUTH_BODY),
        "/api/auth/user-info" => ok(
            StatusCode::OK,
            json!({
                "user_id": 1,
                "username": "ada",
                "email": EMAIL,
                "role": "user",
                "is_verified": true,
                "is_active": true
            }),
        ),
        "/api/auth/verify-token" => ok(
            StatusCode::OK,
            json!({
                "valid": true,
                "user_id": "1",
                "username": "ada",
                "email": EMAIL,
                "role": "user"
            }),
        ),
        "/api/auth/change-password" => {
            if field("old_password") == PASSWORD {
                ok(
                    StatusCode::OK,
                    json!({"message": "Password changed successfully"}),
                )
            } else {
                raw(StatusCode::UNAUTHORIZED, WRONG_PASSWORD_BODY)
            }
        }
        "/api/predict/single" => ok(
            StatusCode::OK,
            json!({
                "predicted_load": 1523.42,
                "lower_bound": 1401.1,
                "upper_bound": 1650.87,
                "confidence_interval": "1401.10 - 1650.87"
            }),
        ),
        "/api/predict/history" => ok(
            StatusCode::OK,
            json!([
                {
                    "date": "2025-03-01",
                    "hour": 14,
                    "temperature": 21.5,
                    "predicted_load": 1523.42,
                    "lower_bound": 1401.1,
                    "upper_bound": 1650.87
                },
                {
                    "date": "2025-02-28",
                    "hour": 9,
                    "temperature": 12.0,
                    "predicted_load": 1310.0,
                    "lower_bound": 1200.5,
                    "upper_bound": 1422.75
                }
            ]),
        ),
        _ => raw(StatusCode::NOT_FOUND, r#"{"error": "Endpoint not found"}"#),
    }
}
