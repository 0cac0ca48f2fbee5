//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the forecasting backend.
//! Prediction values are kept as raw JSON so they display exactly as the
//! server sent them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// AUTH DTOs
// ============================================

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token; some deployments call it `access_token`
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration acknowledgement
///
/// The success body is server-defined, so the whole document is kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RegisterResponse {
    pub body: serde_json::Value,
}

impl RegisterResponse {
    /// The `message` field, when the server sent one
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }
}

/// Password change request
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Generic `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Current user, as returned by the user-info endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Result of checking a token with the server
#[derive(Debug, Clone, Deserialize)]
pub struct TokenStatus {
    pub valid: bool,
    #[serde(default)]
    pub user_id: Option<Opaque>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

// ============================================
// PREDICTION DTOs
// ============================================

/// Single-point forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    /// Air temperature in °C
    pub temperature: f64,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

/// Forecast returned by the prediction endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ForecastResult {
    pub predicted_load: Opaque,
    pub lower_bound: Opaque,
    pub upper_bound: Opaque,
    pub confidence_interval: Opaque,
}

/// One past prediction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub date: Opaque,
    pub hour: Opaque,
    pub temperature: Opaque,
    pub predicted_load: Opaque,
    pub lower_bound: Opaque,
    pub upper_bound: Opaque,
}

// ============================================
// SERVICE DTOs
// ============================================

/// Health or status report
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

// ============================================
// OPAQUE VALUES
// ============================================

/// A JSON value shown to the user exactly as received
///
/// Strings display without quotes, everything else in its JSON form.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Opaque(pub serde_json::Value);

impl Opaque {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<serde_json::Value> for Opaque {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
