//! Forecasting API Client
//!
//! Typed access to the load-forecasting backend.
//!
//! ## Endpoints
//!
//! ### Auth
//! - `POST /api/auth/login` - Exchange credentials for a token
//! - `POST /api/auth/register` - Create an account
//! - `GET /api/auth/user-info` - Current user profile
//! - `GET /api/auth/verify-token` - Check the stored token
//! - `POST /api/auth/change-password` - Change password
//! - `POST /api/auth/logout` - Server-side logout acknowledgement
//!
//! ### Predictions
//! - `POST /api/predict/single` - Forecast load for one hour
//! - `GET /api/predict/history` - Past predictions for the current user
//!
//! ### Service
//! - `GET /api/health` - Liveness
//! - `GET /api/status` - Detailed status
//!
//! Every call is a single attempt: no retries, no timeouts, no backoff.

mod client;
pub mod dto;
mod error;

pub use client::{ApiClient, ClientConfig};
pub use dto::*;
pub use error::{ClientError, ClientResult};

use crate::session::Session;
use async_trait::async_trait;
use reqwest::Method;

/// Backend operations and where they live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    UserInfo,
    VerifyToken,
    ChangePassword,
    Logout,
    PredictSingle,
    History,
    Health,
    Status,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::ChangePassword
            | Endpoint::Logout
            | Endpoint::PredictSingle => Method::POST,
            Endpoint::UserInfo
            | Endpoint::VerifyToken
            | Endpoint::History
            | Endpoint::Health
            | Endpoint::Status => Method::GET,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/api/auth/login",
            Endpoint::Register => "/api/auth/register",
            Endpoint::UserInfo => "/api/auth/user-info",
            Endpoint::VerifyToken => "/api/auth/verify-token",
            Endpoint::ChangePassword => "/api/auth/change-password",
            Endpoint::Logout => "/api/auth/logout",
            Endpoint::PredictSingle => "/api/predict/single",
            Endpoint::History => "/api/predict/history",
            Endpoint::Health => "/api/health",
            Endpoint::Status => "/api/status",
        }
    }

    /// Whether the bearer token is attached
    pub fn requires_auth(self) -> bool {
        !matches!(
            self,
            Endpoint::Login | Endpoint::Register | Endpoint::Health | Endpoint::Status
        )
    }
}

/// Operations the pages need from the backend
///
/// [`ApiClient`] is the HTTP implementation; tests plug in fakes.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Session whose token authenticates requests
    fn session(&self) -> &Session;

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse>;

    async fn user_info(&self) -> ClientResult<UserProfile>;

    async fn history(&self) -> ClientResult<Vec<HistoryEntry>>;

    async fn predict(&self, request: &ForecastRequest) -> ClientResult<ForecastResult>;

    async fn verify_token(&self) -> ClientResult<TokenStatus>;

    async fn change_password(&self, request: &ChangePasswordRequest)
        -> ClientResult<MessageResponse>;

    async fn logout(&self) -> ClientResult<MessageResponse>;
}
