//! HTTP client for the forecasting backend.

use super::{
    ChangePasswordRequest, ClientError, ClientResult, Endpoint, ForecastApi, ForecastRequest,
    ForecastResult, HistoryEntry, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, ServiceStatus, TokenStatus, UserProfile,
};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Forecasting backend REST client
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    session: Session,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin (e.g., "http://localhost:5000")
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl From<&crate::config::ApiConfig> for ClientConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
        }
    }
}

impl ApiClient {
    /// Create a client that authenticates with `session`
    pub fn new(config: ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("loadcast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    fn request(&self, endpoint: Endpoint) -> RequestBuilder {
        self.client.request(endpoint.method(), self.url(endpoint))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<T> {
        self.execute(endpoint, self.request(endpoint)).await
    }

    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(endpoint, self.request(endpoint).json(body)).await
    }

    /// Send once; 2xx bodies are decoded, anything else becomes [`ClientError::Api`]
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        mut request: RequestBuilder,
    ) -> ClientResult<T> {
        if endpoint.requires_auth() {
            // Read at call time so login/logout take effect immediately
            match self.session.token()? {
                Some(token) => request = request.bearer_auth(token),
                None => tracing::debug!(path = endpoint.path(), "No token for authenticated call"),
            }
        }

        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            method = %endpoint.method(),
            path = endpoint.path(),
            status = status.as_u16(),
            "API response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Check backend liveness
    pub async fn health(&self) -> ClientResult<ServiceStatus> {
        self.get(Endpoint::Health).await
    }

    /// Detailed backend status
    pub async fn status(&self) -> ClientResult<ServiceStatus> {
        self.get(Endpoint::Status).await
    }
}

#[async_trait]
impl ForecastApi for ApiClient {
    fn session(&self) -> &Session {
        &self.session
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.post(Endpoint::Login, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.post(Endpoint::Register, request).await
    }

    async fn user_info(&self) -> ClientResult<UserProfile> {
        self.get(Endpoint::UserInfo).await
    }

    async fn history(&self) -> ClientResult<Vec<HistoryEntry>> {
        self.get(Endpoint::History).await
    }

    async fn predict(&self, request: &ForecastRequest) -> ClientResult<ForecastResult> {
        self.post(Endpoint::PredictSingle, request).await
    }

    async fn verify_token(&self) -> ClientResult<TokenStatus> {
        self.get(Endpoint::VerifyToken).await
    }

    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ClientResult<MessageResponse> {
        self.post(Endpoint::ChangePassword, request).await
    }

    async fn logout(&self) -> ClientResult<MessageResponse> {
        self.post(Endpoint::Logout, &serde_json::json!({})).await
    }
}
