//! Login page

use super::{required, required_raw, Effect, FormError, Route};
use crate::api::{ClientError, ForecastApi, LoginRequest};

/// Where the login flow stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Login form fields
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn validate(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: required(&self.email, "email")?,
            password: required_raw(&self.password, "password")?,
        })
    }
}

#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: LoginForm,
    status: AuthStatus,
    error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            form: LoginForm {
                email: email.into(),
                password: password.into(),
            },
            ..Self::default()
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the credentials
    ///
    /// On success the token is stored in the session and the caller is sent
    /// to the dashboard. On failure the server's text becomes the page error
    /// and the page returns to anonymous. The password is dropped from the
    /// form either way.
    pub async fn submit<A: ForecastApi + ?Sized>(&mut self, api: &A) -> Effect {
        self.error = None;

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return Effect::None;
            }
        };
        self.form.password.clear();

        self.status = AuthStatus::Authenticating;
        let outcome = match api.login(&request).await {
            Ok(response) => api
                .session()
                .store_token(&response.token)
                .map_err(ClientError::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                tracing::info!(email = %request.email, "Logged in");
                self.status = AuthStatus::Authenticated;
                Effect::Navigate(Route::Dashboard)
            }
            Err(e) => {
                tracing::debug!("Login failed: {}", e);
                self.status = AuthStatus::Anonymous;
                self.error = Some(e.to_string());
                Effect::None
            }
        }
    }
}
