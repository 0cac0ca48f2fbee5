//! Registration page

use super::{required, required_raw, Effect, FormError, Route};
use crate::api::{ForecastApi, RegisterRequest};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    fn validate(&self) -> Result<RegisterRequest, FormError> {
        Ok(RegisterRequest {
            username: required(&self.username, "username")?,
            email: required(&self.email, "email")?,
            password: required_raw(&self.password, "password")?,
        })
    }
}

#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: RegisterForm,
    submitting: bool,
    notice: Option<String>,
    error: Option<String>,
}

impl RegisterPage {
    pub fn new(form: RegisterForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Server's success message, if it sent one
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Create the account; success sends the caller to the login page
    pub async fn submit<A: ForecastApi + ?Sized>(&mut self, api: &A) -> Effect {
        self.error = None;
        self.notice = None;

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return Effect::None;
            }
        };
        self.form.password.clear();

        self.submitting = true;
        let result = api.register(&request).await;
        self.submitting = false;

        match result {
            Ok(ack) => {
                tracing::info!(username = %request.username, "Registered");
                self.notice = ack.message().map(String::from);
                Effect::Navigate(Route::Login)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Effect::None
            }
        }
    }
}
