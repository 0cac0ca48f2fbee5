//! Account maintenance: password change and token check

use super::{has_token, required_raw, FormError};
use crate::api::{ChangePasswordRequest, ForecastApi, TokenStatus};

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordForm {
    fn validate(&self) -> Result<ChangePasswordRequest, FormError> {
        Ok(ChangePasswordRequest {
            old_password: required_raw(&self.old_password, "current password")?,
            new_password: required_raw(&self.new_password, "new password")?,
        })
    }
}

#[derive(Debug, Default)]
pub struct ChangePasswordPage {
    pub form: ChangePasswordForm,
    notice: Option<String>,
    error: Option<String>,
}

impl ChangePasswordPage {
    pub fn new(form: ChangePasswordForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit<A: ForecastApi + ?Sized>(&mut self, api: &A) {
        self.notice = None;
        self.error = None;

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        self.form = ChangePasswordForm::default();

        match api.change_password(&request).await {
            Ok(ack) => self.notice = Some(ack.message),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Outcome of checking the stored token with the server
#[derive(Debug, Clone)]
pub enum SessionCheck {
    Valid(TokenStatus),
    LoginRequired,
}

/// Ask the server whether the stored token is still good
///
/// Like the read-only pages, any failure means "log in again".
pub async fn verify_session<A: ForecastApi + ?Sized>(api: &A) -> SessionCheck {
    if !has_token(api) {
        return SessionCheck::LoginRequired;
    }

    match api.verify_token().await {
        Ok(status) if status.valid => SessionCheck::Valid(status),
        Ok(_) => SessionCheck::LoginRequired,
        Err(e) => {
            tracing::debug!("Token check failed: {}", e);
            SessionCheck::LoginRequired
        }
    }
}
