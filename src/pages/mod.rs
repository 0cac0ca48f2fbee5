//! Pages
//!
//! Each page holds its own form and display state and talks to the backend
//! through [`ForecastApi`](crate::api::ForecastApi). Operations never
//! navigate on their own; they return an [`Effect`] for the caller to act on.
//!
//! - [`LoginPage`] / [`RegisterPage`]: credentials in, token out
//! - [`ForecastPage`]: temperature/hour/date in, load bounds out
//! - [`DashboardPage`], [`ProfilePage`], [`HistoryPage`]: read-only views that
//!   fall back to "please log in" on any failure
//! - [`ChangePasswordPage`], [`verify_session`]: account maintenance

mod account;
mod dashboard;
mod forecast;
mod history;
mod login;
mod profile;
mod register;

pub use account::{verify_session, ChangePasswordForm, ChangePasswordPage, SessionCheck};
pub use dashboard::{DashboardPage, DashboardState, DashboardSummary, MenuItem, MENU};
pub use forecast::{normalize_date, ForecastField, ForecastForm, ForecastPage, DATE_FORMAT_MESSAGE};
pub use history::{HistoryPage, HistoryState};
pub use login::{AuthStatus, LoginForm, LoginPage};
pub use profile::{ProfilePage, ProfileState};
pub use register::{RegisterForm, RegisterPage};

use crate::api::ForecastApi;
use thiserror::Error;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Forecast,
    History,
    Profile,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Forecast => "/forecast",
            Route::History => "/history",
            Route::Profile => "/profile",
        }
    }
}

/// What the caller should do after a page operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stay on the current page
    None,
    /// Move to another page
    Navigate(Route),
}

/// Local validation failures; the display text is shown as the page error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    #[error("{}", DATE_FORMAT_MESSAGE)]
    InvalidDate,

    #[error("Temperature must be a number.")]
    InvalidTemperature,

    #[error("Hour must be a whole number between 0 and 23.")]
    InvalidHour,
}

/// Trimmed value of a required field
fn required(value: &str, name: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(name))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Required field whose content is passed through untouched (passwords)
fn required_raw(value: &str, name: &'static str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(name))
    } else {
        Ok(value.to_string())
    }
}

/// Whether the session holds a token; a store failure counts as logged out
fn has_token<A: ForecastApi + ?Sized>(api: &A) -> bool {
    match api.session().token() {
        Ok(token) => token.is_some(),
        Err(e) => {
            tracing::warn!("Could not read session token: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        assert_eq!(required("  ada@example.com ", "email").unwrap(), "ada@example.com");
        assert_eq!(
            required("   ", "email").unwrap_err(),
            FormError::MissingField("email")
        );
        assert_eq!(required_raw(" pass ", "password").unwrap(), " pass ");
        assert_eq!(
            FormError::MissingField("username").to_string(),
            "Please fill in the username field."
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Profile.path(), "/profile");
    }
}
