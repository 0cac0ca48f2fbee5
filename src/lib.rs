//! # Loadcast
//!
//! Client for the Load Forecaster service: register, log in, and request
//! hourly electric-load forecasts with confidence bounds.
//!
//! ## Modules
//!
//! - [`api`]: typed HTTP client for the forecasting backend
//! - [`session`]: the auth token and where it is kept
//! - [`pages`]: per-screen state (login, forecast, profile, ...) returning
//!   navigation effects instead of navigating
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loadcast::api::{ApiClient, ClientConfig};
//! use loadcast::pages::{Effect, ForecastField, ForecastPage, LoginPage};
//! use loadcast::session::{FileTokenStore, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(FileTokenStore::new("~/.local/share/loadcast/token"));
//!     let api = ApiClient::new(ClientConfig::default(), session)?;
//!
//!     let mut login = LoginPage::with_credentials("ada@example.com", "secret1");
//!     if login.submit(&api).await == Effect::None {
//!         eprintln!("{}", login.error().unwrap_or_default());
//!         return Ok(());
//!     }
//!
//!     let mut forecast = ForecastPage::new();
//!     forecast.set_field(ForecastField::Temperature, "21.5");
//!     forecast.set_field(ForecastField::Hour, "14");
//!     forecast.set_field(ForecastField::Date, "2025-03-01");
//!     forecast.submit(&api).await;
//!
//!     if let Some(result) = forecast.result() {
//!         println!("Predicted load: {}", result.predicted_load);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod pages;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{ApiClient, ClientConfig, ClientError, ClientResult, Endpoint, ForecastApi};

pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};

pub use pages::{Effect, FormError, Route};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
