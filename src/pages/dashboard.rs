//! Dashboard page
//!
//! Greets the user and summarizes their prediction history. Only the
//! profile fetch decides whether the user must log in; a missing history
//! leaves the summary empty.

use super::{has_token, Route};
use crate::api::{ForecastApi, HistoryEntry, UserProfile};

/// A dashboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const MENU: &[MenuItem] = &[
    MenuItem {
        title: "Run a Prediction",
        description: "Get electric load forecasts with confidence intervals.",
        route: Route::Forecast,
    },
    MenuItem {
        title: "Prediction History",
        description: "View your recent predictions.",
        route: Route::History,
    },
    MenuItem {
        title: "Profile & Settings",
        description: "View your profile information or log out.",
        route: Route::Profile,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub profile: UserProfile,
    /// `None` when history could not be fetched
    pub prediction_count: Option<usize>,
    /// First entry the server returned
    pub latest: Option<HistoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(DashboardSummary),
    LoginRequired,
}

#[derive(Debug, Default)]
pub struct DashboardPage {
    state: DashboardState,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn menu(&self) -> &'static [MenuItem] {
        MENU
    }

    pub async fn load<A: ForecastApi + ?Sized>(&mut self, api: &A) {
        self.state = DashboardState::Loading;

        if !has_token(api) {
            self.state = DashboardState::LoginRequired;
            return;
        }

        let profile = match api.user_info().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!("Dashboard profile unavailable: {}", e);
                self.state = DashboardState::LoginRequired;
                return;
            }
        };

        let (prediction_count, latest) = match api.history().await {
            Ok(entries) => (Some(entries.len()), entries.into_iter().next()),
            Err(e) => {
                tracing::debug!("Dashboard history unavailable: {}", e);
                (None, None)
            }
        };

        self.state = DashboardState::Ready(DashboardSummary {
            profile,
            prediction_count,
            latest,
        });
    }
}
