//! Prediction history page

use super::has_token;
use crate::api::{ForecastApi, HistoryEntry};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HistoryState {
    #[default]
    Loading,
    Loaded(Vec<HistoryEntry>),
    LoginRequired,
}

#[derive(Debug, Default)]
pub struct HistoryPage {
    state: HistoryState,
    limit: Option<usize>,
}

impl HistoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show at most `limit` entries, in the order the server returns them
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Entries to display
    pub fn entries(&self) -> &[HistoryEntry] {
        match &self.state {
            HistoryState::Loaded(entries) => {
                let shown = self.limit.unwrap_or(entries.len()).min(entries.len());
                &entries[..shown]
            }
            _ => &[],
        }
    }

    /// Total entries the server returned, before the limit
    pub fn total(&self) -> usize {
        match &self.state {
            HistoryState::Loaded(entries) => entries.len(),
            _ => 0,
        }
    }

    pub async fn load<A: ForecastApi + ?Sized>(&mut self, api: &A) {
        self.state = HistoryState::Loading;

        if !has_token(api) {
            self.state = HistoryState::LoginRequired;
            return;
        }

        self.state = match api.history().await {
            Ok(entries) => HistoryState::Loaded(entries),
            Err(e) => {
                tracing::debug!("History unavailable: {}", e);
                HistoryState::LoginRequired
            }
        };
    }
}
