//! Profile page

use super::{has_token, Effect, Route};
use crate::api::{ForecastApi, UserProfile};
use crate::session::SessionError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProfileState {
    #[default]
    Loading,
    Loaded(UserProfile),
    /// No token, or the fetch failed for any reason
    LoginRequired,
}

#[derive(Debug, Default)]
pub struct ProfilePage {
    state: ProfileState,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.state {
            ProfileState::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    /// Fetch the current user
    pub async fn load<A: ForecastApi + ?Sized>(&mut self, api: &A) {
        self.state = ProfileState::Loading;

        if !has_token(api) {
            self.state = ProfileState::LoginRequired;
            return;
        }

        self.state = match api.user_info().await {
            Ok(profile) => ProfileState::Loaded(profile),
            Err(e) => {
                tracing::debug!("Profile unavailable: {}", e);
                ProfileState::LoginRequired
            }
        };
    }

    /// Forget the token and head to the login page
    ///
    /// The server is told as a courtesy; its answer does not matter.
    /// Failing to clear the local token is an error and leaves the page as it was.
    pub async fn logout<A: ForecastApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<Effect, SessionError> {
        if has_token(api) {
            if let Err(e) = api.logout().await {
                tracing::debug!("Server logout failed: {}", e);
            }
        }

        api.session().logout()?;

        self.state = ProfileState::LoginRequired;
        Ok(Effect::Navigate(Route::Login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, Session, TokenStore};
    use crate::testing;
    use std::path::PathBuf;

    /// Holds a token but refuses to remove it
    struct ReadOnlyStore(String);

    impl TokenStore for ReadOnlyStore {
        fn load(&self) -> Result<Option<String>, SessionError> {
            Ok(Some(self.0.clone()))
        }

        fn save(&self, _token: &str) -> Result<(), SessionError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            Err(SessionError::Io {
                path: PathBuf::from("/readonly/token"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[tokio::test]
    async fn test_profile_loads() {
        let backend = testing::spawn_backend().await;
        let api = backend.client(testing::logged_in_session());

        let mut page = ProfilePage::new();
        assert_eq!(page.state(), &ProfileState::Loading);
        page.load(&api).await;

        let profile = page.profile().unwrap();
        assert_eq!(profile.username, "ada");
        assert_eq!(profile.email, testing::EMAIL);
        assert_eq!(profile.role, "user");
        assert!(profile.is_verified);
    }

    #[tokio::test]
    async fn test_no_token_skips_request() {
        let backend = testing::spawn_backend().await;
        let api = backend.client(Session::in_memory());

        let mut page = ProfilePage::new();
        page.load(&api).await;

        assert_eq!(page.state(), &ProfileState::LoginRequired);
        assert_eq!(backend.hits("/api/auth/user-info"), 0);
    }

    #[tokio::test]
    async fn test_failures_are_not_distinguished() {
        let backend = testing::spawn_backend().await;

        // Rejected token (401)
        let api = backend.client(Session::new(MemoryTokenStore::with_token("forged")));
        let mut page = ProfilePage::new();
        page.load(&api).await;
        assert_eq!(page.state(), &ProfileState::LoginRequired);

        // Server error (500)
        let api = backend.client(Session::new(MemoryTokenStore::with_token(
            testing::BROKEN_TOKEN,
        )));
        page.load(&api).await;
        assert_eq!(page.state(), &ProfileState::LoginRequired);

        // Nothing listening
        let offline = crate::api::ApiClient::new(
            crate::api::ClientConfig {
                base_url: testing::unreachable_base_url().await,
            },
            testing::logged_in_session(),
        )
        .unwrap();
        page.load(&offline).await;
        assert_eq!(page.state(), &ProfileState::LoginRequired);
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_next_load_prompts_login() {
        let backend = testing::spawn_backend().await;
        let session = testing::logged_in_session();
        let api = backend.client(session.clone());

        let mut page = ProfilePage::new();
        page.load(&api).await;
        assert!(page.profile().is_some());

        let effect = page.logout(&api).await.unwrap();
        assert_eq!(effect, Effect::Navigate(Route::Login));
        assert_eq!(session.token().unwrap(), None);
        assert_eq!(backend.hits("/api/auth/logout"), 1);

        let mut next = ProfilePage::new();
        next.load(&api).await;
        assert_eq!(next.state(), &ProfileState::LoginRequired);
    }

    #[tokio::test]
    async fn test_logout_works_offline() {
        let session = testing::logged_in_session();
        let offline = crate::api::ApiClient::new(
            crate::api::ClientConfig {
                base_url: testing::unreachable_base_url().await,
            },
            session.clone(),
        )
        .unwrap();

        let mut page = ProfilePage::new();
        let effect = page.logout(&offline).await.unwrap();

        assert_eq!(effect, Effect::Navigate(Route::Login));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_reports_token_that_could_not_be_cleared() {
        let backend = testing::spawn_backend().await;
        let session = Session::new(ReadOnlyStore(testing::TOKEN.to_string()));
        let api = backend.client(session.clone());

        let mut page = ProfilePage::new();
        page.load(&api).await;
        assert!(page.profile().is_some());

        let err = page.logout(&api).await.unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));

        // Still logged in locally, and the page did not pretend otherwise
        assert_eq!(session.token().unwrap().as_deref(), Some(testing::TOKEN));
        assert!(page.profile().is_some());
    }
}
