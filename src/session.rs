//! Signed-in state for one shell run: the HTTP gateway, the persisted token,
//! the dashboard and the cached profile.

use std::path::Path;

use chrono::{DateTime, Utc};
use tally_config::{Config, ConfigError, ConfigManager, TokenStore};
use tally_core::{
    AuthService, BudgetGateway, CoreError, CoreResult, Dashboard, ProfileService, TokenSink,
};
use tally_domain::{
    AuthToken, Credentials, Expense, ExpenseId, PasswordChange, PhotoUpload, PhotoUploaded,
    ProfileUpdate, Registration, UserProfile,
};
use tally_gateway::HttpGateway;
use tracing::info;

use crate::errors::TallyError;

/// Token file scoped to the server it was issued by.
#[derive(Debug, Clone)]
pub struct TokenFile {
    store: TokenStore,
    api_base: String,
    saved_at: Option<DateTime<Utc>>,
}

impl TokenFile {
    pub fn new(store: TokenStore, api_base: impl Into<String>) -> Self {
        Self {
            store,
            api_base: api_base.into(),
            saved_at: None,
        }
    }

    /// Reads a previously stored token for this server.
    pub fn restore(&mut self) -> Option<AuthToken> {
        let stored = self.store.load(&self.api_base)?;
        self.saved_at = Some(stored.saved_at);
        Some(stored.token)
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }
}

impl TokenSink for TokenFile {
    fn store(&mut self, token: &AuthToken) -> CoreResult<()> {
        let stored = self
            .store
            .save(token, &self.api_base)
            .map_err(|err| CoreError::TokenStore(err.to_string()))?;
        self.saved_at = Some(stored.saved_at);
        Ok(())
    }

    fn clear(&mut self) -> CoreResult<()> {
        self.saved_at = None;
        self.store
            .clear()
            .map_err(|err| CoreError::TokenStore(err.to_string()))
    }
}

pub struct Session {
    config: Config,
    config_manager: Option<ConfigManager>,
    gateway: HttpGateway,
    tokens: TokenFile,
    dashboard: Dashboard,
    profile: Option<UserProfile>,
}

impl Session {
    /// Loads config from `base_dir`, applies env overrides and restores any token.
    pub fn open(base_dir: &Path) -> Result<Self, TallyError> {
        let manager = ConfigManager::with_base_dir(base_dir)?;
        let config = manager.load()?.with_env_overrides();
        let mut session = Self::with_config(config, TokenStore::in_dir(base_dir))?;
        session.config_manager = Some(manager);
        Ok(session)
    }

    pub fn with_config(config: Config, store: TokenStore) -> Result<Self, TallyError> {
        let mut gateway = HttpGateway::from_config(&config)?;
        let mut tokens = TokenFile::new(store, config.api_base_trimmed());
        if let Some(token) = tokens.restore() {
            info!(api_base = %config.api_base_trimmed(), "restored saved session");
            gateway.set_token(Some(token));
        }

        Ok(Self {
            config,
            config_manager: None,
            gateway,
            tokens,
            dashboard: Dashboard::new(),
            profile: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Persists one preference. Returns `false` when the change only takes
    /// effect on the next start (server address and timeout).
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let manager = self
            .config_manager
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("this session has no config file".into()))?;

        // Env overrides must not leak into the saved file.
        let mut stored = manager.load()?;
        stored.set_field(key, value)?;
        manager.save(&stored)?;
        info!(key, "saved preference");

        if matches!(key, "api_base" | "request_timeout_secs") {
            return Ok(false);
        }
        self.config.set_field(key, value)?;
        Ok(true)
    }

    pub fn api_base(&self) -> &str {
        self.gateway.api_base()
    }

    pub fn is_signed_in(&self) -> bool {
        self.gateway.has_token()
    }

    pub fn signed_in_since(&self) -> Option<DateTime<Utc>> {
        self.tokens.saved_at()
    }

    pub fn login(&mut self, credentials: &Credentials) -> CoreResult<()> {
        AuthService::login(&mut self.gateway, &mut self.tokens, credentials)?;
        self.forget_cached();
        Ok(())
    }

    pub fn register(&mut self, registration: &Registration, confirm: &str) -> CoreResult<()> {
        AuthService::register(&mut self.gateway, &mut self.tokens, registration, confirm)?;
        self.forget_cached();
        Ok(())
    }

    pub fn logout(&mut self) -> CoreResult<()> {
        self.forget_cached();
        AuthService::logout(&mut self.gateway, &mut self.tokens)
    }

    pub fn change_password(&mut self, change: &PasswordChange) -> CoreResult<String> {
        let result = AuthService::change_password(&self.gateway, change);
        self.guard(result)
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Refetches budget and expenses.
    pub fn refresh(&mut self) -> CoreResult<()> {
        let result = self.dashboard.load(&self.gateway);
        self.guard(result)
    }

    /// Loads the dashboard on first use only.
    pub fn ensure_loaded(&mut self) -> CoreResult<()> {
        if self.dashboard.is_loaded() {
            return Ok(());
        }
        self.refresh()
    }

    pub fn set_budget(&mut self, raw: &str) -> CoreResult<f64> {
        let result = self.dashboard.set_budget(&self.gateway, raw);
        self.guard(result)
    }

    pub fn add_expense(&mut self, name: &str, amount: &str, category: &str) -> CoreResult<Expense> {
        let result = self
            .dashboard
            .add_expense(&self.gateway, name, amount, category);
        self.guard(result)
    }

    pub fn delete_expense(&mut self, id: &ExpenseId) -> CoreResult<Option<Expense>> {
        let result = self.dashboard.delete_expense(&self.gateway, id);
        self.guard(result)
    }

    /// The cached profile, fetched on first use.
    pub fn profile(&mut self) -> CoreResult<&UserProfile> {
        let profile = match self.profile.take() {
            Some(profile) => profile,
            None => {
                let result = ProfileService::load(&self.gateway);
                self.guard(result)?
            }
        };
        Ok(self.profile.insert(profile))
    }

    pub fn update_profile(&mut self, update: &ProfileUpdate) -> CoreResult<&UserProfile> {
        let result = ProfileService::update(&self.gateway, update);
        let mut updated = self.guard(result)?;
        if updated.profile_photo_url.is_none() {
            updated.profile_photo_url = self
                .profile
                .as_ref()
                .and_then(|current| current.profile_photo_url.clone());
        }
        Ok(self.profile.insert(updated))
    }

    pub fn upload_photo(&mut self, upload: &PhotoUpload) -> CoreResult<PhotoUploaded> {
        let mut profile = self.profile()?.clone();
        let result = ProfileService::upload_photo(&self.gateway, &mut profile, upload);
        let uploaded = self.guard(result)?;
        self.profile = Some(profile);
        Ok(uploaded)
    }

    fn forget_cached(&mut self) {
        self.dashboard.clear();
        self.profile = None;
    }

    /// Ends the session when the service rejected it.
    fn guard<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(err) = &result {
            if AuthService::handle_failure(&mut self.gateway, &mut self.tokens, err) {
                self.forget_cached();
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn offline_session(dir: &TempDir) -> Session {
        let config = Config {
            api_base: "http://127.0.0.1:9/api/".into(),
            request_timeout_secs: 1,
            ..Config::default()
        };
        Session::with_config(config, TokenStore::in_dir(dir.path())).expect("session")
    }

    #[test]
    fn starts_signed_out_without_token_file() {
        let dir = TempDir::new().unwrap();
        let session = offline_session(&dir);
        assert!(!session.is_signed_in());
        assert_eq!(session.api_base(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn restores_token_saved_for_same_server() {
        let dir = TempDir::new().unwrap();
        TokenStore::in_dir(dir.path())
            .save(&AuthToken::new("tok"), "http://127.0.0.1:9/api")
            .unwrap();

        let session = offline_session(&dir);
        assert!(session.is_signed_in());
        assert!(session.signed_in_since().is_some());
    }

    #[test]
    fn ignores_token_from_another_server() {
        let dir = TempDir::new().unwrap();
        TokenStore::in_dir(dir.path())
            .save(&AuthToken::new("tok"), "https://elsewhere.example/api")
            .unwrap();

        assert!(!offline_session(&dir).is_signed_in());
    }

    #[test]
    fn protected_call_while_signed_out_leaves_dashboard_untouched() {
        let dir = TempDir::new().unwrap();
        let mut session = offline_session(&dir);

        let err = session.refresh().unwrap_err();
        assert!(err.is_auth_failure());
        assert!(!session.dashboard().is_loaded());
    }

    #[test]
    fn preferences_need_a_config_file() {
        let dir = TempDir::new().unwrap();
        let mut session = offline_session(&dir);
        assert!(session.set_preference("chart_width", "50").is_err());
    }

    #[test]
    fn preference_change_is_saved_and_applied() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(dir.path()).unwrap();

        assert!(session.set_preference("currency_symbol", "€").unwrap());
        assert_eq!(session.config().currency_symbol, "€");

        assert!(!session.set_preference("api_base", "https://budget.example/api").unwrap());
        let stored = ConfigManager::with_base_dir(dir.path()).unwrap().load().unwrap();
        assert_eq!(stored.currency_symbol, "€");
        assert_eq!(stored.api_base, "https://budget.example/api");
        assert_ne!(session.api_base(), "https://budget.example/api");
    }

    #[test]
    fn logout_removes_token_file() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::in_dir(dir.path());
        store
            .save(&AuthToken::new("tok"), "http://127.0.0.1:9/api")
            .unwrap();

        let mut session = offline_session(&dir);
        session.logout().unwrap();

        assert!(!session.is_signed_in());
        assert!(!store.path().exists());
    }
}
