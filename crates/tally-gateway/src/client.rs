//! Budget service client.
//!
//! Blocking reqwest client; one request per gateway call, no retries.

use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tally_config::Config;
use tally_core::{BudgetGateway, GatewayError};
use tally_domain::{
    AuthToken, Budget, Credentials, Expense, ExpenseId, NewExpense, PasswordChange, PhotoUpload,
    PhotoUploaded, ProfileUpdate, Registration, UserProfile,
};
use tracing::{debug, warn};

use crate::wire::{self, TokenResponse};

pub const USER_AGENT: &str = concat!("tally/", env!("CARGO_PKG_VERSION"));

const PASSWORD_CHANGED: &str = "Password changed.";

/// [`BudgetGateway`] over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    api_base: String,
    token: Option<AuthToken>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("api_base", &self.api_base)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpGateway {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let api_base = api_base.into().trim().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            api_base,
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(
            config.api_base_trimmed(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// API base joined with `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.api_base).map_err(|e| {
            GatewayError::Network(format!("invalid api base `{}`: {e}", self.api_base))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                GatewayError::Network(format!("api base `{}` cannot take a path", self.api_base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds the request, attaching the bearer token when `protected`.
    /// Fails with `MissingToken` without touching the network.
    fn request(
        &self,
        method: Method,
        url: Url,
        protected: bool,
    ) -> Result<RequestBuilder, GatewayError> {
        let builder = self.http.request(method, url);
        if !protected {
            return Ok(builder);
        }
        match &self.token {
            Some(token) => Ok(builder.bearer_auth(token.as_str())),
            None => Err(GatewayError::MissingToken),
        }
    }

    fn send(
        &self,
        method: Method,
        segments: &[&str],
        protected: bool,
        attach: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let builder = self.request(method.clone(), url, protected).map_err(|err| {
            warn!(%method, path = %path, "no session token for protected request");
            err
        })?;

        debug!(%method, path = %path, "sending request");
        let response = attach(builder).send().map_err(|err| {
            warn!(%method, path = %path, error = %err, "request failed");
            GatewayError::Network(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%method, path = %path, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().unwrap_or_default();
        warn!(%method, path = %path, status = code, "request rejected");
        if code == 401 || code == 403 {
            return Err(GatewayError::Unauthorized(code));
        }
        Err(GatewayError::Http(code, wire::error_message(code, &body)))
    }

    fn parse<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }

    fn token_from(response: Response) -> Result<AuthToken, GatewayError> {
        let body: TokenResponse = Self::parse(response)?;
        if body.token.trim().is_empty() {
            return Err(GatewayError::Parse("server returned an empty token".into()));
        }
        Ok(AuthToken::new(body.token))
    }
}

impl BudgetGateway for HttpGateway {
    fn set_token(&mut self, token: Option<AuthToken>) {
        self.token = token;
    }

    fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn login(&self, credentials: &Credentials) -> Result<AuthToken, GatewayError> {
        let response =
            self.send(Method::POST, &["auth", "login"], false, |b| b.json(credentials))?;
        Self::token_from(response)
    }

    fn register(&self, registration: &Registration) -> Result<AuthToken, GatewayError> {
        let response =
            self.send(Method::POST, &["auth", "register"], false, |b| b.json(registration))?;
        Self::token_from(response)
    }

    fn change_password(&self, change: &PasswordChange) -> Result<String, GatewayError> {
        let response =
            self.send(Method::POST, &["auth", "change-password"], true, |b| b.json(change))?;
        let body = response
            .text()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(wire::success_message(&body, PASSWORD_CHANGED))
    }

    fn fetch_budget(&self) -> Result<Budget, GatewayError> {
        let response = self.send(Method::GET, &["data", "budget"], true, |b| b)?;
        Self::parse(response)
    }

    fn save_budget(&self, budget: Budget) -> Result<Budget, GatewayError> {
        let response =
            self.send(Method::POST, &["data", "budget"], true, |b| b.json(&budget))?;
        Self::parse(response)
    }

    fn list_expenses(&self) -> Result<Vec<Expense>, GatewayError> {
        let response = self.send(Method::GET, &["data", "expenses"], true, |b| b)?;
        Self::parse(response)
    }

    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, GatewayError> {
        let response =
            self.send(Method::POST, &["data", "expenses"], true, |b| b.json(expense))?;
        Self::parse(response)
    }

    fn delete_expense(&self, id: &ExpenseId) -> Result<(), GatewayError> {
        let segments = ["data", "expenses", id.as_str()];
        self.send(Method::DELETE, &segments, true, |b| b)?;
        Ok(())
    }

    fn fetch_profile(&self) -> Result<UserProfile, GatewayError> {
        let response = self.send(Method::GET, &["profile"], true, |b| b)?;
        Self::parse(response)
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, GatewayError> {
        let response = self.send(Method::PUT, &["profile"], true, |b| b.json(update))?;
        Self::parse(response)
    }

    fn upload_photo(&self, upload: &PhotoUpload) -> Result<PhotoUploaded, GatewayError> {
        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| GatewayError::Parse(format!("invalid content type: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let response =
            self.send(Method::POST, &["profile", "photo"], true, |b| b.multipart(form))?;
        Self::parse(response)
    }
}
