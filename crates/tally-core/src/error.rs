use thiserror::Error;

/// Malformed user input, rejected before it reaches aggregation or view state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    EmptyField(&'static str),
    #[error("Amount must be a positive number, got `{0}`")]
    InvalidAmount(String),
    #[error("Budget must be a number of zero or more, got `{0}`")]
    InvalidBudget(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
    #[error("Invalid photo: {0}")]
    InvalidPhoto(String),
}

/// Failure talking to the budget service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Not signed in. Use `login` first.")]
    MissingToken,
    #[error("Session rejected by the server (HTTP {0}). Please sign in again.")]
    Unauthorized(u16),
    #[error("HTTP {0}: {1}")]
    Http(u16, String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl GatewayError {
    /// True when the held session is no longer usable and must be dropped.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_) | GatewayError::MissingToken)
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Token storage failed: {0}")]
    TokenStore(String),
}

impl CoreError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CoreError::Gateway(err) if err.is_auth_failure())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
