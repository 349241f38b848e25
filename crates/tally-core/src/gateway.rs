//! The seam to the remote budget service and to wherever the session token lives.

use tally_domain::{
    AuthToken, Budget, Credentials, Expense, ExpenseId, NewExpense, PasswordChange, PhotoUpload,
    PhotoUploaded, ProfileUpdate, Registration, UserProfile,
};

use crate::error::{CoreResult, GatewayError};

/// One request/response exchange per method. Implementations attach the held
/// bearer token to every call except `login` and `register`.
pub trait BudgetGateway {
    fn set_token(&mut self, token: Option<AuthToken>);
    fn has_token(&self) -> bool;

    fn login(&self, credentials: &Credentials) -> Result<AuthToken, GatewayError>;
    fn register(&self, registration: &Registration) -> Result<AuthToken, GatewayError>;
    fn change_password(&self, change: &PasswordChange) -> Result<String, GatewayError>;

    fn fetch_budget(&self) -> Result<Budget, GatewayError>;
    fn save_budget(&self, budget: Budget) -> Result<Budget, GatewayError>;

    fn list_expenses(&self) -> Result<Vec<Expense>, GatewayError>;
    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, GatewayError>;
    fn delete_expense(&self, id: &ExpenseId) -> Result<(), GatewayError>;

    fn fetch_profile(&self) -> Result<UserProfile, GatewayError>;
    fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, GatewayError>;
    fn upload_photo(&self, upload: &PhotoUpload) -> Result<PhotoUploaded, GatewayError>;
}

/// Where an acquired token is persisted between runs.
pub trait TokenSink {
    fn store(&mut self, token: &AuthToken) -> CoreResult<()>;
    fn clear(&mut self) -> CoreResult<()>;
}
