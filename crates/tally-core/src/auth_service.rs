use tally_domain::{AuthToken, Credentials, PasswordChange, Registration};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::gateway::{BudgetGateway, TokenSink};
use crate::validation;

/// Sign-in, sign-up and session teardown.
pub struct AuthService;

impl AuthService {
    pub fn login<G, S>(gateway: &mut G, sink: &mut S, credentials: &Credentials) -> CoreResult<()>
    where
        G: BudgetGateway,
        S: TokenSink,
    {
        validation::validate_credentials(credentials)?;
        let token = gateway.login(credentials)?;
        Self::adopt(gateway, sink, token)?;
        info!(username = %credentials.username, "signed in");
        Ok(())
    }

    pub fn register<G, S>(
        gateway: &mut G,
        sink: &mut S,
        registration: &Registration,
        confirm_password: &str,
    ) -> CoreResult<()>
    where
        G: BudgetGateway,
        S: TokenSink,
    {
        validation::validate_registration(registration, confirm_password)?;
        let token = gateway.register(registration)?;
        Self::adopt(gateway, sink, token)?;
        info!(username = %registration.username, "account created");
        Ok(())
    }

    /// Returns the service's confirmation message.
    pub fn change_password<G>(gateway: &G, change: &PasswordChange) -> CoreResult<String>
    where
        G: BudgetGateway,
    {
        validation::validate_password_change(change)?;
        let message = gateway.change_password(change)?;
        Ok(message)
    }

    pub fn logout<G, S>(gateway: &mut G, sink: &mut S) -> CoreResult<()>
    where
        G: BudgetGateway,
        S: TokenSink,
    {
        gateway.set_token(None);
        sink.clear()?;
        info!("signed out");
        Ok(())
    }

    /// Drops the session when `error` means the server no longer accepts it.
    /// Returns whether the session was dropped.
    pub fn handle_failure<G, S>(gateway: &mut G, sink: &mut S, error: &CoreError) -> bool
    where
        G: BudgetGateway,
        S: TokenSink,
    {
        if !error.is_auth_failure() {
            return false;
        }
        warn!("session rejected; clearing stored token");
        gateway.set_token(None);
        if let Err(err) = sink.clear() {
            warn!(error = %err, "failed to clear stored token");
        }
        true
    }

    fn adopt<G, S>(gateway: &mut G, sink: &mut S, token: AuthToken) -> CoreResult<()>
    where
        G: BudgetGateway,
        S: TokenSink,
    {
        sink.store(&token)?;
        gateway.set_token(Some(token));
        Ok(())
    }
}
