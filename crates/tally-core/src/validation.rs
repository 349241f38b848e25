//! Input checks applied before anything reaches the service or the view state.

use once_cell::sync::Lazy;
use regex::Regex;
use tally_domain::{Credentials, NewExpense, PasswordChange, PhotoUpload, ProfileUpdate, Registration};

use crate::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid")
});

/// Accepted amounts are finite and strictly positive.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidAmount(trimmed.to_string())),
    }
}

/// Accepted budgets are finite and zero or more.
pub fn parse_budget(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidBudget(trimmed.to_string())),
    }
}

pub fn validate_new_expense(
    name: &str,
    amount: &str,
    category: &str,
) -> Result<NewExpense, ValidationError> {
    let name = required("Name", name)?;
    let amount = parse_amount(amount)?;
    let category = required("Category", category)?;
    Ok(NewExpense::new(name, amount, category))
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    required("Username", &credentials.username)?;
    if credentials.password.is_empty() {
        return Err(ValidationError::EmptyField("Password"));
    }
    Ok(())
}

pub fn validate_registration(
    registration: &Registration,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    required("Username", &registration.username)?;
    if registration.password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    validate_email(&registration.email)?;
    required("Full name", &registration.full_name)?;
    required("Village", &registration.village)?;
    Ok(())
}

pub fn validate_password_change(change: &PasswordChange) -> Result<(), ValidationError> {
    if change.current_password.is_empty() {
        return Err(ValidationError::EmptyField("Current password"));
    }
    if change.new_password.is_empty() {
        return Err(ValidationError::EmptyField("New password"));
    }
    if change.confirmation_password.is_empty() {
        return Err(ValidationError::EmptyField("Password confirmation"));
    }
    if change.new_password != change.confirmation_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), ValidationError> {
    required("Full name", &update.full_name)?;
    validate_email(&update.email)?;
    required("Village", &update.village)?;
    Ok(())
}

pub fn validate_photo(upload: &PhotoUpload) -> Result<(), ValidationError> {
    if !upload.content_type.starts_with("image/") {
        return Err(ValidationError::InvalidPhoto(format!(
            "`{}` is not an image (JPEG, PNG, GIF)",
            upload.file_name
        )));
    }
    if upload.bytes.is_empty() {
        return Err(ValidationError::InvalidPhoto(format!(
            "`{}` is empty",
            upload.file_name
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = required("Email", email)?;
    if EMAIL_SHAPE.is_match(&trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(trimmed))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
