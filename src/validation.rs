use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@[a-zA-Z_-]+?(?:\.[a-zA-Z]{2,6})+$").unwrap()
});

/// Fails with `FieldNotValid("name")` for empty or whitespace-only names.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::FieldNotValid("name".to_string()));
    }
    Ok(())
}

/// The whole string must match `local-part@domain`; partial matches fail.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::EmailNotValid)
    }
}

pub fn validate_project_name(name: Option<&str>) -> Result<(), AppError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(AppError::ProjectNameNotValid),
    }
}
