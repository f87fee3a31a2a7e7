//! Registration and login form validation.
//!
//! One password policy applies everywhere: at least
//! [`MIN_PASSWORD_LEN`] characters with both an uppercase and a lowercase
//! letter.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Body of `POST /auth/register`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Check a password against the policy
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if !password.chars().any(char::is_uppercase) || !password.chars().any(char::is_lowercase) {
        return Err(Error::Validation(
            "password must contain both uppercase and lowercase letters".into(),
        ));
    }
    Ok(())
}

/// Minimal shape check: `local@domain.tld`
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || Error::Validation(format!("'{}' is not a valid email address", email));

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !tld.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

impl RegisterRequest {
    /// Validate a registration form, including the password confirmation
    pub fn validated(name: &str, email: &str, password: &str, confirm: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
        validate_email(email)?;
        if password != confirm {
            return Err(Error::Validation(
                "password and confirmation do not match".into(),
            ));
        }
        validate_password(password)?;

        Ok(Self {
            name: name.to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }
}

impl LoginRequest {
    pub fn validated(email: &str, password: &str) -> Result<Self> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "email and password are required".into(),
            ));
        }
        Ok(Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }
}
