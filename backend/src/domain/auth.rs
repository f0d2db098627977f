//! Authentication inputs: login credentials and registration requests.
//!
//! Constructors validate raw form values before a handler talks to a port,
//! so services only ever see well-formed input.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Minimum raw password length in characters.
pub const PASSWORD_MIN: usize = 10;
/// Maximum raw password length in characters.
pub const PASSWORD_MAX: usize = 1500;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login attempt.";

/// Login form values that cannot possibly match an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    EmptyUsername,
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials presented at login.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Reasons a registration form is rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    Username(UserValidationError),
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "The password must be of minimum length {min} characters.")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "The password must be at most {max} characters.")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Username(value)
    }
}

/// Validated request to create an account.
///
/// # Examples
/// ```
/// use snippets::domain::Registration;
///
/// let reg = Registration::try_from_parts(" ada ", "correct horse").unwrap();
/// assert_eq!(reg.username().as_ref(), "ada");
/// assert!(Registration::try_from_parts("ada", "short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(RegistrationValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
