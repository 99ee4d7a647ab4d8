//! Authentication primitives such as login credentials.
//!
//! Plaintext passwords exist only inside [`LoginCredentials`] and the
//! credential port; they are zeroised on drop and never persisted or
//! logged.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Login name was missing or blank once trimmed.
    EmptyLoginName,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLoginName => write!(f, "login name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials consumed by [`AccessService::authenticate`].
///
/// ## Invariants
/// - `login_name` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but keeps caller-provided
///   whitespace so credential comparison is never surprising.
///
/// [`AccessService::authenticate`]: super::AccessService::authenticate
///
/// # Examples
/// ```
/// use engine::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("lorena", "s3cret").unwrap();
/// assert_eq!(creds.login_name(), "lorena");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login_name: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw login-name/password inputs.
    pub fn try_from_parts(
        login_name: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let normalized = login_name.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyLoginName);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            login_name: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name suitable for account lookups.
    pub fn login_name(&self) -> &str {
        self.login_name.as_str()
    }

    /// Password exactly as the caller supplied it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
