//! Authentication primitives: login credentials and signup requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before an adapter talks to a service.

use zeroize::Zeroizing;

use super::form::{FormErrors, validate_login_form, validate_signup_form};

/// Validated login credentials used by the session service.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use ticketapp::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@ticketapp.com ", "password123").unwrap();
/// assert_eq!(creds.email(), "admin@ticketapp.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FormErrors> {
        validate_login_form(email, password).into_result(Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string used for the directory lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw signup form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
}

impl SignupForm {
    /// Validate every field and convert into a [`SignupRequest`].
    ///
    /// # Examples
    /// ```
    /// use ticketapp::domain::{FormField, SignupForm};
    ///
    /// let form = SignupForm {
    ///     name: "Ada".to_owned(),
    ///     email: "ada@example.com".to_owned(),
    ///     password: "abc123".to_owned().into(),
    ///     confirm_password: "abc124".to_owned().into(),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords do not match"));
    /// ```
    pub fn validate(&self) -> Result<SignupRequest, FormErrors> {
        validate_signup_form(
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
        )
        .into_result(SignupRequest::new(
            self.name.trim(),
            self.email.trim(),
            self.password.as_str(),
        ))
    }
}

/// Signup data accepted by the session service.
///
/// Only the password length is re-checked by the service; other fields are
/// taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Build a request from its parts.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: &str) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Requested display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested login email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
