//! Field-level form validation.
//!
//! Validators return a [`FormErrors`] map from field to a single
//! human-readable message. A field without an entry is valid, and a form is
//! valid iff the map is empty. The same rules back the login, signup, and
//! ticket forms regardless of which inbound adapter collects the input.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::ticket::{TicketPriority, TicketStatus};

/// Minimum trimmed length of a signup name, in characters.
pub const NAME_MIN_LENGTH: usize = 2;
/// Minimum password length at signup, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Status,
    Priority,
}

impl FormField {
    /// Field name as the forms spell it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by field.
///
/// # Examples
/// ```
/// use ticketapp::domain::{FormField, validate_login_form};
///
/// let errors = validate_login_form("", "secret");
/// assert!(!errors.is_valid());
/// assert_eq!(errors.get(FormField::Email), Some("Email is required"));
/// assert_eq!(errors.get(FormField::Password), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    /// An empty, valid error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    ///
    /// Rules are checked in order of precedence, so the first failing rule
    /// for a field is the one reported.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// `true` when no field carries a message.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// JSON object keyed by field name, for structured adapters.
    pub fn to_details(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// `Ok(value)` when the form is valid, otherwise these errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_valid() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^\S+@\S+\.\S+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// `true` when `email` has the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate the login form.
///
/// Only presence is checked; the credential directory decides whether the
/// pair is known.
pub fn validate_login_form(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    if email.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required");
    }
    if password.is_empty() {
        errors.insert(FormField::Password, "Password is required");
    }
    errors
}

/// Validate the signup form.
///
/// # Examples
/// ```
/// use ticketapp::domain::{FormField, validate_signup_form};
///
/// let errors = validate_signup_form("Ada", "ada@example.com", "abc12", "abc12");
/// assert_eq!(
///     errors.get(FormField::Password),
///     Some("Password must be at least 6 characters"),
/// );
/// assert!(validate_signup_form("Ada", "ada@example.com", "abc123", "abc123").is_valid());
/// ```
pub fn validate_signup_form(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FormErrors {
    let mut errors = FormErrors::new();

    let trimmed_name = name.trim();
    if trimmed_name.is_empty() {
        errors.insert(FormField::Name, "Name is required");
    } else if trimmed_name.chars().count() < NAME_MIN_LENGTH {
        errors.insert(FormField::Name, "Name must be at least 2 characters");
    }

    let trimmed_email = email.trim();
    if trimmed_email.is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(trimmed_email) {
        errors.insert(FormField::Email, "Email is invalid");
    }

    if password.trim().is_empty() {
        errors.insert(FormField::Password, "Password is required");
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.insert(FormField::Password, "Password must be at least 6 characters");
    }

    if confirm_password.trim().is_empty() {
        errors.insert(FormField::ConfirmPassword, "Please confirm your password");
    } else if password != confirm_password {
        errors.insert(FormField::ConfirmPassword, "Passwords do not match");
    }

    errors
}

/// Validate the ticket form's title and status.
pub fn validate_ticket_form(title: &str, status: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    if title.trim().is_empty() {
        errors.insert(FormField::Title, "Title is required");
    }
    if status.parse::<TicketStatus>().is_err() {
        errors.insert(
            FormField::Status,
            "Status must be one of open, in_progress, closed",
        );
    }
    errors
}

/// Validate the ticket form's priority.
pub(crate) fn validate_ticket_priority(priority: &str, errors: &mut FormErrors) {
    if priority.parse::<TicketPriority>().is_err() {
        errors.insert(
            FormField::Priority,
            "Priority must be one of low, medium, high",
        );
    }
}
