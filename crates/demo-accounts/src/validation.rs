//! Credential validation mirroring the tracker's signup rules.
//!
//! These checks match the signup form validation in the `ticketapp` crate so
//! a registry can never contain an account the signup form would reject.
//!
//! # Validation Rules
//!
//! - Email: no whitespace, a non-empty local part, `@`, then a domain with a
//!   dot that has at least one character on each side
//! - Password: at least [`PASSWORD_MIN_LENGTH`] characters

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Returns `true` when `email` has the basic `local@domain.tld` shape.
///
/// # Examples
///
/// ```
/// use demo_accounts::is_valid_email;
///
/// assert!(is_valid_email("admin@ticketapp.com"));
/// assert!(!is_valid_email("admin@ticketapp"));       // No dot in domain
/// assert!(!is_valid_email("@ticketapp.com"));        // Empty local part
/// assert!(!is_valid_email("ad min@ticketapp.com"));  // Whitespace
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    email.char_indices().any(|(index, c)| {
        c == '@' && index > 0 && email.get(index + 1..).is_some_and(has_inner_dot)
    })
}

/// Returns `true` when some `.` in `domain` has a character on both sides.
fn has_inner_dot(domain: &str) -> bool {
    let length = domain.len();
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < length)
}
