//! Demo login accounts for the ticket tracker.
//!
//! The tracker has no real credential backend. Instead it authenticates
//! against a small table of demo accounts, each pairing an email and password
//! with the user record a successful login produces. This crate owns that
//! table so it can be swapped without touching the tracker's call sites.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - The two built-in accounts shipped with the demo
//! - Loading a replacement table from a versioned JSON registry file
//! - Email and password validation matching the tracker's signup rules
//!
//! # Example
//!
//! ```
//! use demo_accounts::AccountRegistry;
//!
//! let json = r#"{
//!     "version": 1,
//!     "accounts": [
//!         {"id": "7", "email": "ops@ticketapp.com", "password": "hunter22", "name": "Ops"}
//!     ]
//! }"#;
//!
//! let registry = AccountRegistry::from_json(json).expect("valid registry");
//! let account = registry
//!     .find_by_credentials("ops@ticketapp.com", "hunter22")
//!     .expect("account matches");
//!
//! assert_eq!(account.name(), "Ops");
//! ```

mod error;
mod registry;
mod validation;

pub use error::RegistryError;
pub use registry::{AccountRegistry, DemoAccount};
pub use validation::{PASSWORD_MIN_LENGTH, is_valid_email};
