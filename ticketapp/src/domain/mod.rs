//! Domain primitives, validation, services and ports.
//!
//! Purpose: define the ticket tracker's entities and use cases without
//! reference to any adapter. Services talk to the outside world only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - FormErrors and the `validate_*` functions: field-level validation.
//! - User, Ticket, TicketStats, TicketBoard: the data model.
//! - SessionService, TicketService: the use cases.

pub mod auth;
pub mod error;
pub mod form;
pub mod ports;
pub mod session_service;
mod store_errors;
pub mod ticket;
pub mod ticket_service;
pub mod user;

pub use self::auth::{LoginCredentials, SignupForm, SignupRequest};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::form::{
    FormErrors, FormField, NAME_MIN_LENGTH, PASSWORD_MIN_LENGTH, is_valid_email,
    validate_login_form, validate_signup_form, validate_ticket_form,
};
pub use self::session_service::{
    DEFAULT_AUTH_DELAY, INVALID_CREDENTIALS_MESSAGE, SessionService,
};
pub use self::ticket::{
    ParseTicketIdError, ParseTicketPriorityError, ParseTicketStatusError, Ticket, TicketBoard,
    TicketDraft, TicketForm, TicketId, TicketPriority, TicketStats, TicketStatus,
};
pub use self::ticket_service::{TicketDeletion, TicketMutation, TicketService};
pub use self::user::{User, UserId, UserValidationError};
