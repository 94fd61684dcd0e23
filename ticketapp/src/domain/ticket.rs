//! Ticket data model.
//!
//! Tickets are persisted as one JSON array under a single store key. The
//! collection keeps insertion order and `id` uniqueness is its only
//! structural invariant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::{FormErrors, validate_ticket_form, validate_ticket_priority};

/// Stable ticket identifier.
///
/// New tickets get a random UUID v4 rendered as a string. Any non-empty id
/// without surrounding whitespace is accepted, so records whose ids were
/// generated elsewhere still load.
///
/// # Examples
/// ```
/// use ticketapp::domain::TicketId;
///
/// assert!(TicketId::new("1").is_ok());
/// assert!(TicketId::new("").is_err());
/// assert_eq!(TicketId::random().as_str().len(), 36);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Generate a new random [`TicketId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate and construct a [`TicketId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ParseTicketIdError> {
        let id = id.into();
        if id.is_empty() || id.trim() != id {
            return Err(ParseTicketIdError { value: id });
        }
        Ok(Self(id))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Uuid> for TicketId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TicketId> for String {
    fn from(value: TicketId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = ParseTicketIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when a ticket id is empty or padded with whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTicketIdError {
    value: String,
}

impl fmt::Display for ParseTicketIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticket id must be non-empty without surrounding whitespace: {:?}",
            self.value
        )
    }
}

impl std::error::Error for ParseTicketIdError {}

impl FromStr for TicketId {
    type Err = ParseTicketIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value.trim())
    }
}

/// Workflow state of a ticket. Any status may change to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Serialized spelling of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

/// Error returned when parsing a ticket status from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTicketStatusError;

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseTicketStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid ticket status")
    }
}

impl std::error::Error for ParseTicketStatusError {}

impl FromStr for TicketStatus {
    type Err = ParseTicketStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTicketStatusError),
        }
    }
}

/// Relative urgency of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    /// Serialized spelling of the priority.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Error returned when parsing a ticket priority from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTicketPriorityError;

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseTicketPriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid ticket priority")
    }
}

impl std::error::Error for ParseTicketPriorityError {}

impl FromStr for TicketPriority {
    type Err = ParseTicketPriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTicketPriorityError),
        }
    }
}

/// Raw ticket form input as collected by an inbound adapter.
///
/// A fresh form defaults to status `open` and priority `medium`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TicketStatus::default().as_str().to_owned(),
            priority: TicketPriority::default().as_str().to_owned(),
        }
    }
}

impl TicketForm {
    /// Prefill a form from an existing ticket, as the edit flow does.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.as_str().to_owned(),
            priority: ticket.priority.as_str().to_owned(),
        }
    }

    /// Field-level validation messages for this form.
    pub fn errors(&self) -> FormErrors {
        let mut errors = validate_ticket_form(&self.title, &self.status);
        validate_ticket_priority(&self.priority, &mut errors);
        errors
    }

    /// Validate the form into a [`TicketDraft`].
    ///
    /// # Examples
    /// ```
    /// use ticketapp::domain::{TicketForm, TicketStatus};
    ///
    /// let form = TicketForm {
    ///     title: "  Printer jam  ".to_owned(),
    ///     status: "in_progress".to_owned(),
    ///     ..TicketForm::default()
    /// };
    /// let draft = form.validate().expect("valid form");
    /// assert_eq!(draft.title(), "Printer jam");
    /// assert_eq!(draft.status(), TicketStatus::InProgress);
    /// ```
    pub fn validate(&self) -> Result<TicketDraft, FormErrors> {
        let errors = self.errors();
        if !errors.is_valid() {
            return Err(errors);
        }
        match (self.status.parse(), self.priority.parse()) {
            (Ok(status), Ok(priority)) => Ok(TicketDraft {
                title: self.title.trim().to_owned(),
                description: self.description.clone(),
                status,
                priority,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated ticket fields ready for create or update.
///
/// ## Invariants
/// - `title` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    title: String,
    description: String,
    status: TicketStatus,
    priority: TicketPriority,
}

impl TicketDraft {
    /// Ticket title, trimmed.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-form description; may be empty.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Requested status.
    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// Requested priority.
    pub fn priority(&self) -> TicketPriority {
        self.priority
    }
}

/// A unit of trackable work.
///
/// ## Invariants
/// - `created_at` never changes after creation.
/// - `updated_at` is rewritten on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a new ticket with both timestamps set to `now`.
    pub fn create(id: TicketId, draft: TicketDraft, now: DateTime<Utc>) -> Self {
        let TicketDraft {
            title,
            description,
            status,
            priority,
        } = draft;
        Self {
            id,
            title,
            description,
            status,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields and refresh `updated_at`.
    pub fn apply(&mut self, draft: TicketDraft, now: DateTime<Utc>) {
        let TicketDraft {
            title,
            description,
            status,
            priority,
        } = draft;
        self.title = title;
        self.description = description;
        self.status = status;
        self.priority = priority;
        self.updated_at = now;
    }
}

/// Ticket counts by status, derived from a collection on every read.
///
/// ## Invariants
/// - `total == open + in_progress + closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl TicketStats {
    /// Count `tickets` by status in a single pass.
    ///
    /// # Examples
    /// ```
    /// use ticketapp::domain::TicketStats;
    ///
    /// let stats = TicketStats::from_tickets(&[]);
    /// assert_eq!(stats, TicketStats::default());
    /// ```
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets
            .iter()
            .fold(Self::default(), |mut stats, ticket| {
                stats.total += 1;
                match ticket.status {
                    TicketStatus::Open => stats.open += 1,
                    TicketStatus::InProgress => stats.in_progress += 1,
                    TicketStatus::Closed => stats.closed += 1,
                }
                stats
            })
    }

    /// Count for a single status.
    pub fn count(&self, status: TicketStatus) -> usize {
        match status {
            TicketStatus::Open => self.open,
            TicketStatus::InProgress => self.in_progress,
            TicketStatus::Closed => self.closed,
        }
    }
}

/// Tickets plus their derived stats, as returned for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketBoard {
    pub tickets: Vec<Ticket>,
    pub stats: TicketStats,
}

impl TicketBoard {
    /// Derive stats for `tickets` and wrap both.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Self {
        let stats = TicketStats::from_tickets(&tickets);
        Self { tickets, stats }
    }

    /// Ticket with `id`, if present.
    pub fn find(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == *id)
    }
}
