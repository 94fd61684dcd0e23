//! Ticket service: CRUD over the ticket collection.
//!
//! Every operation reads the whole collection from [`StorageKey::TICKETS`],
//! mutates it in memory, writes it back, and returns a fresh
//! [`TicketBoard`] for rendering.

use std::sync::Arc;

use mockable::Clock;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey};
use crate::domain::store_errors::map_store_error;
use crate::domain::{Error, Ticket, TicketBoard, TicketDraft, TicketId, TicketStats};

/// Result of a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketMutation {
    /// The ticket as stored.
    pub ticket: Ticket,
    /// The collection after the write.
    pub board: TicketBoard,
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDeletion {
    /// `true` when a ticket with the id existed and was removed.
    pub removed: bool,
    /// The collection after the operation.
    pub board: TicketBoard,
}

/// Ticket service over a key-value store.
pub struct TicketService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> TicketService<S> {
    /// Create a new service with the given store and clock.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl<S> TicketService<S>
where
    S: KeyValueStore,
{
    fn read_tickets(&self) -> Result<Vec<Ticket>, Error> {
        let raw = match self.store.get(&StorageKey::TICKETS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(err @ KeyValueStoreError::Corrupt { .. }) => {
                warn!(key = %StorageKey::TICKETS, error = %err, "ignoring unreadable tickets");
                return Ok(Vec::new());
            }
            Err(err) => return Err(map_store_error(err)),
        };

        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %StorageKey::TICKETS, error = %err, "ignoring unreadable tickets");
                return Ok(Vec::new());
            }
        };

        // A record that fails to decode is skipped; the others still load.
        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Ticket>(entry) {
                Ok(ticket) => Some(ticket),
                Err(err) => {
                    warn!(
                        key = %StorageKey::TICKETS,
                        index,
                        error = %err,
                        "skipping unreadable ticket"
                    );
                    None
                }
            })
            .collect())
    }

    fn write_tickets(&self, tickets: &[Ticket]) -> Result<(), Error> {
        let encoded = serde_json::to_string(tickets)
            .map_err(|err| Error::internal(format!("failed to encode tickets: {err}")))?;
        self.store
            .set(&StorageKey::TICKETS, &encoded)
            .map_err(map_store_error)?;
        debug!(count = tickets.len(), "tickets written");
        Ok(())
    }

    fn not_found(id: &TicketId) -> Error {
        Error::not_found("Ticket not found").with_details(json!({ "ticketId": id.to_string() }))
    }

    /// Load the collection.
    ///
    /// Missing or unreadable data yields an empty board. Individual records
    /// that fail to decode are skipped and dropped by the next write.
    pub fn load(&self) -> Result<TicketBoard, Error> {
        self.read_tickets().map(TicketBoard::from_tickets)
    }

    /// Counts per status for the stored collection.
    pub fn stats(&self) -> Result<TicketStats, Error> {
        self.read_tickets()
            .map(|tickets| TicketStats::from_tickets(&tickets))
    }

    /// Look up a single ticket.
    pub fn find(&self, id: &TicketId) -> Result<Option<Ticket>, Error> {
        Ok(self
            .read_tickets()?
            .into_iter()
            .find(|ticket| ticket.id == *id))
    }

    /// Append a new ticket stamped with the current time.
    pub fn create(&self, draft: TicketDraft) -> Result<TicketMutation, Error> {
        let mut tickets = self.read_tickets()?;
        let ticket = Ticket::create(TicketId::random(), draft, self.clock.utc());
        tickets.push(ticket.clone());
        self.write_tickets(&tickets)?;
        info!(ticket_id = %ticket.id, status = %ticket.status, "ticket created");
        Ok(TicketMutation {
            ticket,
            board: TicketBoard::from_tickets(tickets),
        })
    }

    /// Replace the editable fields of ticket `id`.
    ///
    /// Fails with `not_found` and leaves the store untouched when no ticket
    /// has `id`.
    pub fn update(&self, id: &TicketId, draft: TicketDraft) -> Result<TicketMutation, Error> {
        let mut tickets = self.read_tickets()?;
        let Some(ticket) = tickets.iter_mut().find(|ticket| ticket.id == *id) else {
            return Err(Self::not_found(id));
        };
        ticket.apply(draft, self.clock.utc());
        let updated = ticket.clone();
        self.write_tickets(&tickets)?;
        info!(ticket_id = %id, status = %updated.status, "ticket updated");
        Ok(TicketMutation {
            ticket: updated,
            board: TicketBoard::from_tickets(tickets),
        })
    }

    /// Remove ticket `id` if present. Deleting an absent id writes nothing.
    pub fn delete(&self, id: &TicketId) -> Result<TicketDeletion, Error> {
        let mut tickets = self.read_tickets()?;
        let before = tickets.len();
        tickets.retain(|ticket| ticket.id != *id);
        let removed = tickets.len() != before;
        if removed {
            self.write_tickets(&tickets)?;
            info!(ticket_id = %id, "ticket deleted");
        } else {
            debug!(ticket_id = %id, "delete skipped; ticket absent");
        }
        Ok(TicketDeletion {
            removed,
            board: TicketBoard::from_tickets(tickets),
        })
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
