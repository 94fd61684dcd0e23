//! Ticket tracker core.
//!
//! A demo session store with mock login against a small account table, a
//! ticket store with derived stats, and field-level form validation, all
//! persisted through a string key-value store. The `ticketapp` binary drives
//! these through a command-line adapter.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod startup;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
