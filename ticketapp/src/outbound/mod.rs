//! Outbound adapters implementing domain ports for local infrastructure.
//!
//! - **storage**: key-value stores backed by a data directory or memory
//! - **credentials**: the demo account registry
//! - **sleeper**: tokio-backed delays
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod credentials;
pub mod sleeper;
pub mod storage;
