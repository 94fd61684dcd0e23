//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{TicketId, TicketStatus};

/// `ticketapp` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ticketapp",
    about = "Track tickets against a local data directory with demo logins",
    version
)]
pub struct Cli {
    /// Data directory overriding `TICKETAPP_DATA_DIR`.
    #[arg(long = "data-dir", value_name = "path", global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in with a demo account.
    Login(LoginArgs),
    /// Create an account and log in as it.
    Signup(SignupArgs),
    /// End the current session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Manage tickets. Requires a session.
    #[command(subcommand)]
    Tickets(TicketCommand),
}

/// Arguments for `login`.
#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

/// Arguments for `signup`.
#[derive(Debug, Clone, Args)]
pub struct SignupArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long = "confirm-password", default_value = "")]
    pub confirm_password: String,
}

/// Ticket subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum TicketCommand {
    /// List tickets with their stats.
    List {
        /// Only show tickets with this status.
        #[arg(long)]
        status: Option<TicketStatus>,
    },
    /// Show ticket counts per status.
    Stats,
    /// Show one ticket.
    Show { id: TicketId },
    /// Create a ticket.
    Create(TicketFields),
    /// Edit a ticket. Omitted fields keep their current values.
    Update {
        id: TicketId,
        #[command(flatten)]
        fields: TicketPatch,
    },
    /// Delete a ticket. Deleting a missing ticket succeeds.
    Delete { id: TicketId },
}

/// Fields for a new ticket.
#[derive(Debug, Clone, Args)]
pub struct TicketFields {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "open")]
    pub status: String,
    #[arg(long, default_value = "medium")]
    pub priority: String,
}

/// Optional field overrides for an existing ticket.
#[derive(Debug, Clone, Default, Args)]
pub struct TicketPatch {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
}
