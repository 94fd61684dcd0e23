//! Command-line inbound adapter.
//!
//! [`TicketApp`] runs one parsed [`Command`] against the session and ticket
//! services and writes the result to any [`Write`] sink, so commands can be
//! exercised in tests without spawning a process.

mod args;
mod error;
mod render;

use std::io::Write;

use crate::domain::ports::{CredentialDirectory, KeyValueStore};
use crate::domain::{
    Error, LoginCredentials, SessionService, SignupForm, TicketForm, TicketService,
};

pub use args::{Cli, Command, LoginArgs, SignupArgs, TicketCommand, TicketFields, TicketPatch};
pub use error::CliError;

/// Session and ticket services wired for the CLI.
pub struct TicketApp<S, C> {
    session: SessionService<S, C>,
    tickets: TicketService<S>,
}

impl<S, C> TicketApp<S, C>
where
    S: KeyValueStore,
    C: CredentialDirectory,
{
    /// Wrap the two services.
    pub fn new(session: SessionService<S, C>, tickets: TicketService<S>) -> Self {
        Self { session, tickets }
    }

    /// Run `command`, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Form`] for invalid input, [`CliError::Domain`]
    /// when a service rejects the command, and [`CliError::Output`] when
    /// `out` cannot be written.
    pub async fn run(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::Login(args) => self.login(args, out).await,
            Command::Signup(args) => self.signup(args, out).await,
            Command::Logout => {
                self.session.logout()?;
                writeln!(out, "Logged out")?;
                Ok(())
            }
            Command::Whoami => {
                match self.session.load()? {
                    Some(user) => render::user(out, &user)?,
                    None => writeln!(out, "Not logged in")?,
                }
                Ok(())
            }
            Command::Tickets(command) => {
                self.session.require_user()?;
                self.run_tickets(command, out)
            }
        }
    }

    async fn login(&self, args: LoginArgs, out: &mut impl Write) -> Result<(), CliError> {
        let credentials = LoginCredentials::try_from_parts(&args.email, &args.password)?;
        let user = self.session.login(&credentials).await?;
        write!(out, "Logged in as ")?;
        render::user(out, &user)?;
        Ok(())
    }

    async fn signup(&self, args: SignupArgs, out: &mut impl Write) -> Result<(), CliError> {
        let form = SignupForm {
            name: args.name,
            email: args.email,
            password: args.password.into(),
            confirm_password: args.confirm_password.into(),
        };
        let request = form.validate()?;
        let user = self.session.signup(&request).await?;
        write!(out, "Account created for ")?;
        render::user(out, &user)?;
        Ok(())
    }

    fn run_tickets(&self, command: TicketCommand, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            TicketCommand::List { status } => {
                let board = self.tickets.load()?;
                render::ticket_list(out, render::filter(&board.tickets, status), &board.stats)?;
            }
            TicketCommand::Stats => {
                let stats = self.tickets.stats()?;
                render::stats(out, &stats)?;
            }
            TicketCommand::Show { id } => {
                let ticket = self
                    .tickets
                    .find(&id)?
                    .ok_or_else(|| Error::not_found("Ticket not found"))?;
                render::ticket_detail(out, &ticket)?;
            }
            TicketCommand::Create(fields) => {
                let form = TicketForm {
                    title: fields.title,
                    description: fields.description,
                    status: fields.status,
                    priority: fields.priority,
                };
                let created = self.tickets.create(form.validate()?)?;
                writeln!(out, "Created ticket {}", created.ticket.id)?;
                render::stats(out, &created.board.stats)?;
            }
            TicketCommand::Update { id, fields } => {
                let existing = self
                    .tickets
                    .find(&id)?
                    .ok_or_else(|| Error::not_found("Ticket not found"))?;
                let form = apply_patch(TicketForm::from_ticket(&existing), fields);
                let updated = self.tickets.update(&id, form.validate()?)?;
                writeln!(out, "Updated ticket {}", updated.ticket.id)?;
                render::stats(out, &updated.board.stats)?;
            }
            TicketCommand::Delete { id } => {
                let deleted = self.tickets.delete(&id)?;
                if deleted.removed {
                    writeln!(out, "Deleted ticket {id}")?;
                } else {
                    writeln!(out, "Ticket {id} was already gone")?;
                }
                render::stats(out, &deleted.board.stats)?;
            }
        }
        Ok(())
    }
}

fn apply_patch(mut form: TicketForm, patch: TicketPatch) -> TicketForm {
    let TicketPatch {
        title,
        description,
        status,
        priority,
    } = patch;
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(status) = status {
        form.status = status;
    }
    if let Some(priority) = priority {
        form.priority = priority;
    }
    form
}
