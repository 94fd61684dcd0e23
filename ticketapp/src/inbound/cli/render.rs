//! Plain-text rendering of users, tickets, and stats.

use std::io::{self, Write};

use crate::domain::{Ticket, TicketStats, TicketStatus, User};

pub(super) fn user(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(out, "{} <{}> (id {})", user.name(), user.email(), user.id())
}

pub(super) fn stats(out: &mut impl Write, stats: &TicketStats) -> io::Result<()> {
    writeln!(
        out,
        "total={} open={} in_progress={} closed={}",
        stats.total, stats.open, stats.in_progress, stats.closed
    )
}

pub(super) fn ticket_line(out: &mut impl Write, ticket: &Ticket) -> io::Result<()> {
    writeln!(
        out,
        "{}  {:<11} {:<6} {}",
        ticket.id,
        ticket.status.as_str(),
        ticket.priority.as_str(),
        ticket.title
    )
}

pub(super) fn ticket_list<'a>(
    out: &mut impl Write,
    tickets: impl IntoIterator<Item = &'a Ticket>,
    stats_for_all: &TicketStats,
) -> io::Result<()> {
    let mut shown = 0_usize;
    for ticket in tickets {
        ticket_line(out, ticket)?;
        shown += 1;
    }
    if shown == 0 {
        writeln!(out, "No tickets")?;
    }
    stats(out, stats_for_all)
}

pub(super) fn ticket_detail(out: &mut impl Write, ticket: &Ticket) -> io::Result<()> {
    writeln!(out, "id:          {}", ticket.id)?;
    writeln!(out, "title:       {}", ticket.title)?;
    writeln!(out, "status:      {}", ticket.status)?;
    writeln!(out, "priority:    {}", ticket.priority)?;
    writeln!(out, "created:     {}", ticket.created_at.to_rfc3339())?;
    writeln!(out, "updated:     {}", ticket.updated_at.to_rfc3339())?;
    if !ticket.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", ticket.description)?;
    }
    Ok(())
}

/// Tickets filtered to `status` when one is given.
pub(super) fn filter(
    tickets: &[Ticket],
    status: Option<TicketStatus>,
) -> impl Iterator<Item = &Ticket> {
    tickets
        .iter()
        .filter(move |ticket| status.is_none_or(|wanted| ticket.status == wanted))
}
