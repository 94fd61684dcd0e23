//! Behavioural tests for ticket create, update and delete.
//!
//! Each scenario runs against a fresh file-backed store in a temporary data
//! directory, so the assertions cover what actually lands on disk.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use ticketapp::domain::ports::{KeyValueStore, StorageKey};
use ticketapp::domain::{
    Error, ErrorCode, TicketForm, TicketId, TicketService, TicketStats,
};
use ticketapp::outbound::storage::FileKeyValueStore;
use ticketapp::test_support::{MutableClock, TempDataDir};

struct Harness {
    _data_dir: TempDataDir,
    store: Arc<FileKeyValueStore>,
    clock: Arc<MutableClock>,
    service: TicketService<FileKeyValueStore>,
}

impl Harness {
    fn new() -> Self {
        let data_dir = TempDataDir::new();
        let store = Arc::new(FileKeyValueStore::open(data_dir.path()).expect("open store"));
        let clock = Arc::new(MutableClock::at_fixed_instant());
        let service = TicketService::new(store.clone(), clock.clone());
        Self {
            _data_dir: data_dir,
            store,
            clock,
            service,
        }
    }

    fn raw_tickets(&self) -> Option<String> {
        self.store.get(&StorageKey::TICKETS).expect("read tickets")
    }
}

/// Test world holding the store and the last operation's results.
#[derive(Default, ScenarioState)]
struct World {
    harness: Slot<Arc<Harness>>,
    newest: Slot<TicketId>,
    raw_before: Slot<Option<String>>,
    edit_result: Slot<Result<(), Error>>,
    removals: Slot<Vec<bool>>,
    stats: Slot<TicketStats>,
}

impl World {
    fn harness(&self) -> Arc<Harness> {
        self.harness.get().expect("store should be set")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("an empty ticket store")]
fn an_empty_ticket_store(world: &World) {
    world.harness.set(Arc::new(Harness::new()));
}

fn create_ticket(world: &World, title: String, status: String) {
    let harness = world.harness();
    let draft = TicketForm {
        title,
        status,
        ..TicketForm::default()
    }
    .validate()
    .expect("valid ticket form");
    let created = harness.service.create(draft).expect("create succeeds");
    harness.clock.advance_seconds(1);
    world.newest.set(created.ticket.id);
}

#[given("a ticket titled {title} exists with status {status}")]
fn a_ticket_exists(world: &World, title: String, status: String) {
    create_ticket(world, title, status);
}

#[when("a ticket titled {title} is filed with status {status}")]
fn a_ticket_is_filed(world: &World, title: String, status: String) {
    create_ticket(world, title, status);
}

#[when("a ticket that does not exist is edited")]
fn a_missing_ticket_is_edited(world: &World) {
    let harness = world.harness();
    world.raw_before.set(harness.raw_tickets());
    let draft = TicketForm {
        title: "Ghost".to_owned(),
        ..TicketForm::default()
    }
    .validate()
    .expect("valid ticket form");
    let result = harness.service.update(&TicketId::random(), draft).map(|_| ());
    world.edit_result.set(result);
}

#[when("the newest ticket is deleted twice")]
fn the_newest_ticket_is_deleted_twice(world: &World) {
    let harness = world.harness();
    let id = world.newest.get().expect("a ticket should exist");
    let removals = (0..2)
        .map(|_| harness.service.delete(&id).expect("delete succeeds").removed)
        .collect();
    world.removals.set(removals);
}

#[when("the stats are read")]
fn the_stats_are_read(world: &World) {
    let stats = world.harness().service.stats().expect("stats");
    world.stats.set(stats);
}

#[then("the store holds {count:usize} ticket")]
fn the_store_holds_tickets(world: &World, count: usize) {
    let board = world.harness().service.load().expect("load");
    assert_eq!(board.tickets.len(), count);
    assert_eq!(board.stats.total, count);
}

#[then("the newest ticket was never edited")]
fn the_newest_ticket_was_never_edited(world: &World) {
    let id = world.newest.get().expect("a ticket should exist");
    let ticket = world
        .harness()
        .service
        .find(&id)
        .expect("find")
        .expect("ticket stored");
    assert_eq!(ticket.created_at, ticket.updated_at);
}

#[then("the edit fails because the ticket was not found")]
fn the_edit_fails_with_not_found(world: &World) {
    let result = world.edit_result.get().expect("edit should have run");
    let error = result.expect_err("edit should fail");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[then("the stored tickets are unchanged")]
fn the_stored_tickets_are_unchanged(world: &World) {
    let before = world.raw_before.get().expect("snapshot should be taken");
    assert_eq!(world.harness().raw_tickets(), before);
}

#[then("only the first delete removed anything")]
fn only_the_first_delete_removed_anything(world: &World) {
    let removals = world.removals.get().expect("deletes should have run");
    assert_eq!(removals, vec![true, false]);
}

#[then("the stats show {total:usize} total with {open:usize} open, {in_progress:usize} in progress and {closed:usize} closed")]
fn the_stats_show(world: &World, total: usize, open: usize, in_progress: usize, closed: usize) {
    let stats = world.stats.get().expect("stats should be read");
    assert_eq!(
        stats,
        TicketStats {
            total,
            open,
            in_progress,
            closed,
        }
    );
    assert_eq!(stats.total, stats.open + stats.in_progress + stats.closed);
}

#[scenario(
    path = "tests/features/ticket_lifecycle.feature",
    name = "Creating a ticket adds exactly one entry"
)]
fn creating_a_ticket_adds_one_entry(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/ticket_lifecycle.feature",
    name = "Editing a missing ticket leaves the store unchanged"
)]
fn editing_a_missing_ticket_leaves_store_unchanged(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/ticket_lifecycle.feature",
    name = "Deleting twice is harmless"
)]
fn deleting_twice_is_harmless(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/ticket_lifecycle.feature",
    name = "Stats count every status"
)]
fn stats_count_every_status(world: World) {
    let _ = world;
}
