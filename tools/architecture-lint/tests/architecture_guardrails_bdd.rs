//! Behaviour tests for the architecture guardrails.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Mutex;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;


const CLI_IMPORTS_STORAGE: &str = "use ticketapp::outbound::storage::FileKeyValueStore; \
     fn run() { let _ = FileKeyValueStore::open; }";
const DOMAIN_IMPORTS_CLAP: &str = "use clap::ValueEnum; fn parse() {}";

#[derive(Debug, Default)]
struct LintWorld {
    sources: Vec<LintSource>,
    result: Option<Result<(), ArchitectureLintError>>,
}

#[fixture]
fn world() -> Mutex<LintWorld> {
    Mutex::new(LintWorld::default())
}

fn add_source(world: &Mutex<LintWorld>, file: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.push(LintSource {
        file: Utf8PathBuf::from(file),
        contents: contents.to_owned(),
    });
}

fn add_valid_modules(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/ticket.rs",
        "use uuid::Uuid; pub struct TicketId(Uuid); impl TicketId { pub fn random() -> Self { Self(Uuid::new_v4()) } }",
    );
    add_source(
        world,
        "inbound/cli/mod.rs",
        "use clap::Parser; use crate::domain::ticket::TicketId; fn run() { let _id = TicketId::random(); }",
    );
    add_source(
        world,
        "outbound/storage/file_store.rs",
        "use cap_std::fs::Dir; use crate::domain::ticket::TicketId; pub struct Store(Dir); impl Store { pub fn save(&self, _id: TicketId) {} }",
    );
}

#[given("valid domain, inbound, and outbound modules")]
fn valid_modules(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
}

#[given("an inbound module that imports the outbound layer")]
fn inbound_imports_outbound(world: &Mutex<LintWorld>) {
    add_source(world, "inbound/cli/mod.rs", CLI_IMPORTS_STORAGE);
}

#[given("an inbound module that imports cap-std directly")]
fn inbound_imports_cap_std(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/mod.rs",
        "use cap_std::fs::Dir; fn run(dir: &Dir) { let _ = dir.read_to_string(\"ticketapp_tickets.json\"); }",
    );
}

#[given("a domain module that imports clap")]
fn domain_imports_clap(world: &Mutex<LintWorld>) {
    add_source(world, "domain/ticket.rs", DOMAIN_IMPORTS_CLAP);
}

#[given("an outbound module that imports the inbound layer")]
fn outbound_imports_inbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "outbound/storage/bad_cross_boundary.rs",
        "use crate::inbound::cli; fn save() { let _ = 1; }",
    );
}

#[given("valid modules mixed with multiple boundary violations")]
fn valid_modules_with_multiple_violations(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
    add_source(world, "inbound/cli/bad_cross_boundary.rs", CLI_IMPORTS_STORAGE);
    add_source(world, "domain/bad.rs", DOMAIN_IMPORTS_CLAP);
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &Mutex<LintWorld>) {
    let sources = {
        let world = world.lock().expect("world lock");
        world.sources.clone()
    };

    let temp_dir = TempDir::new().expect("tempdir");
    let root = Utf8Path::from_path(temp_dir.path()).expect("utf-8 temp path");
    let workspace = Dir::open_ambient_dir(root, ambient_authority()).expect("open temp dir");
    for source in &sources {
        let path = Utf8Path::new("ticketapp/src").join(&source.file);
        if let Some(parent) = path.parent() {
            workspace
                .create_dir_all(parent)
                .expect("create parent directories");
        }
        workspace
            .write(&path, &source.contents)
            .expect("write source file");
    }

    let result = architecture_lint::lint_crate_sources(&root.join("ticketapp"));
    let mut world = world.lock().expect("world lock");
    world.result = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

#[then("the lint fails")]
fn lint_fails(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_err(), "expected failure, got: {outcome:?}");
}

fn violations(world: &Mutex<LintWorld>) -> Vec<Violation> {
    let world = world.lock().expect("world lock");
    match world.result.as_ref().expect("lint must have run") {
        Err(ArchitectureLintError::Violations(violations)) => violations.clone(),
        other => panic!("expected violations, got: {other:?}"),
    }
}

fn assert_violation_in_file_contains(
    world: &Mutex<LintWorld>,
    expected_file: &str,
    expected_substring: &str,
) {
    let violations = violations(world);
    assert!(
        violations.iter().any(|violation| {
            violation.file.as_str() == expected_file
                && violation.message.contains(expected_substring)
        }),
        "expected violation in '{expected_file}' containing '{expected_substring}', got: {violations:?}"
    );
}

#[then("the lint fails due to outbound access from inbound")]
fn lint_fails_due_to_outbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/mod.rs", "crate::outbound");
}

#[then("the lint fails due to filesystem crate usage")]
fn lint_fails_due_to_filesystem_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/mod.rs", "external crate `cap_std`");
}

#[then("the lint fails due to CLI crate usage in the domain")]
fn lint_fails_due_to_cli_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "domain/ticket.rs", "external crate `clap`");
}

#[then("the lint fails due to inbound access from outbound")]
fn lint_fails_due_to_inbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(
        world,
        "outbound/storage/bad_cross_boundary.rs",
        "crate::inbound",
    );
}

#[then("all boundary violations are reported")]
fn all_boundary_violations_are_reported(world: &Mutex<LintWorld>) {
    assert_eq!(violations(world).len(), 2);
    assert_violation_in_file_contains(
        world,
        "inbound/cli/bad_cross_boundary.rs",
        "crate::outbound",
    );
    assert_violation_in_file_contains(world, "domain/bad.rs", "external crate `clap`");
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Well-layered modules pass"
)]
fn well_layered_modules_pass(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The CLI adapter reaches into storage adapters"
)]
fn cli_reaches_into_storage(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The CLI adapter opens files directly"
)]
fn cli_opens_files_directly(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The domain parses command-line arguments"
)]
fn domain_parses_arguments(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "A storage adapter calls back into the CLI"
)]
fn storage_calls_back_into_cli(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported in one run"
)]
fn every_violation_is_reported(world: Mutex<LintWorld>) {
    let _ = world;
}
