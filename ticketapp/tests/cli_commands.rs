//! End-to-end tests driving the CLI adapter against a data directory.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use clap::Parser;
use rstest::{fixture, rstest};
use ticketapp::config::AppSettings;
use ticketapp::inbound::cli::{Cli, CliError};
use ticketapp::startup::{FileTicketApp, build_app};
use ticketapp::test_support::TempDataDir;

struct Session {
    data_dir: TempDataDir,
}

impl Session {
    fn app(&self) -> FileTicketApp {
        let settings = AppSettings {
            data_dir: Some(self.data_dir.path().as_std_path().to_path_buf()),
            auth_delay_ms: Some(0),
            accounts_path: None,
            log_json: false,
        };
        build_app(&settings, None).expect("app builds")
    }

    /// Run one command with a freshly built app, as the binary does.
    async fn run(&self, args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("ticketapp").chain(args.iter().copied()))
            .expect("arguments parse");
        let mut out = Vec::new();
        self.app().run(cli.command, &mut out).await?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    async fn ok(&self, args: &[&str]) -> String {
        self.run(args).await.expect("command succeeds")
    }
}

#[fixture]
fn session() -> Session {
    Session {
        data_dir: TempDataDir::new(),
    }
}

fn created_id(output: &str) -> String {
    output
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Created ticket "))
        .expect("create output")
        .to_owned()
}

#[rstest]
#[tokio::test]
async fn ticket_commands_require_a_session(session: Session) {
    let error = session
        .run(&["tickets", "list"])
        .await
        .expect_err("anonymous");
    assert_eq!(error.exit_code(), 3);
}

#[rstest]
#[tokio::test]
async fn login_persists_across_invocations(session: Session) {
    let output = session
        .ok(&[
            "login",
            "--email",
            "admin@ticketapp.com",
            "--password",
            "password123",
        ])
        .await;
    assert_eq!(
        output,
        "Logged in as Admin User <admin@ticketapp.com> (id 1)\n"
    );

    let whoami = session.ok(&["whoami"]).await;
    assert_eq!(whoami, "Admin User <admin@ticketapp.com> (id 1)\n");

    session.ok(&["logout"]).await;
    assert_eq!(session.ok(&["whoami"]).await, "Not logged in\n");
}

#[rstest]
#[tokio::test]
async fn bad_login_reports_each_missing_field(session: Session) {
    let error = session.run(&["login"]).await.expect_err("empty form");
    let mut report = Vec::new();
    error.report(&mut report).expect("write report");

    assert_eq!(error.exit_code(), 2);
    assert_eq!(
        String::from_utf8(report).expect("utf8"),
        "email: Email is required\npassword: Password is required\n"
    );
}

#[rstest]
#[tokio::test]
async fn signup_then_create_update_delete(session: Session) {
    session
        .ok(&[
            "signup",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--password",
            "abc123",
            "--confirm-password",
            "abc123",
        ])
        .await;

    let created = session
        .ok(&["tickets", "create", "--title", "Printer jam", "--priority", "high"])
        .await;
    let id = created_id(&created);
    assert!(created.ends_with("total=1 open=1 in_progress=0 closed=0\n"));

    let updated = session
        .ok(&["tickets", "update", id.as_str(), "--status", "in_progress"])
        .await;
    assert!(updated.ends_with("total=1 open=0 in_progress=1 closed=0\n"));

    let shown = session.ok(&["tickets", "show", id.as_str()]).await;
    assert!(shown.contains("title:       Printer jam\n"));
    assert!(shown.contains("priority:    high\n"));

    let deleted = session.ok(&["tickets", "delete", id.as_str()]).await;
    assert!(deleted.starts_with(&format!("Deleted ticket {id}\n")));
    let again = session.ok(&["tickets", "delete", id.as_str()]).await;
    assert!(again.starts_with(&format!("Ticket {id} was already gone\n")));
}

#[rstest]
#[tokio::test]
async fn invalid_ticket_forms_are_rejected(session: Session) {
    session
        .ok(&[
            "login",
            "--email",
            "user@ticketapp.com",
            "--password",
            "password123",
        ])
        .await;

    let error = session
        .run(&["tickets", "create", "--title", "   ", "--status", "done"])
        .await
        .expect_err("invalid form");
    let CliError::Form(errors) = &error else {
        panic!("expected form errors, got {error:?}");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(session.ok(&["tickets", "stats"]).await, "total=0 open=0 in_progress=0 closed=0\n");
}

#[rstest]
#[tokio::test]
async fn updating_a_missing_ticket_is_not_found(session: Session) {
    session
        .ok(&[
            "login",
            "--email",
            "user@ticketapp.com",
            "--password",
            "password123",
        ])
        .await;

    let error = session
        .run(&[
            "tickets",
            "update",
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "--title",
            "Ghost",
        ])
        .await
        .expect_err("missing ticket");
    assert_eq!(error.exit_code(), 4);
}
