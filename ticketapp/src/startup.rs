//! Startup wiring: settings to adapters to services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::Utf8PathBuf;
use demo_accounts::RegistryError;
use mockable::DefaultClock;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppSettings;
use crate::domain::ports::KeyValueStoreError;
use crate::domain::{SessionService, TicketService};
use crate::inbound::cli::TicketApp;
use crate::outbound::credentials::RegistryCredentialDirectory;
use crate::outbound::sleeper::TokioSleeper;
use crate::outbound::storage::FileKeyValueStore;

/// Errors returned while assembling the application.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
    /// The data directory could not be opened.
    #[error("failed to open data directory: {0}")]
    Store(#[from] KeyValueStoreError),
    /// The demo account registry could not be loaded.
    #[error("failed to load demo accounts: {0}")]
    Accounts(#[from] RegistryError),
}

/// The application wired against the file store and account registry.
pub type FileTicketApp = TicketApp<FileKeyValueStore, RegistryCredentialDirectory>;

fn utf8(path: &Path) -> Result<Utf8PathBuf, StartupError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|path| StartupError::NonUtf8Path { path })
}

/// Build the application from `settings`.
///
/// `data_dir` overrides the configured data directory when present.
///
/// # Errors
///
/// Returns [`StartupError`] when the data directory or account registry is
/// unusable.
pub fn build_app(
    settings: &AppSettings,
    data_dir: Option<&Path>,
) -> Result<FileTicketApp, StartupError> {
    let data_dir = utf8(data_dir.unwrap_or_else(|| settings.data_dir()))?;
    let accounts_path = settings.accounts_path().map(utf8).transpose()?;

    let store = Arc::new(FileKeyValueStore::open(&data_dir)?);
    let directory = Arc::new(RegistryCredentialDirectory::load(accounts_path.as_deref())?);
    let clock = Arc::new(DefaultClock);

    info!(
        %data_dir,
        accounts = directory.len(),
        auth_delay = ?settings.auth_delay(),
        "ticketapp starting"
    );

    let session = SessionService::new(
        store.clone(),
        directory,
        Arc::new(TokioSleeper),
        clock.clone(),
    )
    .with_auth_delay(settings.auth_delay());
    let tickets = TicketService::new(store, clock);
    Ok(TicketApp::new(session, tickets))
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Filtering follows `RUST_LOG`; `json` selects the JSON formatter.
pub fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
