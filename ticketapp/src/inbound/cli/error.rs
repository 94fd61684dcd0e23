//! CLI error type and exit code mapping.

use std::io::{self, Write};

use thiserror::Error;

use crate::domain::{Error, ErrorCode, FormErrors};

/// Failures surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more form fields failed validation.
    #[error("invalid input: {0}")]
    Form(FormErrors),
    /// A domain service rejected the command.
    #[error("{0}")]
    Domain(#[from] Error),
    /// Command output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<FormErrors> for CliError {
    fn from(value: FormErrors) -> Self {
        Self::Form(value)
    }
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Form(_) => 2,
            Self::Domain(error) => match error.code() {
                ErrorCode::Unauthorized => 3,
                ErrorCode::NotFound => 4,
                _ => 1,
            },
            Self::Output(_) => 1,
        }
    }

    /// Write a human-readable report, one line per invalid field.
    pub fn report(&self, mut out: impl Write) -> io::Result<()> {
        match self {
            Self::Form(errors) => {
                for (field, message) in errors.iter() {
                    writeln!(out, "{field}: {message}")?;
                }
                Ok(())
            }
            other => writeln!(out, "error: {other}"),
        }
    }
}
