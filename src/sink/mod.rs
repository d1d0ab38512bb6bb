//! # Note Sinks
//!
//! Where a formatted entry ends up. Two backends implement [`NoteSink`]:
//!
//! - [`FileSink`]: appends to a markdown file on disk
//! - [`CommandSink`]: hands the entry to an external note tool
//!
//! The backend is picked once at startup; the form never branches on it.

mod command;
mod file;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use command::{CommandSink, DEFAULT_PROGRAM};
pub use file::FileSink;

/// Which sink to append with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Command,
}

impl Backend {
    pub fn label(self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::Command => "command",
        }
    }
}

/// The note an entry is appended to: a path for the file backend, a note
/// name for the command backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDestination(String);

impl NoteDestination {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The destination as a filesystem path, with a leading `~/` expanded.
    pub fn expanded_path(&self) -> PathBuf {
        if let Some(rest) = self.0.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for NoteDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why an append did not happen. Shown to the user; never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendError {
    /// The note could not be read (missing, empty or unreadable). Nothing was written.
    ReadFailed { path: String, reason: String },
    /// The new contents could not be written. The note keeps its old contents.
    WriteFailed { path: String, reason: String },
    /// The external command could not be started or reported failure.
    ExecFailed { program: String, reason: String },
}

impl fmt::Display for AppendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendError::ReadFailed { path, reason } => {
                write!(f, "could not read {path}: {reason}")
            }
            AppendError::WriteFailed { path, reason } => {
                write!(f, "could not write {path}: {reason}")
            }
            AppendError::ExecFailed { program, reason } => {
                write!(f, "{program} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AppendError {}

#[async_trait]
pub trait NoteSink: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Append `text` to the end of `destination`, leaving prior content intact.
    async fn append(&self, destination: &NoteDestination, text: &str) -> Result<(), AppendError>;
}
