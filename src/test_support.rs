//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::Form;
use crate::sink::{AppendError, NoteDestination, NoteSink};

/// A sink that remembers every append instead of touching the disk.
#[derive(Default)]
pub struct RecordingSink {
    pub appends: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NoteSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn append(&self, destination: &NoteDestination, text: &str) -> Result<(), AppendError> {
        self.appends
            .lock()
            .expect("recording sink poisoned")
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

/// A sink that always fails with the given error.
pub struct FailingSink(pub AppendError);

#[async_trait]
impl NoteSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    async fn append(&self, _destination: &NoteDestination, _text: &str) -> Result<(), AppendError> {
        Err(self.0.clone())
    }
}

/// A sink whose append never completes.
pub struct PendingSink;

#[async_trait]
impl NoteSink for PendingSink {
    fn name(&self) -> &str {
        "pending"
    }

    async fn append(&self, _destination: &NoteDestination, _text: &str) -> Result<(), AppendError> {
        std::future::pending().await
    }
}

/// Creates a test Form appending to `inbox.md`.
pub fn test_form() -> Form {
    Form::new(
        NoteDestination::new("inbox.md"),
        "Title",
        "Extra context/links",
        80,
    )
}
