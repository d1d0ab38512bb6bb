//! Command backend: delegate the append to an external note tool.
//!
//! The invocation follows `obsidian-cli`:
//!
//! ```text
//! obsidian-cli create <note> --content <entry> --append [--vault <vault>]
//! ```
//!
//! which creates the note if needed and appends otherwise.

use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use super::{AppendError, NoteDestination, NoteSink};

pub const DEFAULT_PROGRAM: &str = "obsidian-cli";

#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    vault: Option<String>,
}

impl CommandSink {
    pub fn new(program: impl Into<String>, vault: Option<String>) -> Self {
        Self {
            program: program.into(),
            vault,
        }
    }

    /// Arguments passed to the program for one append.
    pub fn args(&self, note: &str, text: &str) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            note.to_string(),
            "--content".to_string(),
            text.to_string(),
            "--append".to_string(),
        ];
        if let Some(vault) = &self.vault {
            args.push("--vault".to_string());
            args.push(vault.clone());
        }
        args
    }

    fn exec_failed(&self, reason: impl Into<String>) -> AppendError {
        AppendError::ExecFailed {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl NoteSink for CommandSink {
    fn name(&self) -> &str {
        "command"
    }

    async fn append(&self, destination: &NoteDestination, text: &str) -> Result<(), AppendError> {
        let args = self.args(destination.as_str(), text);
        debug!("Running {} with {} args", self.program, args.len());

        // Output is captured so nothing reaches the terminal the UI is drawing on
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.exec_failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(if stderr.is_empty() {
                self.exec_failed(output.status.to_string())
            } else {
                self.exec_failed(stderr)
            });
        }

        info!("{} appended to note {}", self.program, destination);
        Ok(())
    }
}
