//! File backend: append by rewriting the note in place.
//!
//! The whole note is read, the entry is concatenated (with a separating
//! newline when the note does not end in one), and the result replaces the
//! note via a temporary sibling file and `rename()`. A reader never sees a
//! half-written note, and an aborted append leaves the old contents.
//!
//! A missing or empty note is refused rather than created.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{AppendError, NoteDestination, NoteSink};

#[derive(Debug, Default)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NoteSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn append(&self, destination: &NoteDestination, text: &str) -> Result<(), AppendError> {
        let path = destination.expanded_path();
        let shown = path.display().to_string();

        let existing = tokio::fs::read(&path)
            .await
            .map_err(|e| read_failed(&shown, e.to_string()))?;
        if existing.is_empty() {
            return Err(read_failed(&shown, "note is empty"));
        }

        // Write next to the real file so the rename stays on one filesystem
        let target = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| read_failed(&shown, e.to_string()))?;

        let contents = join_entry(&existing, text);
        replace_atomically(&target, &contents)
            .await
            .map_err(|reason| AppendError::WriteFailed {
                path: shown.clone(),
                reason,
            })?;

        info!("Appended {} bytes to {}", text.len(), shown);
        Ok(())
    }
}

fn read_failed(path: &str, reason: impl Into<String>) -> AppendError {
    AppendError::ReadFailed {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Existing contents followed by the entry, newline-separated if needed.
fn join_entry(existing: &[u8], text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(existing.len() + text.len() + 1);
    out.extend_from_slice(existing);
    if existing.last().is_some_and(|&b| b != b'\n') {
        out.push(b'\n');
    }
    out.extend_from_slice(text.as_bytes());
    out
}

/// Hidden sibling of `target`, unique per process.
fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "note".to_string());
    target.with_file_name(format!(".{name}.{}.notesnap.tmp", std::process::id()))
}

/// Write `contents` to a temporary sibling of `target`, then rename it over
/// `target`. The temporary file is removed if anything fails.
async fn replace_atomically(target: &Path, contents: &[u8]) -> Result<(), String> {
    let tmp = temp_path_for(target);
    debug!("Writing {} bytes via {}", contents.len(), tmp.display());

    let result = async {
        tokio::fs::write(&tmp, contents).await?;
        match tokio::fs::metadata(target).await {
            Ok(meta) => {
                if let Err(e) = tokio::fs::set_permissions(&tmp, meta.permissions()).await {
                    warn!("Could not copy permissions to {}: {}", tmp.display(), e);
                }
            }
            Err(e) => warn!("Could not stat {}: {}", target.display(), e),
        }
        tokio::fs::rename(&tmp, target).await
    }
    .await;

    if let Err(e) = result {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            debug!("Temp file cleanup skipped: {}", cleanup);
        }
        return Err(e.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    const ENTRY: &str = "- [ ] Buy milk\n\t- 2% milk\n\t- organic";

    fn dest(path: &Path) -> NoteDestination {
        NoteDestination::new(path.to_string_lossy().into_owned())
    }

    #[test]
    fn test_join_entry_adds_separator_only_when_needed() {
        assert_eq!(join_entry(b"a\n", "b"), b"a\nb".to_vec());
        assert_eq!(join_entry(b"a", "b"), b"a\nb".to_vec());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let tmp = temp_path_for(Path::new("/vault/inbox.md"));
        let expected = format!("/vault/.inbox.md.{}.notesnap.tmp", std::process::id());
        assert_eq!(tmp, PathBuf::from(expected));
    }

    #[test]
    fn test_temp_path_differs_per_note_and_process() {
        let a = temp_path_for(Path::new("/vault/inbox.md"));
        let b = temp_path_for(Path::new("/vault/todo.md"));
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.contains(&std::process::id().to_string()));
    }

    #[tokio::test]
    async fn test_append_after_trailing_newline() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("inbox.md");
        std::fs::write(&path, "existing\n").expect("write");

        assert_ok!(FileSink::new().append(&dest(&path), ENTRY).await);

        let saved = std::fs::read_to_string(&path).expect("read");
        assert_eq!(saved, format!("existing\n{ENTRY}"));
    }

    #[tokio::test]
    async fn test_append_inserts_missing_newline() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("inbox.md");
        std::fs::write(&path, "existing").expect("write");

        assert_ok!(FileSink::new().append(&dest(&path), ENTRY).await);

        let saved = std::fs::read_to_string(&path).expect("read");
        assert_eq!(saved, format!("existing\n{ENTRY}"));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_failure() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nope.md");

        let err = assert_err!(FileSink::new().append(&dest(&path), ENTRY).await);
        assert!(matches!(err, AppendError::ReadFailed { .. }));
        assert!(!path.exists(), "a missing note must not be created");
    }

    #[tokio::test]
    async fn test_empty_file_is_read_failure() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("empty.md");
        std::fs::write(&path, "").expect("write");

        let err = assert_err!(FileSink::new().append(&dest(&path), ENTRY).await);
        match err {
            AppendError::ReadFailed { reason, .. } => assert_eq!(reason, "note is empty"),
            other => panic!("expected ReadFailed, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "");
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("inbox.md");
        std::fs::write(&path, "x\n").expect("write");

        assert_ok!(FileSink::new().append(&dest(&path), "- [ ] y\n").await);

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("inbox.md")]);
    }

    #[tokio::test]
    async fn test_directory_destination_is_read_failure() {
        let dir = tempdir().expect("tempdir");
        let err = assert_err!(FileSink::new().append(&dest(dir.path()), ENTRY).await);
        assert!(matches!(err, AppendError::ReadFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("inbox.md");
        std::fs::write(&path, "x\n").expect("write");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).expect("chmod");

        assert_ok!(FileSink::new().append(&dest(&path), "- [ ] y\n").await);

        let mode = std::fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
