//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Submitting**: draws every ~80ms so the spinner moves.
//! - **Editing**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! All pending events are drained before the next draw, so a large paste
//! costs one frame instead of one per character.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{Form, Outcome};
use crate::sink::{Backend, CommandSink, FileSink, NoteDestination, NoteSink};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Hide
        );
    }
}

/// Build the sink for the configured backend.
pub fn build_sink(config: &ResolvedConfig) -> Arc<dyn NoteSink> {
    match config.backend {
        Backend::File => Arc::new(FileSink::new()),
        Backend::Command => Arc::new(CommandSink::new(
            config.program.clone(),
            config.vault.clone(),
        )),
    }
}

/// Runtime the form runs inside. Appends are spawned onto it.
pub fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

/// Tear the runtime down without waiting for abandoned appends.
///
/// An aborted file append may still hold a blocking-pool thread (a FIFO or a
/// hung network mount never returns from `read`), and dropping the runtime
/// would join it.
pub fn shutdown_runtime(runtime: Runtime) {
    debug!("Shutting down runtime in the background");
    runtime.shutdown_background();
}

/// Show the form until the user submits or quits.
///
/// Must be called from inside a tokio runtime: appends run on spawned tasks.
pub fn run(config: ResolvedConfig) -> std::io::Result<Outcome> {
    let sink = build_sink(&config);
    let mut form = Form::from_config(&config);
    info!(
        "Capture form opened (backend: {}, destination: {})",
        sink.name(),
        form.destination
    );

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &mut form, sink),
        Err(e) => Err(e),
    };
    ratatui::restore();

    result?;
    // A loop that ended without a terminal phase was cut short by the user
    Ok(form.outcome().unwrap_or(Outcome::Cancelled))
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    form: &mut Form,
    sink: Arc<dyn NoteSink>,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the in-flight append (dropped on Ctrl+C)
    let mut active_append: Option<AbortHandle> = None;

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = form.is_submitting();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, form, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout)?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut pending = Vec::new();
        pending.extend(first_event);
        for event in std::iter::from_fn(|| poll_event_immediate().transpose()) {
            pending.push(event?);
        }

        let mut should_quit = false;
        for event in pending {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = event.into_action() else {
                continue;
            };
            match update(form, action) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::SpawnAppend(text) => {
                    active_append = Some(spawn_append(
                        sink.clone(),
                        form.destination.clone(),
                        text,
                        tx.clone(),
                    ));
                }
                Effect::None => {}
            }
        }

        // Handle background task results
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::AppendFinished(_)) {
                active_append = None;
            }
            if update(form, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    abandon_append(active_append);
    Ok(())
}

fn abandon_append(active_append: Option<AbortHandle>) {
    if let Some(handle) = active_append {
        info!("Abandoning in-flight append");
        handle.abort();
    }
}

/// Run one append on the tokio runtime and report back as `AppendFinished`.
fn spawn_append(
    sink: Arc<dyn NoteSink>,
    destination: NoteDestination,
    text: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning append: {} bytes to {} via {}",
        text.len(),
        destination,
        sink.name()
    );
    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let result = sink.append(&destination, &text).await;
        debug!(
            "Append finished in {}ms: {:?}",
            started.elapsed().as_millis(),
            result
        );
        if tx.send(Action::AppendFinished(result)).is_err() {
            warn!("Failed to send append result: receiver dropped");
        }
    });
    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::AppendError;
    use crate::test_support::{FailingSink, PendingSink, RecordingSink};

    fn config(backend: Backend) -> ResolvedConfig {
        ResolvedConfig {
            backend,
            note: "inbox.md".to_string(),
            program: "obsidian-cli".to_string(),
            vault: Some("Personal".to_string()),
            width: 80,
            title_placeholder: "Title".to_string(),
            body_placeholder: "Extra context/links".to_string(),
        }
    }

    async fn recv(rx: mpsc::Receiver<Action>) -> Action {
        tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .expect("append result within timeout")
    }

    #[test]
    fn test_build_sink_follows_backend() {
        assert_eq!(build_sink(&config(Backend::File)).name(), "file");
        assert_eq!(build_sink(&config(Backend::Command)).name(), "command");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_append_reports_success() {
        let sink = Arc::new(RecordingSink::default());
        let (tx, rx) = mpsc::channel();

        spawn_append(
            sink.clone(),
            NoteDestination::new("inbox.md"),
            "- [ ] Buy milk\n".to_string(),
            tx,
        );

        assert_eq!(recv(rx).await, Action::AppendFinished(Ok(())));
        let appends = sink.appends.lock().unwrap();
        assert_eq!(
            *appends,
            vec![("inbox.md".to_string(), "- [ ] Buy milk\n".to_string())]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_append_reports_failure() {
        let error = AppendError::ReadFailed {
            path: "missing.md".into(),
            reason: "No such file or directory".into(),
        };
        let sink = Arc::new(FailingSink(error.clone()));
        let (tx, rx) = mpsc::channel();

        spawn_append(sink, NoteDestination::new("missing.md"), "x".into(), tx);

        assert_eq!(recv(rx).await, Action::AppendFinished(Err(error)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_result_feeds_back_into_form() {
        let mut form = crate::test_support::test_form();
        let Effect::SpawnAppend(text) = update(&mut form, Action::Submit) else {
            panic!("submit should spawn an append");
        };

        let (tx, rx) = mpsc::channel();
        spawn_append(
            Arc::new(RecordingSink::default()),
            form.destination.clone(),
            text,
            tx,
        );

        assert_eq!(update(&mut form, recv(rx).await), Effect::Quit);
        assert_eq!(form.outcome(), Some(Outcome::Submitted));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_abandoned_append_never_reports() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_append(
            Arc::new(PendingSink),
            NoteDestination::new("inbox.md"),
            "x".into(),
            tx,
        );

        abandon_append(Some(handle));

        // The aborted task drops its sender without sending a result
        let received = tokio::task::spawn_blocking(move || {
            rx.recv_timeout(Duration::from_secs(5))
        })
        .await
        .unwrap();
        assert_eq!(received, Err(mpsc::RecvTimeoutError::Disconnected));
    }

    #[cfg(unix)]
    #[test]
    fn test_quit_does_not_wait_for_stuck_file_append() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("inbox.md");
        let made = std::process::Command::new("mkfifo").arg(&fifo).status();
        if !made.is_ok_and(|s| s.success()) {
            return;
        }

        let runtime = build_runtime().unwrap();
        runtime.block_on(async {
            let (tx, _rx) = mpsc::channel();
            // Opening a FIFO with no writer blocks a blocking-pool thread
            let handle = spawn_append(
                Arc::new(FileSink::new()),
                NoteDestination::new(fifo.to_string_lossy().into_owned()),
                "- [ ] stuck\n".into(),
                tx,
            );
            tokio::time::sleep(Duration::from_millis(200)).await;
            abandon_append(Some(handle));
        });

        let started = Instant::now();
        shutdown_runtime(runtime);
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "shutdown waited {:?}",
            started.elapsed()
        );
    }
}
