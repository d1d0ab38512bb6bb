//! # Core Form Logic
//!
//! The capture form as plain data plus a reducer.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Form (state)         │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • format_entry()       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::SpawnAppend
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ── spawns ─────────────▶ │  NoteSink  │
//!     │  Adapter   │ ◀── AppendFinished ───── │ (tokio)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Form` struct and its phases
//! - [`action`]: The `Action` enum and `update()`
//! - [`field`]: Text input buffers with cursor handling
//! - [`focus`]: Which field owns the keyboard
//! - [`format`]: Checklist entry formatting
//! - [`config`]: Settings resolution (the one place that touches the filesystem)

pub mod action;
pub mod config;
pub mod field;
pub mod focus;
pub mod format;
pub mod state;
