//! # Entry Formatting
//!
//! Turns the captured title and body into a checklist entry:
//!
//! ```text
//! - [ ] Buy milk
//! 	- 2% milk
//! 	- organic
//! ```
//!
//! The title is used exactly as typed. The body is trimmed of surrounding
//! spaces and newlines, and every remaining line becomes a nested item.

/// Marker that opens an unchecked checklist item.
pub const CHECKBOX_PREFIX: &str = "- [ ] ";
/// Prefix for each body line (one tab, then a list dash).
pub const SUB_ITEM_PREFIX: &str = "\t- ";

/// Format a title and body into the checklist markup appended to the note.
pub fn format_entry(title: &str, body: &str) -> String {
    let body = body.trim_matches(|c| c == '\n' || c == ' ');

    let sub_items = if body.is_empty() {
        String::new()
    } else {
        body.split('\n')
            .map(|line| format!("{SUB_ITEM_PREFIX}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("{CHECKBOX_PREFIX}{title}\n{sub_items}")
}
