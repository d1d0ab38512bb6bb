//! # TUI Components
//!
//! UI pieces for the capture form.
//!
//! ## Component Architecture
//!
//! Both components take their data as "props" set by `draw_ui` each frame
//! and implement the shared `Component` trait:
//!
//! - `FieldView`: one bordered text field. Borrows a `core::field::Field`
//!   mutably because laying out the viewport updates the field's scroll offset.
//! - `StatusLine`: error, in-flight spinner and key help under the fields.
//!   Fully stateless.
//!
//! Key handling does not live here. Edit keys flow through `core::update`
//! into the fields, so the components only draw.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── field_view.rs    (Bordered text field with placeholder and cursor)
//! └── status_line.rs   (Error, spinner and help text)
//! ```

mod field_view;
mod status_line;

pub use field_view::FieldView;
pub use status_line::StatusLine;
