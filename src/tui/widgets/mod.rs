//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{FieldView, FocusRing, draw_field};
pub use status_bar::{StatusBarContext, draw_status_bar};
