//! TUI screen implementations.

pub mod ar_form;
pub mod login;

pub use ar_form::{ArFormState, Focus, draw_ar_form};
pub use login::{Alert, AlertLevel, LoginState, draw_login};
