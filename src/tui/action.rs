//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::{ContentType, ExistenceCheck, FieldId, SubmitRequest};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to navigate between screens and to start
/// backend requests. Every request answers later with a
/// [`Completion`](super::app::Completion).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Post an identity token to the login page.
    SignIn(String),
    /// Ask whether a channel exists.
    CheckChannel(ExistenceCheck),
    /// Ask the server to vet a keyword or response.
    ValidateContent {
        field: FieldId,
        content_type: ContentType,
        content: String,
    },
    /// Ask whether the user may pin modules in a member channel.
    CheckPinnedAccess(String),
    /// Look up tags matching a keyword.
    SearchTags(String),
    /// Register the module.
    Submit(SubmitRequest),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
