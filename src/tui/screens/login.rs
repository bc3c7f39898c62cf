//! Sign-in screen: paste an identity token and post it to the login page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::SignInReply;
use crate::model::{TextField, Validity};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FieldView, draw_field};

/// Identity tokens are long JWTs; anything past this is a paste accident.
const TOKEN_MAX_LEN: usize = 8192;

/// Severity of the alert shown under the token field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Danger,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// State for the sign-in screen.
#[derive(Debug, Clone)]
pub struct LoginState {
    token: TextField,
    login_url: String,
    pending: bool,
    alert: Option<Alert>,
}

impl LoginState {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            token: TextField::new(TOKEN_MAX_LEN),
            login_url: login_url.into(),
            pending: false,
            alert: None,
        }
    }

    pub fn token(&self) -> &str {
        self.token.value()
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Applies the sign-in reply. Returns the navigation on success.
    pub fn on_signed_in(&mut self, result: Result<SignInReply, String>) -> Action {
        self.pending = false;
        match result {
            Ok(SignInReply::Pass) => {
                self.token.clear();
                self.alert = None;
                Action::Navigate(Screen::ArForm)
            }
            Ok(SignInReply::Rejected(message)) => {
                self.danger(if message.is_empty() {
                    "Sign-in rejected".to_string()
                } else {
                    message
                });
                Action::None
            }
            Err(e) => {
                self.danger(format!("Sign-in failed: {e}"));
                Action::None
            }
        }
    }

    fn danger(&mut self, message: String) {
        self.alert = Some(Alert {
            level: AlertLevel::Danger,
            message,
        });
    }

    fn submit(&mut self) -> Action {
        if self.pending {
            return Action::None;
        }
        let token = self.token.value().trim().to_string();
        if token.is_empty() {
            self.danger("Paste an identity token first".to_string());
            return Action::None;
        }
        self.pending = true;
        self.alert = Some(Alert {
            level: AlertLevel::Info,
            message: "Signing in...".to_string(),
        });
        Action::SignIn(token)
    }
}

impl ScreenState for LoginState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('u') {
                self.token.clear();
            }
            return Action::None;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Action::Quit,
            KeyCode::Backspace => {
                self.token.pop();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.token.push(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}

/// Renders the sign-in screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_login(state: &LoginState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [url_area, field_area, alert_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Login page: ", Style::default().fg(Color::DarkGray)),
            Span::raw(state.login_url()),
        ])),
        url_area,
    );

    // Show only the tail of long tokens so the cursor stays visible.
    let width = field_area.width.saturating_sub(3) as usize;
    let token = state.token();
    let shown = match token.char_indices().rev().nth(width.saturating_sub(1)) {
        Some((idx, _)) if token.chars().count() > width => &token[idx..],
        _ => token,
    };
    let view = FieldView {
        label: "Identity token".to_string(),
        value: shown,
        validity: Validity::Unset,
        focused: !state.is_pending(),
        required: true,
        error: None,
        counter: None,
        percent: 0.0,
    };
    draw_field(&view, frame, field_area);

    if let Some(alert) = state.alert() {
        let color = match alert.level {
            AlertLevel::Danger => Color::Red,
            AlertLevel::Info => Color::Yellow,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(alert.message.as_str(), Style::default().fg(color)))
                .wrap(Wrap { trim: true }),
            alert_area,
        );
    }

    let footer = Paragraph::new(Line::from("Enter: sign in  Ctrl+U: clear  Esc: quit"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
