use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Backend, SignInReply, redirect_target};
use crate::config::Config;
use crate::model::{FieldId, MemberChannel, SubmitReply};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{ArFormState, LoginState, draw_ar_form, draw_login};

/// How long the event loop waits for input before checking completions.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Paste an identity token and sign in.
    Login,
    /// Edit and submit an auto-reply module.
    ArForm,
}

/// Result of a backend call, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    SignedIn(Result<SignInReply, String>),
    ChannelChecked {
        token: String,
        result: Result<bool, String>,
    },
    ContentValidated {
        field: FieldId,
        content: String,
        result: Result<bool, String>,
    },
    PinnedAccess {
        channel_id: String,
        result: Result<bool, String>,
    },
    TagsFound {
        keyword: String,
        result: Result<Vec<String>, String>,
    },
    PopularTags(Result<Vec<String>, String>),
    MemberChannels(Result<Vec<MemberChannel>, String>),
    Submitted(Result<SubmitReply, String>),
}

/// Logs a failed backend call and keeps its message for display.
fn failure(request: &'static str, err: ApiError) -> String {
    warn!(request, error = %err, "backend request failed");
    err.to_string()
}

/// Top-level application state.
///
/// Backend calls run as tasks on a tokio runtime; their results come back
/// over a channel and are applied on the UI thread between frames.
pub struct App<B: Backend> {
    screen: Screen,
    backend: B,
    runtime: Handle,
    login: LoginState,
    ar_form: ArFormState,
    redirect: String,
    completion_tx: Sender<Completion>,
    completions: Receiver<Completion>,
    should_quit: bool,
}

impl<B: Backend> App<B> {
    /// Creates a new `App` starting on the [`Screen::Login`] screen.
    pub fn new(config: &Config, backend: B, login_url: String, runtime: Handle) -> Self {
        let (completion_tx, completions) = mpsc::channel();
        let redirect = redirect_target(&login_url, &config.server.default_redirect);
        Self {
            screen: Screen::Login,
            backend,
            runtime,
            login: LoginState::new(login_url),
            ar_form: ArFormState::new(config.limits.form_limits(), config.form.default_mode),
            redirect,
            completion_tx,
            completions,
            should_quit: false,
        }
    }

    /// Main event loop: draw, apply finished requests, poll for input.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<T: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<T>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.drain_completions();
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.screen {
            Screen::Login => draw_login(&self.login, frame, area),
            Screen::ArForm => draw_ar_form(&self.ar_form, frame, area),
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let action = match self.screen {
            Screen::Login => self.login.handle_key(key),
            Screen::ArForm => self.ar_form.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies every completion that has arrived without blocking.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.complete(completion);
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(task.await);
        });
    }

    fn apply(&mut self, action: Action) {
        let backend = self.backend.clone();
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(screen) => {
                debug!(?screen, "navigate");
                self.screen = screen;
            }
            Action::SignIn(token) => {
                info!("signing in");
                self.spawn(async move {
                    let result = backend.sign_in(&token).await;
                    Completion::SignedIn(result.map_err(|e| failure("sign_in", e)))
                });
            }
            Action::CheckChannel(check) => {
                debug!(platform = %check.platform, token = %check.token, "checking channel");
                self.spawn(async move {
                    let result = backend.channel_exists(check.platform, &check.token).await;
                    Completion::ChannelChecked {
                        token: check.token,
                        result: result.map_err(|e| failure("channel_exists", e)),
                    }
                });
            }
            Action::ValidateContent {
                field,
                content_type,
                content,
            } => {
                debug!(?field, %content_type, "validating content");
                self.spawn(async move {
                    let result = backend.validate_content(content_type, &content).await;
                    Completion::ContentValidated {
                        field,
                        content,
                        result: result.map_err(|e| failure("validate_content", e)),
                    }
                });
            }
            Action::CheckPinnedAccess(channel_id) => {
                self.spawn(async move {
                    let result = backend.pinned_access(&channel_id).await;
                    Completion::PinnedAccess {
                        channel_id,
                        result: result.map_err(|e| failure("pinned_access", e)),
                    }
                });
            }
            Action::SearchTags(keyword) => {
                self.spawn(async move {
                    let result = backend.search_tags(&keyword).await;
                    Completion::TagsFound {
                        keyword,
                        result: result.map_err(|e| failure("search_tags", e)),
                    }
                });
            }
            Action::Submit(request) => {
                info!(
                    destination = ?request.target,
                    responses = request.responses.len(),
                    tags = %request.tags,
                    "submitting"
                );
                self.spawn(async move {
                    let result = backend.submit(&request).await;
                    Completion::Submitted(result.map_err(|e| failure("submit", e)))
                });
            }
        }
    }

    /// Starts the lookups the form needs once signed in.
    fn load_form_data(&self) {
        let backend = self.backend.clone();
        self.spawn(async move {
            let result = backend.member_channels().await;
            Completion::MemberChannels(result.map_err(|e| failure("member_channels", e)))
        });
        let backend = self.backend.clone();
        self.spawn(async move {
            let result = backend.search_tags("").await;
            Completion::PopularTags(result.map_err(|e| failure("popular_tags", e)))
        });
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::SignedIn(result) => {
                let action = self.login.on_signed_in(result);
                if action == Action::Navigate(Screen::ArForm) {
                    self.ar_form
                        .set_notice(format!("Signed in. Continue at {}", self.redirect));
                    self.load_form_data();
                }
                self.apply(action);
            }
            Completion::ChannelChecked { token, result } => {
                self.ar_form.on_channel_checked(&token, result);
            }
            Completion::ContentValidated {
                field,
                content,
                result,
            } => self.ar_form.on_content_validated(field, &content, result),
            Completion::PinnedAccess { channel_id, result } => {
                self.ar_form.on_pinned_access(&channel_id, result);
            }
            Completion::TagsFound { keyword, result } => {
                self.ar_form.on_tags_found(&keyword, result);
            }
            Completion::PopularTags(result) => self.ar_form.on_popular_tags(result),
            Completion::MemberChannels(result) => self.ar_form.on_member_channels(result),
            Completion::Submitted(result) => {
                match &result {
                    Ok(reply) if reply.success => {
                        info!(execode = ?reply.execode, "auto-reply registered")
                    }
                    Ok(_) => warn!("auto-reply rejected"),
                    Err(_) => {}
                }
                self.ar_form.on_submitted(result);
            }
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn login(&self) -> &LoginState {
        &self.login
    }

    pub fn ar_form(&self) -> &ArFormState {
        &self.ar_form
    }

    /// Blocks until `count` completions have arrived and applies them.
    #[cfg(test)]
    fn settle(&mut self, count: usize) {
        for _ in 0..count {
            let completion = self
                .completions
                .recv_timeout(Duration::from_secs(5))
                .expect("backend task should complete");
            self.complete(completion);
        }
    }
}
