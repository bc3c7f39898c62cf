//! Auto-reply registration screen.
//!
//! Wraps a [`FormState`] with keyboard focus and turns key presses into
//! form operations and backend requests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap};
use tracing::debug;

use crate::model::{
    ContentType, FieldId, FormLimits, FormState, MemberChannel, PopularTags, SubmissionMode,
    SubmitBlocked, SubmitOutcome, SubmitReply, TextField, Validity, parse_cooldown,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FieldView, FocusRing, draw_field};
use crate::tui::widgets::status_bar::{StatusBarContext, draw_status_bar};

const TAG_KEYWORD_MAX_LEN: usize = 64;

/// Something on the form that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Keyword,
    Response(usize),
    MemberChannel,
    Platform,
    ChannelToken,
    Private,
    Pinned,
    Cooldown,
    TagKeyword,
    TagResults,
    PopularTags,
    SelectedTags,
}

impl Focus {
    fn field(self) -> Option<FieldId> {
        match self {
            Focus::Keyword => Some(FieldId::Keyword),
            Focus::Response(i) => Some(FieldId::Response(i)),
            Focus::ChannelToken => Some(FieldId::ChannelToken),
            _ => None,
        }
    }

    fn is_list(self) -> bool {
        matches!(
            self,
            Focus::TagResults | Focus::PopularTags | Focus::SelectedTags
        )
    }
}

/// Focus order for the current form layout.
fn focus_items(form: &FormState) -> Vec<Focus> {
    let mut items = vec![Focus::Keyword];
    items.extend((0..form.response_count()).map(Focus::Response));
    for panel in SubmissionMode::all() {
        if !form.mode().shows_panel(*panel) {
            continue;
        }
        match panel {
            SubmissionMode::Member => items.push(Focus::MemberChannel),
            SubmissionMode::Channel => items.extend([Focus::Platform, Focus::ChannelToken]),
            SubmissionMode::Execode => {}
        }
    }
    items.extend([
        Focus::Private,
        Focus::Pinned,
        Focus::Cooldown,
        Focus::TagKeyword,
        Focus::TagResults,
        Focus::PopularTags,
        Focus::SelectedTags,
    ]);
    items
}

/// State for the registration screen.
#[derive(Debug, Clone)]
pub struct ArFormState {
    form: FormState,
    focus: FocusRing<Focus>,
    tag_keyword: TextField,
    list_cursor: usize,
    notice: Option<String>,
}

impl ArFormState {
    pub fn new(limits: FormLimits, mode: SubmissionMode) -> Self {
        let form = FormState::new(limits, mode);
        let focus = FocusRing::new(focus_items(&form));
        Self {
            form,
            focus,
            tag_keyword: TextField::new(TAG_KEYWORD_MAX_LEN),
            list_cursor: 0,
            notice: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus.current()
    }

    pub fn tag_keyword(&self) -> &str {
        self.tag_keyword.value()
    }

    /// Cursor row within the focused tag list.
    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    /// One-line message shown under the mode tabs.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    // --- completions ---

    pub fn on_channel_checked(&mut self, token: &str, result: Result<bool, String>) {
        self.form.apply_existence(token, result);
    }

    pub fn on_content_validated(
        &mut self,
        field: FieldId,
        content: &str,
        result: Result<bool, String>,
    ) {
        self.form.apply_content_verdict(field, content, result);
    }

    pub fn on_pinned_access(&mut self, channel_id: &str, result: Result<bool, String>) {
        self.form.apply_pinned_access(channel_id, result);
    }

    pub fn on_tags_found(&mut self, keyword: &str, result: Result<Vec<String>, String>) {
        self.form.tag_search_mut().finish(keyword, result);
        if self.focus() == Some(Focus::TagResults) {
            self.list_cursor = 0;
        }
    }

    pub fn on_popular_tags(&mut self, result: Result<Vec<String>, String>) {
        self.form.set_popular_tags(PopularTags::from_result(result));
    }

    /// Installs the member channel list. A failed load leaves it empty.
    pub fn on_member_channels(&mut self, result: Result<Vec<MemberChannel>, String>) {
        match result {
            Ok(channels) => self.form.set_member_channels(channels),
            Err(e) => {
                self.form.set_member_channels(Vec::new());
                self.notice = Some(format!("Could not load your channels: {e}"));
            }
        }
    }

    pub fn on_submitted(&mut self, result: Result<SubmitReply, String>) {
        self.form.finish_submit(result);
        if self.form.outcome() == Some(&SubmitOutcome::Succeeded) {
            self.focus.set_focus(Focus::Keyword);
        }
        self.refresh_focus();
    }

    // --- key handling ---

    fn refresh_focus(&mut self) {
        self.focus.set_items(focus_items(&self.form));
    }

    fn move_focus(&mut self, forward: bool) -> Action {
        let leaving = self.focus.current();
        if forward {
            self.focus.focus_next();
        } else {
            self.focus.focus_prev();
        }
        self.list_cursor = 0;
        self.on_blur(leaving)
    }

    /// Validates the field being left and starts its remote check.
    fn on_blur(&mut self, leaving: Option<Focus>) -> Action {
        let Some(id) = leaving.and_then(Focus::field) else {
            return Action::None;
        };
        self.form.on_field_changed(id);
        match id {
            FieldId::ChannelToken => self.channel_check(false),
            _ => self.content_check(id),
        }
    }

    /// Existence check for the channel token. Unless `force`d, a token that
    /// already has a verdict is not checked again.
    fn channel_check(&mut self, force: bool) -> Action {
        if self.form.mode() != SubmissionMode::Channel {
            return Action::None;
        }
        let Some(field) = self.form.field(FieldId::ChannelToken) else {
            return Action::None;
        };
        if !force && (field.is_empty() || field.remote().is_some()) {
            return Action::None;
        }
        match self.form.request_existence_check() {
            Some(check) => Action::CheckChannel(check),
            None => Action::None,
        }
    }

    /// Server-side check for image and sticker content that passes locally.
    fn content_check(&self, id: FieldId) -> Action {
        let (Some(field), Some(content_type)) = (self.form.field(id), self.form.content_type(id))
        else {
            return Action::None;
        };
        if content_type == ContentType::Text
            || field.remote().is_some()
            || field.check(self.form.rule(id)).is_err()
        {
            return Action::None;
        }
        Action::ValidateContent {
            field: id,
            content_type,
            content: field.value().to_string(),
        }
    }

    fn select_mode(&mut self, mode: SubmissionMode) -> Action {
        debug!(panel = mode.panel_id(), "mode selected");
        let check = self.form.on_mode_selected(mode);
        self.refresh_focus();
        if let Some(check) = check {
            return Action::CheckChannel(check);
        }
        match (mode, self.form.selected_member()) {
            (SubmissionMode::Member, Some(channel)) => {
                Action::CheckPinnedAccess(channel.id.clone())
            }
            _ => Action::None,
        }
    }

    fn submit(&mut self) -> Action {
        match self.form.begin_submit() {
            Ok(request) => Action::Submit(request),
            Err(SubmitBlocked::AwaitingCheck(check)) => Action::CheckChannel(check),
            Err(_) => Action::None,
        }
    }

    fn search_tags(&mut self) -> Action {
        let keyword = self.tag_keyword.value().trim().to_string();
        match self.form.begin_tag_search(&keyword) {
            Ok(true) => Action::SearchTags(keyword),
            _ => Action::None,
        }
    }

    fn list_items(&self, focus: Focus) -> &[String] {
        match focus {
            Focus::TagResults => self.form.tag_search().results(),
            Focus::PopularTags => self.form.popular_tags().tags(),
            Focus::SelectedTags => self.form.tags().tags(),
            _ => &[],
        }
    }

    fn move_cursor(&mut self, focus: Focus, forward: bool) {
        let len = self.list_items(focus).len();
        if len == 0 {
            self.list_cursor = 0;
            return;
        }
        self.list_cursor = if forward {
            (self.list_cursor + 1).min(len - 1)
        } else {
            self.list_cursor.saturating_sub(1)
        };
    }

    /// Adds or removes the tag under the cursor.
    fn activate_tag(&mut self, focus: Focus) {
        let Some(tag) = self.list_items(focus).get(self.list_cursor).cloned() else {
            return;
        };
        if focus == Focus::SelectedTags {
            self.form.tags_mut().remove(&tag);
            let len = self.form.tags().len();
            self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
        } else {
            self.form.tags_mut().add(tag);
        }
    }

    fn edit_field(&mut self, id: FieldId, edit: impl FnOnce(&mut TextField)) {
        if let Some(field) = self.form.field_mut(id) {
            edit(field);
            self.form.on_field_changed(id);
        }
    }

    fn handle_ctrl(&mut self, code: KeyCode) -> Action {
        let focus = self.focus.current();
        match code {
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('t') => match focus.and_then(Focus::field) {
                Some(id) if id != FieldId::ChannelToken => {
                    self.form.cycle_content_type(id, true);
                    self.form.on_field_changed(id);
                    self.content_check(id)
                }
                _ => Action::None,
            },
            KeyCode::Char('n') => {
                if self.form.add_response_slot() {
                    self.refresh_focus();
                    self.focus
                        .set_focus(Focus::Response(self.form.response_count() - 1));
                }
                Action::None
            }
            KeyCode::Char('d') => {
                if self.form.remove_response_slot() {
                    self.refresh_focus();
                }
                Action::None
            }
            KeyCode::Char('k') => self.channel_check(true),
            KeyCode::Char('p') => {
                self.form.toggle_pinned();
                Action::None
            }
            KeyCode::Char('r') => {
                self.form.toggle_private();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_enter(&mut self) -> Action {
        match self.focus.current() {
            Some(Focus::Keyword) => {
                self.edit_field(FieldId::Keyword, |f| f.push('\n'));
                Action::None
            }
            Some(Focus::Response(i)) => {
                self.edit_field(FieldId::Response(i), |f| f.push('\n'));
                Action::None
            }
            Some(Focus::TagKeyword) => self.search_tags(),
            Some(focus) if focus.is_list() => {
                self.activate_tag(focus);
                Action::None
            }
            Some(Focus::Private) => {
                self.form.toggle_private();
                Action::None
            }
            Some(Focus::Pinned) => {
                self.form.toggle_pinned();
                Action::None
            }
            _ => self.submit(),
        }
    }

    fn handle_arrow(&mut self, forward: bool) -> Action {
        match self.focus.current() {
            Some(Focus::Platform) => {
                self.form.cycle_platform(forward);
                Action::None
            }
            Some(Focus::MemberChannel) => match self.form.cycle_member_channel(forward) {
                Some(id) => Action::CheckPinnedAccess(id),
                None => Action::None,
            },
            Some(Focus::Cooldown) => {
                self.form.adjust_cooldown(if forward { 1 } else { -1 });
                Action::None
            }
            Some(focus) if focus.is_list() => {
                self.move_cursor(focus, forward);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_char(&mut self, ch: char) -> Action {
        let focus = self.focus.current();
        if let Some(id) = focus.and_then(Focus::field) {
            self.edit_field(id, |f| f.push(ch));
            return Action::None;
        }
        match focus {
            Some(Focus::TagKeyword) => self.tag_keyword.push(ch),
            Some(Focus::Cooldown) => match ch {
                '+' => self.form.adjust_cooldown(1),
                '-' => self.form.adjust_cooldown(-1),
                _ if ch.is_ascii_digit() => {
                    let typed = format!("{}{ch}", self.form.cooldown_secs());
                    // Too many digits for a u32 is past any cap.
                    self.form.set_cooldown(parse_cooldown(&typed).unwrap_or(u32::MAX));
                }
                _ => {}
            },
            Some(Focus::Private) if ch == ' ' => self.form.toggle_private(),
            Some(Focus::Pinned) if ch == ' ' => {
                self.form.toggle_pinned();
            }
            _ => {}
        }
        Action::None
    }

    fn handle_backspace(&mut self) -> Action {
        let focus = self.focus.current();
        if let Some(id) = focus.and_then(Focus::field) {
            self.edit_field(id, TextField::pop);
            return Action::None;
        }
        match focus {
            Some(Focus::TagKeyword) => self.tag_keyword.pop(),
            Some(Focus::Cooldown) => self.form.set_cooldown(self.form.cooldown_secs() / 10),
            Some(Focus::SelectedTags) => self.activate_tag(Focus::SelectedTags),
            _ => {}
        }
        Action::None
    }
}

impl ScreenState for ArFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_ctrl(key.code);
        }
        match key.code {
            KeyCode::F(1) => self.select_mode(SubmissionMode::Member),
            KeyCode::F(2) => self.select_mode(SubmissionMode::Channel),
            KeyCode::F(3) => self.select_mode(SubmissionMode::Execode),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Esc => Action::Navigate(Screen::Login),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Left | KeyCode::Up => self.handle_arrow(false),
            KeyCode::Right | KeyCode::Down => self.handle_arrow(true),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete if self.focus.current() == Some(Focus::SelectedTags) => {
                self.activate_tag(Focus::SelectedTags);
                Action::None
            }
            KeyCode::Char(ch) => self.handle_char(ch),
            _ => Action::None,
        }
    }
}

// --- rendering ---

fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn field_view<'a>(state: &'a ArFormState, id: FieldId, label: String) -> Option<FieldView<'a>> {
    let form = state.form();
    let field = form.field(id)?;
    let focus = match id {
        FieldId::Keyword => Focus::Keyword,
        FieldId::Response(i) => Focus::Response(i),
        FieldId::ChannelToken => Focus::ChannelToken,
    };
    let counter = (id != FieldId::ChannelToken).then(|| (field.len(), field.max_len()));
    Some(FieldView {
        label,
        value: field.value(),
        validity: form.validity(id),
        focused: state.focus() == Some(focus),
        required: true,
        error: form.error(id),
        counter,
        percent: field.percent(),
    })
}

fn content_label(name: String, content_type: Option<ContentType>) -> String {
    match content_type {
        Some(t) => format!("{name} [{t}]"),
        None => name,
    }
}

/// Renders the registration screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_ar_form(state: &ArFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Auto-Reply ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, notice_area, body_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let form = state.form();
    let titles: Vec<String> = SubmissionMode::all()
        .iter()
        .enumerate()
        .map(|(i, m)| format!("F{} {}", i + 1, m.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(form.mode().index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, tabs_area);

    if let Some(notice) = state.notice() {
        frame.render_widget(
            Paragraph::new(Span::styled(notice, Style::default().fg(Color::Green))),
            notice_area,
        );
    }

    let [content_area, side_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(body_area);

    draw_content_fields(state, frame, content_area);

    let panel_height = match form.mode() {
        SubmissionMode::Channel => 6,
        _ => 3,
    };
    let [panel_area, props_area, tags_area] = Layout::vertical([
        Constraint::Length(panel_height),
        Constraint::Length(5),
        Constraint::Min(6),
    ])
    .areas(side_area);

    draw_mode_panel(state, frame, panel_area);
    draw_properties(state, frame, props_area);
    draw_tags(state, frame, tags_area);

    let ctx = StatusBarContext {
        pending: form.is_pending(),
        can_submit: form.can_submit(),
        outcome: form.outcome().cloned(),
        execode: form.execode().map(str::to_string),
        last_submission: form
            .last_submission()
            .map(|t| t.format("%H:%M:%S").to_string()),
    };
    draw_status_bar(&ctx, frame, status_area);

    let footer = Paragraph::new(Line::from(
        "Tab: next  F1-F3: mode  Ctrl+T: type  Ctrl+N/D: response  Ctrl+S: submit  Esc: back",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_content_fields(state: &ArFormState, frame: &mut Frame, area: Rect) {
    let form = state.form();
    let mut views = Vec::new();
    let keyword_label = content_label("Keyword".to_string(), form.content_type(FieldId::Keyword));
    views.extend(field_view(state, FieldId::Keyword, keyword_label));
    for i in 0..form.response_count() {
        let id = FieldId::Response(i);
        let label = content_label(format!("Response {}", i + 1), form.content_type(id));
        views.extend(field_view(state, id, label));
    }

    let mut constraints: Vec<Constraint> =
        views.iter().map(|v| Constraint::Length(v.height())).collect();
    constraints.push(Constraint::Min(0));
    let areas = Layout::vertical(constraints).split(area);
    for (view, rect) in views.iter().zip(areas.iter()) {
        draw_field(view, frame, *rect);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_mode_panel(state: &ArFormState, frame: &mut Frame, area: Rect) {
    let form = state.form();
    let block = Block::default()
        .title(format!(" {} ", form.mode().label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match form.mode() {
        SubmissionMode::Member => {
            let focused = state.focus() == Some(Focus::MemberChannel);
            let text = if form.member_channels().is_empty() {
                "No channels available".to_string()
            } else {
                match form.selected_member() {
                    Some(c) => format!("< {} ({}) >", c.name, c.platform),
                    None => "< select a channel >".to_string(),
                }
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, focused_style(focused))),
                inner,
            );
        }
        SubmissionMode::Channel => {
            let [platform_area, token_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(inner);
            let focused = state.focus() == Some(Focus::Platform);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw("Platform: "),
                    Span::styled(format!("< {} >", form.platform()), focused_style(focused)),
                    Span::styled("  Ctrl+K: check", Style::default().fg(Color::DarkGray)),
                ])),
                platform_area,
            );
            if let Some(view) = field_view(state, FieldId::ChannelToken, "Token".to_string()) {
                draw_field(&view, frame, token_area);
            }
        }
        SubmissionMode::Execode => {
            frame.render_widget(
                Paragraph::new("An execode will be issued for use in chat.")
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_properties(state: &ArFormState, frame: &mut Frame, area: Rect) {
    let form = state.form();
    let block = Block::default()
        .title(" Properties ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let mut pinned = vec![Span::styled(
        format!("{} Pinned", check(form.pinned().is_on())),
        focused_style(state.focus() == Some(Focus::Pinned)),
    )];
    if !form.pinned_access() {
        pinned.push(Span::styled(
            "  (no access)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Private", check(form.private().is_on())),
            focused_style(state.focus() == Some(Focus::Private)),
        )),
        Line::from(pinned),
        Line::from(Span::styled(
            format!("Cooldown: {}s", form.cooldown_secs()),
            focused_style(state.focus() == Some(Focus::Cooldown)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_tags(state: &ArFormState, frame: &mut Frame, area: Rect) {
    let form = state.form();
    let block = Block::default()
        .title(" Tags ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [keyword_area, lists_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);

    let search = form.tag_search();
    let view = FieldView {
        label: "Search".to_string(),
        value: state.tag_keyword(),
        validity: if search.error().is_some() {
            Validity::Invalid
        } else {
            Validity::Unset
        },
        focused: state.focus() == Some(Focus::TagKeyword),
        required: false,
        error: search.error().map(ToString::to_string),
        counter: None,
        percent: 0.0,
    };
    draw_field(&view, frame, keyword_area);

    let [results_area, popular_area, selected_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(lists_area);

    let results_empty = if search.is_searching() {
        "Searching..."
    } else {
        "Enter to search"
    };
    draw_tag_list(
        state,
        Focus::TagResults,
        "Results",
        results_empty,
        frame,
        results_area,
    );

    let popular_empty = match form.popular_tags() {
        PopularTags::Loading => "Loading...",
        _ => "No popular tags",
    };
    draw_tag_list(
        state,
        Focus::PopularTags,
        "Popular",
        popular_empty,
        frame,
        popular_area,
    );
    draw_tag_list(
        state,
        Focus::SelectedTags,
        "Selected",
        "No tags selected",
        frame,
        selected_area,
    );
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_tag_list(
    state: &ArFormState,
    list: Focus,
    title: &str,
    empty: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let focused = state.focus() == Some(list);
    let block = Block::default()
        .title(Span::styled(title.to_string(), focused_style(focused)))
        .borders(Borders::TOP);
    let items = state.list_items(list);
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                empty.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let style = if focused && i == state.list_cursor() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(tag.clone(), style))
        })
        .collect();
    frame.render_widget(List::new(rows).block(block), area);
}
