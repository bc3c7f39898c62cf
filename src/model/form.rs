//! The auto-reply registration form and its aggregate validity.

use std::fmt;

use chrono::{DateTime, Local};
use thiserror::Error;

use super::content_type::ContentType;
use super::field::{FieldRule, FlagValue, TextField, Validity};
use super::mode::SubmissionMode;
use super::platform::Platform;
use super::request::{
    Content, ExistenceCheck, MemberChannel, SubmitReply, SubmitRequest, SubmitTarget,
};
use super::tags::{PopularTags, TagSearch, TagSelection};
use super::validation::ValidationError;

/// Longest channel token accepted by the token field.
const CHANNEL_TOKEN_MAX_LEN: usize = 128;

/// Identifies one editable text field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Keyword,
    /// Response slot, zero-based.
    Response(usize),
    ChannelToken,
}

/// Limits the form is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLimits {
    pub max_content_length: usize,
    pub max_responses: usize,
    pub tag_splitter: String,
    pub max_cooldown_secs: u32,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            max_content_length: 2000,
            max_responses: 5,
            tag_splitter: "|".to_string(),
            max_cooldown_secs: 3600,
        }
    }
}

/// Banner shown after a submission attempt or a failed remote check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation blocked the submission.
    InputFailed,
    Succeeded,
    /// The backend rejected the request or could not be reached.
    Failed,
    /// A remote existence or permission check could not complete.
    CheckFailed,
}

impl fmt::Display for SubmitOutcome {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SubmitOutcome::InputFailed => "Please fix the highlighted fields",
            SubmitOutcome::Succeeded => "Auto-reply registered",
            SubmitOutcome::Failed => "Registration failed",
            SubmitOutcome::CheckFailed => "Remote check failed",
        };
        f.write_str(text)
    }
}

/// Why [`FormState::begin_submit`] refused to produce a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in progress")]
    AlreadyPending,
    #[error("some fields are invalid")]
    InvalidInput,
    /// The channel token has no existence verdict yet; run this check first.
    #[error("the channel token has not been checked yet")]
    AwaitingCheck(ExistenceCheck),
}

/// One response slot: its text field and declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSlot {
    pub field: TextField,
    pub content_type: ContentType,
}

/// Complete state of the registration form for one session.
#[derive(Debug, Clone)]
pub struct FormState {
    limits: FormLimits,
    mode: SubmissionMode,
    keyword: TextField,
    keyword_type: ContentType,
    responses: Vec<ResponseSlot>,
    response_count: usize,
    platform: Platform,
    channel_token: TextField,
    member_channels: Vec<MemberChannel>,
    member_selection: Option<usize>,
    pinned_access: bool,
    private: FlagValue,
    pinned: FlagValue,
    cooldown_secs: u32,
    tags: TagSelection,
    tag_search: TagSearch,
    popular_tags: PopularTags,
    pending: bool,
    outcome: Option<SubmitOutcome>,
    execode: Option<String>,
    last_submission: Option<DateTime<Local>>,
}

impl FormState {
    /// Creates an empty form with one visible response slot.
    pub fn new(limits: FormLimits, mode: SubmissionMode) -> Self {
        let max_responses = limits.max_responses.max(1);
        let responses = (0..max_responses)
            .map(|_| ResponseSlot {
                field: TextField::new(limits.max_content_length),
                content_type: ContentType::Text,
            })
            .collect();
        Self {
            keyword: TextField::new(limits.max_content_length),
            keyword_type: ContentType::Text,
            responses,
            response_count: 1,
            platform: Platform::default(),
            channel_token: TextField::new(CHANNEL_TOKEN_MAX_LEN),
            member_channels: Vec::new(),
            member_selection: None,
            pinned_access: false,
            private: FlagValue::off(),
            pinned: FlagValue::off(),
            cooldown_secs: 0,
            tags: TagSelection::default(),
            tag_search: TagSearch::default(),
            popular_tags: PopularTags::default(),
            pending: false,
            outcome: None,
            execode: None,
            last_submission: None,
            mode,
            limits,
        }
    }

    // --- accessors ---

    pub fn limits(&self) -> &FormLimits {
        &self.limits
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// Returns the field for `id`, or `None` for an inactive response slot.
    pub fn field(&self, id: FieldId) -> Option<&TextField> {
        match id {
            FieldId::Keyword => Some(&self.keyword),
            FieldId::Response(i) if i < self.response_count => {
                self.responses.get(i).map(|slot| &slot.field)
            }
            FieldId::Response(_) => None,
            FieldId::ChannelToken => Some(&self.channel_token),
        }
    }

    /// Mutable access for editing. Callers follow up with
    /// [`on_field_changed`](Self::on_field_changed).
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut TextField> {
        match id {
            FieldId::Keyword => Some(&mut self.keyword),
            FieldId::Response(i) if i < self.response_count => {
                self.responses.get_mut(i).map(|slot| &mut slot.field)
            }
            FieldId::Response(_) => None,
            FieldId::ChannelToken => Some(&mut self.channel_token),
        }
    }

    /// The rule `id` is validated against.
    pub fn rule(&self, id: FieldId) -> FieldRule {
        match id {
            FieldId::Keyword => FieldRule::Content(self.keyword_type),
            FieldId::Response(i) => FieldRule::Content(
                self.responses
                    .get(i)
                    .map(|slot| slot.content_type)
                    .unwrap_or_default(),
            ),
            FieldId::ChannelToken => FieldRule::ChannelToken,
        }
    }

    /// Displayed validity of `id`.
    pub fn validity(&self, id: FieldId) -> Validity {
        self.field(id)
            .map(|f| f.validity(self.rule(id)))
            .unwrap_or_default()
    }

    /// Error message for `id`, when invalid.
    pub fn error(&self, id: FieldId) -> Option<String> {
        self.field(id).and_then(|f| f.error(self.rule(id)))
    }

    /// Content type of a keyword or response field.
    pub fn content_type(&self, id: FieldId) -> Option<ContentType> {
        match id {
            FieldId::Keyword => Some(self.keyword_type),
            FieldId::Response(i) => self.responses.get(i).map(|slot| slot.content_type),
            FieldId::ChannelToken => None,
        }
    }

    pub fn response_count(&self) -> usize {
        self.response_count
    }

    pub fn can_add_response(&self) -> bool {
        self.response_count < self.responses.len()
    }

    pub fn can_remove_response(&self) -> bool {
        self.response_count > 1
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn member_channels(&self) -> &[MemberChannel] {
        &self.member_channels
    }

    /// The selected member channel, if any.
    pub fn selected_member(&self) -> Option<&MemberChannel> {
        self.member_selection
            .and_then(|i| self.member_channels.get(i))
    }

    pub fn member_selection(&self) -> Option<usize> {
        self.member_selection
    }

    pub fn pinned_access(&self) -> bool {
        self.pinned_access
    }

    pub fn private(&self) -> &FlagValue {
        &self.private
    }

    pub fn pinned(&self) -> &FlagValue {
        &self.pinned
    }

    pub fn cooldown_secs(&self) -> u32 {
        self.cooldown_secs
    }

    pub fn tags(&self) -> &TagSelection {
        &self.tags
    }

    pub fn tag_search(&self) -> &TagSearch {
        &self.tag_search
    }

    pub fn popular_tags(&self) -> &PopularTags {
        &self.popular_tags
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn outcome(&self) -> Option<&SubmitOutcome> {
        self.outcome.as_ref()
    }

    /// Execode issued by the last successful execode registration.
    pub fn execode(&self) -> Option<&str> {
        self.execode.as_deref()
    }

    pub fn last_submission(&self) -> Option<DateTime<Local>> {
        self.last_submission
    }

    // --- validity aggregation ---

    /// Fields that must be valid for the active mode.
    pub fn required_fields(&self) -> Vec<FieldId> {
        let mut fields = vec![FieldId::Keyword];
        fields.extend((0..self.response_count).map(FieldId::Response));
        if self.mode == SubmissionMode::Channel {
            fields.push(FieldId::ChannelToken);
        }
        fields
    }

    fn all_required_valid(&self) -> bool {
        let fields_ok = self.required_fields().into_iter().all(|id| {
            self.field(id)
                .is_some_and(|f| f.evaluate(self.rule(id)) == Validity::Valid)
        });
        let target_ok = match self.mode {
            SubmissionMode::Member => self.selected_member().is_some(),
            _ => true,
        };
        fields_ok && target_ok
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.pending && self.all_required_valid()
    }

    /// Re-validates `id` after an edit or blur and returns its validity.
    pub fn on_field_changed(&mut self, id: FieldId) -> Validity {
        if let Some(field) = self.field_mut(id) {
            field.touch();
        }
        self.validity(id)
    }

    // --- mode and remote checks ---

    /// Switches the active mode.
    ///
    /// Leaving member mode revokes pinned access. Entering channel mode with
    /// an unchecked token returns the existence check to run.
    pub fn on_mode_selected(&mut self, mode: SubmissionMode) -> Option<ExistenceCheck> {
        if self.mode == SubmissionMode::Member && mode != SubmissionMode::Member {
            self.set_pinned_access(false);
        }
        self.mode = mode;
        if mode == SubmissionMode::Channel
            && !self.channel_token.is_empty()
            && self.channel_token.remote().is_none()
        {
            return self.request_existence_check();
        }
        None
    }

    /// Builds an existence check for the current channel token.
    ///
    /// A malformed token is marked invalid and no request is produced.
    pub fn request_existence_check(&mut self) -> Option<ExistenceCheck> {
        self.channel_token.touch();
        if self.channel_token.check(FieldRule::ChannelToken).is_err() {
            return None;
        }
        Some(ExistenceCheck {
            platform: self.platform,
            token: self.channel_token.value().to_string(),
        })
    }

    /// Applies the result of an existence check for `token`.
    ///
    /// Results for a token that has since been edited are discarded. A failed
    /// lookup leaves the field invalid and raises the check failure banner.
    pub fn apply_existence(&mut self, token: &str, result: Result<bool, String>) {
        if self.channel_token.value() != token {
            return;
        }
        self.channel_token.touch();
        match result {
            Ok(exists) => self.channel_token.set_remote(Some(exists)),
            Err(_) => {
                self.channel_token.set_remote(Some(false));
                self.outcome = Some(SubmitOutcome::CheckFailed);
            }
        }
    }

    /// Applies a remote content verdict for `id`, if its value is unchanged.
    pub fn apply_content_verdict(
        &mut self,
        id: FieldId,
        value: &str,
        result: Result<bool, String>,
    ) {
        let Some(field) = self.field_mut(id) else {
            return;
        };
        if field.value() != value {
            return;
        }
        field.set_remote(Some(matches!(result, Ok(true))));
    }

    pub fn cycle_platform(&mut self, forward: bool) {
        self.platform = cycle(Platform::all(), self.platform, forward);
        self.channel_token.set_remote(None);
    }

    /// Cycles the content type of a keyword or response field.
    ///
    /// Keywords only cycle through keyword-capable types.
    pub fn cycle_content_type(&mut self, id: FieldId, forward: bool) {
        match id {
            FieldId::Keyword => {
                self.keyword_type = cycle(ContentType::keyword_types(), self.keyword_type, forward);
                self.keyword.set_remote(None);
            }
            FieldId::Response(i) if i < self.response_count => {
                if let Some(slot) = self.responses.get_mut(i) {
                    slot.content_type = cycle(ContentType::all(), slot.content_type, forward);
                    slot.field.set_remote(None);
                }
            }
            _ => {}
        }
    }

    // --- response slots ---

    /// Shows the next response slot. Returns `false` at the limit.
    pub fn add_response_slot(&mut self) -> bool {
        if !self.can_add_response() {
            return false;
        }
        self.response_count += 1;
        true
    }

    /// Hides and clears the last response slot. Returns `false` at one slot.
    pub fn remove_response_slot(&mut self) -> bool {
        if !self.can_remove_response() {
            return false;
        }
        self.response_count -= 1;
        if let Some(slot) = self.responses.get_mut(self.response_count) {
            slot.field.clear();
            slot.content_type = ContentType::Text;
        }
        true
    }

    // --- member channels and properties ---

    /// Replaces the member channel list and clears the selection.
    pub fn set_member_channels(&mut self, channels: Vec<MemberChannel>) {
        self.member_channels = channels;
        self.select_member_channel(None);
    }

    /// Selects a member channel by index, or the default (none).
    ///
    /// Returns the channel id whose pinned access should be checked.
    pub fn select_member_channel(&mut self, index: Option<usize>) -> Option<String> {
        self.member_selection = index.filter(|i| *i < self.member_channels.len());
        self.set_pinned_access(false);
        self.selected_member().map(|c| c.id.clone())
    }

    /// Moves the member selection, wrapping through the default entry.
    pub fn cycle_member_channel(&mut self, forward: bool) -> Option<String> {
        let slots = self.member_channels.len() + 1;
        let current = self.member_selection.map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.select_member_channel(next.checked_sub(1))
    }

    /// Applies a pinned access check for `channel_id`.
    pub fn apply_pinned_access(&mut self, channel_id: &str, result: Result<bool, String>) {
        if self.selected_member().map(|c| c.id.as_str()) != Some(channel_id) {
            return;
        }
        match result {
            Ok(granted) => self.set_pinned_access(granted),
            Err(_) => {
                self.set_pinned_access(false);
                self.outcome = Some(SubmitOutcome::CheckFailed);
            }
        }
    }

    fn set_pinned_access(&mut self, granted: bool) {
        self.pinned_access = granted;
        if !granted {
            self.pinned = FlagValue::off();
        }
    }

    pub fn toggle_private(&mut self) {
        self.private.toggle();
    }

    /// Toggles the pinned flag. Does nothing without pinned access.
    pub fn toggle_pinned(&mut self) -> bool {
        if !self.pinned_access {
            return false;
        }
        self.pinned.toggle();
        true
    }

    /// Adjusts the cooldown, clamped to `0..=max_cooldown_secs`.
    pub fn adjust_cooldown(&mut self, delta: i64) {
        let next = (self.cooldown_secs as i64 + delta).clamp(0, self.limits.max_cooldown_secs as i64);
        self.cooldown_secs = next as u32;
    }

    /// Sets the cooldown, clamped to `max_cooldown_secs`.
    pub fn set_cooldown(&mut self, secs: u32) {
        self.cooldown_secs = secs.min(self.limits.max_cooldown_secs);
    }

    // --- tags ---

    pub fn tags_mut(&mut self) -> &mut TagSelection {
        &mut self.tags
    }

    pub fn tag_search_mut(&mut self) -> &mut TagSearch {
        &mut self.tag_search
    }

    /// Starts a tag search using the configured splitter.
    pub fn begin_tag_search(&mut self, keyword: &str) -> Result<bool, ValidationError> {
        self.tag_search.begin(keyword, &self.limits.tag_splitter)
    }

    pub fn set_popular_tags(&mut self, popular: PopularTags) {
        self.popular_tags = popular;
    }

    // --- submission ---

    /// Validates every required field and, if all pass, locks the form and
    /// returns the request to send.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitBlocked> {
        if self.pending {
            return Err(SubmitBlocked::AlreadyPending);
        }
        self.last_submission = Some(Local::now());
        for id in self.required_fields() {
            self.on_field_changed(id);
        }
        if !self.all_required_valid() {
            let others_valid = self
                .required_fields()
                .into_iter()
                .filter(|id| *id != FieldId::ChannelToken)
                .all(|id| self.validity(id) == Validity::Valid);
            self.outcome = (!others_valid).then_some(SubmitOutcome::InputFailed);
            return match self.unchecked_token() {
                Some(check) => Err(SubmitBlocked::AwaitingCheck(check)),
                None => {
                    self.outcome = Some(SubmitOutcome::InputFailed);
                    Err(SubmitBlocked::InvalidInput)
                }
            };
        }

        let target = match self.mode {
            SubmissionMode::Execode => SubmitTarget::Execode,
            SubmissionMode::Channel => SubmitTarget::Channel {
                platform: self.platform,
                token: self.channel_token.value().to_string(),
            },
            SubmissionMode::Member => match self.selected_member() {
                Some(channel) => SubmitTarget::Member {
                    channel_id: channel.id.clone(),
                },
                None => {
                    self.outcome = Some(SubmitOutcome::InputFailed);
                    return Err(SubmitBlocked::InvalidInput);
                }
            },
        };

        let request = SubmitRequest {
            target,
            keyword: Content {
                text: self.keyword.value().to_string(),
                content_type: self.keyword_type,
            },
            responses: self.responses[..self.response_count]
                .iter()
                .map(|slot| Content {
                    text: slot.field.value().to_string(),
                    content_type: slot.content_type,
                })
                .collect(),
            private: self.private.as_str().to_string(),
            pinned: self.pinned.as_str().to_string(),
            cooldown_secs: self.cooldown_secs,
            tags: self.tags.joined(&self.limits.tag_splitter),
        };

        self.pending = true;
        self.outcome = None;
        Ok(request)
    }

    /// Existence check for a well-formed channel token still lacking a verdict.
    fn unchecked_token(&mut self) -> Option<ExistenceCheck> {
        if self.mode != SubmissionMode::Channel || self.channel_token.remote().is_some() {
            return None;
        }
        self.request_existence_check()
    }

    /// Unlocks the form after the backend answered (or failed to).
    pub fn finish_submit(&mut self, result: Result<SubmitReply, String>) {
        self.pending = false;
        match result {
            Ok(reply) if reply.success => {
                self.execode = reply.execode;
                self.reset();
                self.outcome = Some(SubmitOutcome::Succeeded);
            }
            _ => {
                self.execode = None;
                self.outcome = Some(SubmitOutcome::Failed);
            }
        }
    }

    /// Clears keyword and response content after a successful submission.
    ///
    /// Mode, target, properties and tags are kept for the next module.
    pub fn reset(&mut self) {
        self.keyword.clear();
        for slot in &mut self.responses {
            slot.field.clear();
        }
        self.outcome = None;
    }
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> FormLimits {
        FormLimits {
            max_content_length: 5,
            max_responses: 3,
            tag_splitter: "|".into(),
            max_cooldown_secs: 60,
        }
    }

    fn type_into(form: &mut FormState, id: FieldId, text: &str) {
        let field = form.field_mut(id).unwrap();
        for ch in text.chars() {
            field.push(ch);
        }
        form.on_field_changed(id);
    }

    fn channels() -> Vec<MemberChannel> {
        vec![
            MemberChannel {
                id: "c1".into(),
                name: "Friends".into(),
                platform: Platform::Line,
                token: "U1".into(),
            },
            MemberChannel {
                id: "c2".into(),
                name: "Work".into(),
                platform: Platform::Discord,
                token: "D2".into(),
            },
        ]
    }

    fn filled(mode: SubmissionMode) -> FormState {
        let mut form = FormState::new(limits(), mode);
        type_into(&mut form, FieldId::Keyword, "hi");
        type_into(&mut form, FieldId::Response(0), "hello");
        form
    }

    mod field_changes {
        use super::*;

        #[test]
        fn over_cap_marks_invalid() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            type_into(&mut form, FieldId::Keyword, "abcdef");
            assert_eq!(form.validity(FieldId::Keyword), Validity::Invalid);
            assert!(form.field(FieldId::Keyword).unwrap().percent() > 100.0);
            assert!(!form.can_submit());
        }

        #[test]
        fn untouched_fields_are_unset() {
            let form = FormState::new(limits(), SubmissionMode::Execode);
            assert_eq!(form.validity(FieldId::Keyword), Validity::Unset);
            assert!(!form.can_submit());
        }

        #[test]
        fn valid_fields_enable_submit() {
            let form = filled(SubmissionMode::Execode);
            assert_eq!(form.validity(FieldId::Keyword), Validity::Valid);
            assert!(form.can_submit());
        }

        #[test]
        fn inactive_response_slot_has_no_field() {
            let form = FormState::new(limits(), SubmissionMode::Execode);
            assert!(form.field(FieldId::Response(1)).is_none());
            assert_eq!(form.validity(FieldId::Response(1)), Validity::Unset);
        }

        #[test]
        fn content_type_change_revalidates() {
            let mut form = filled(SubmissionMode::Execode);
            form.cycle_content_type(FieldId::Response(0), true);
            assert_eq!(
                form.content_type(FieldId::Response(0)),
                Some(ContentType::Image)
            );
            assert_eq!(form.validity(FieldId::Response(0)), Validity::Invalid);
            assert!(!form.can_submit());
        }

        #[test]
        fn keyword_type_skips_image() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            form.cycle_content_type(FieldId::Keyword, true);
            assert_eq!(
                form.content_type(FieldId::Keyword),
                Some(ContentType::LineSticker)
            );
            form.cycle_content_type(FieldId::Keyword, true);
            assert_eq!(form.content_type(FieldId::Keyword), Some(ContentType::Text));
        }

        #[test]
        fn remote_content_verdict_applies_to_current_value() {
            let mut form = filled(SubmissionMode::Execode);
            form.apply_content_verdict(FieldId::Keyword, "hi", Ok(false));
            assert_eq!(form.validity(FieldId::Keyword), Validity::Invalid);
        }

        #[test]
        fn stale_content_verdict_ignored() {
            let mut form = filled(SubmissionMode::Execode);
            form.apply_content_verdict(FieldId::Keyword, "old", Ok(false));
            assert_eq!(form.validity(FieldId::Keyword), Validity::Valid);
        }

        #[test]
        fn failed_content_check_leaves_field_invalid() {
            let mut form = filled(SubmissionMode::Execode);
            form.apply_content_verdict(FieldId::Keyword, "hi", Err("timeout".into()));
            assert_eq!(form.validity(FieldId::Keyword), Validity::Invalid);
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn channel_mode_requires_token() {
            let mut form = filled(SubmissionMode::Execode);
            assert!(form.can_submit());
            assert_eq!(form.on_mode_selected(SubmissionMode::Channel), None);
            assert!(form.required_fields().contains(&FieldId::ChannelToken));
            assert!(!form.can_submit());
        }

        #[test]
        fn entering_channel_mode_with_token_requests_check() {
            let mut form = filled(SubmissionMode::Execode);
            type_into(&mut form, FieldId::ChannelToken, "C123");
            let check = form.on_mode_selected(SubmissionMode::Channel);
            assert_eq!(
                check,
                Some(ExistenceCheck {
                    platform: Platform::Line,
                    token: "C123".into(),
                })
            );
        }

        #[test]
        fn missing_channel_disables_submit_and_marks_invalid() {
            let mut form = filled(SubmissionMode::Execode);
            form.on_mode_selected(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C404");
            let check = form.request_existence_check().unwrap();
            form.apply_existence(&check.token, Ok(false));
            assert_eq!(form.validity(FieldId::ChannelToken), Validity::Invalid);
            assert!(!form.can_submit());
        }

        #[test]
        fn existing_channel_enables_submit() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C200");
            form.apply_existence("C200", Ok(true));
            assert_eq!(form.validity(FieldId::ChannelToken), Validity::Valid);
            assert!(form.can_submit());
        }

        #[test]
        fn existence_failure_is_invalid_with_banner() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C200");
            form.apply_existence("C200", Err("connection refused".into()));
            assert_eq!(form.validity(FieldId::ChannelToken), Validity::Invalid);
            assert_eq!(form.outcome(), Some(&SubmitOutcome::CheckFailed));
        }

        #[test]
        fn stale_existence_result_discarded() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C200");
            form.apply_existence("C20", Ok(true));
            assert_eq!(form.field(FieldId::ChannelToken).unwrap().remote(), None);
        }

        #[test]
        fn malformed_token_produces_no_check() {
            let mut form = filled(SubmissionMode::Channel);
            assert_eq!(form.request_existence_check(), None);
            assert_eq!(form.validity(FieldId::ChannelToken), Validity::Invalid);
        }

        #[test]
        fn platform_change_drops_verdict() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C200");
            form.apply_existence("C200", Ok(true));
            form.cycle_platform(true);
            assert_eq!(form.platform(), Platform::Discord);
            assert!(!form.can_submit());
        }

        #[test]
        fn member_mode_requires_selection() {
            let mut form = filled(SubmissionMode::Member);
            form.set_member_channels(channels());
            assert!(!form.can_submit());
            assert_eq!(form.select_member_channel(Some(1)), Some("c2".into()));
            assert!(form.can_submit());
        }

        #[test]
        fn leaving_member_mode_revokes_pinned() {
            let mut form = filled(SubmissionMode::Member);
            form.set_member_channels(channels());
            form.select_member_channel(Some(0));
            form.apply_pinned_access("c1", Ok(true));
            assert!(form.toggle_pinned());
            assert!(form.pinned().is_on());

            form.on_mode_selected(SubmissionMode::Execode);
            assert!(!form.pinned_access());
            assert!(!form.pinned().is_on());
        }
    }

    mod members {
        use super::*;

        #[test]
        fn default_selection_disables_pinned() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            form.set_member_channels(channels());
            form.select_member_channel(Some(0));
            form.apply_pinned_access("c1", Ok(true));
            form.toggle_pinned();
            assert_eq!(form.select_member_channel(None), None);
            assert!(!form.pinned_access());
            assert!(!form.pinned().is_on());
        }

        #[test]
        fn pinned_toggle_needs_access() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            assert!(!form.toggle_pinned());
            assert!(!form.pinned().is_on());
        }

        #[test]
        fn stale_pinned_access_ignored() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            form.set_member_channels(channels());
            form.select_member_channel(Some(1));
            form.apply_pinned_access("c1", Ok(true));
            assert!(!form.pinned_access());
        }

        #[test]
        fn pinned_access_failure_raises_banner() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            form.set_member_channels(channels());
            form.select_member_channel(Some(0));
            form.apply_pinned_access("c1", Err("down".into()));
            assert!(!form.pinned_access());
            assert_eq!(form.outcome(), Some(&SubmitOutcome::CheckFailed));
        }

        #[test]
        fn cycle_wraps_through_default() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            form.set_member_channels(channels());
            assert_eq!(form.cycle_member_channel(true), Some("c1".into()));
            assert_eq!(form.cycle_member_channel(true), Some("c2".into()));
            assert_eq!(form.cycle_member_channel(true), None);
            assert_eq!(form.cycle_member_channel(false), Some("c2".into()));
        }

        #[test]
        fn out_of_range_selection_is_default() {
            let mut form = FormState::new(limits(), SubmissionMode::Member);
            form.set_member_channels(channels());
            assert_eq!(form.select_member_channel(Some(9)), None);
            assert_eq!(form.member_selection(), None);
        }
    }

    mod responses {
        use super::*;

        #[test]
        fn add_up_to_limit() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            assert!(form.add_response_slot());
            assert!(form.add_response_slot());
            assert!(!form.add_response_slot());
            assert_eq!(form.response_count(), 3);
            assert!(!form.can_add_response());
        }

        #[test]
        fn remove_down_to_one() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            assert!(!form.remove_response_slot());
            form.add_response_slot();
            assert!(form.remove_response_slot());
            assert_eq!(form.response_count(), 1);
        }

        #[test]
        fn added_slot_is_required() {
            let mut form = filled(SubmissionMode::Execode);
            form.add_response_slot();
            assert!(form.required_fields().contains(&FieldId::Response(1)));
            assert!(!form.can_submit());
        }

        #[test]
        fn removed_slot_is_cleared() {
            let mut form = filled(SubmissionMode::Execode);
            form.add_response_slot();
            type_into(&mut form, FieldId::Response(1), "bye");
            form.remove_response_slot();
            form.add_response_slot();
            assert_eq!(form.field(FieldId::Response(1)).unwrap().value(), "");
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn private_toggles() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            form.toggle_private();
            assert!(form.private().is_on());
            form.toggle_private();
            assert!(!form.private().is_on());
        }

        #[test]
        fn cooldown_clamped() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            form.adjust_cooldown(-10);
            assert_eq!(form.cooldown_secs(), 0);
            form.adjust_cooldown(45);
            assert_eq!(form.cooldown_secs(), 45);
            form.adjust_cooldown(100);
            assert_eq!(form.cooldown_secs(), 60);
        }

        #[test]
        fn set_cooldown_clamped() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            form.set_cooldown(30);
            assert_eq!(form.cooldown_secs(), 30);
            form.set_cooldown(600);
            assert_eq!(form.cooldown_secs(), 60);
        }

        #[test]
        fn tag_search_uses_configured_splitter() {
            let mut form = FormState::new(
                FormLimits {
                    tag_splitter: ",".into(),
                    ..limits()
                },
                SubmissionMode::Execode,
            );
            assert_eq!(
                form.begin_tag_search("a,b"),
                Err(ValidationError::TagKeywordHasSplitter(",".into()))
            );
            assert_eq!(form.begin_tag_search("a|b"), Ok(true));
            assert_eq!(form.begin_tag_search("c"), Ok(false));
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn invalid_input_blocks_and_flags() {
            let mut form = FormState::new(limits(), SubmissionMode::Execode);
            assert_eq!(form.begin_submit(), Err(SubmitBlocked::InvalidInput));
            assert_eq!(form.outcome(), Some(&SubmitOutcome::InputFailed));
            assert_eq!(form.validity(FieldId::Keyword), Validity::Invalid);
            assert_eq!(form.validity(FieldId::Response(0)), Validity::Invalid);
            assert!(!form.is_pending());
            assert!(!form.can_submit());
            assert!(form.last_submission().is_some());
        }

        #[test]
        fn unchecked_token_asks_for_check() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C100");
            assert_eq!(
                form.begin_submit(),
                Err(SubmitBlocked::AwaitingCheck(ExistenceCheck {
                    platform: Platform::Line,
                    token: "C100".into(),
                }))
            );
            assert_eq!(form.outcome(), None);
            assert!(!form.is_pending());

            form.apply_existence("C100", Ok(true));
            assert!(form.begin_submit().is_ok());
        }

        #[test]
        fn unchecked_token_with_invalid_content_flags_both() {
            let mut form = FormState::new(limits(), SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C100");
            assert!(matches!(
                form.begin_submit(),
                Err(SubmitBlocked::AwaitingCheck(_))
            ));
            assert_eq!(form.outcome(), Some(&SubmitOutcome::InputFailed));
            assert_eq!(form.validity(FieldId::Keyword), Validity::Invalid);
        }

        #[test]
        fn malformed_token_is_invalid_input() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C 100");
            assert_eq!(form.begin_submit(), Err(SubmitBlocked::InvalidInput));
            assert_eq!(form.validity(FieldId::ChannelToken), Validity::Invalid);
        }

        #[test]
        fn valid_submit_locks_form() {
            let mut form = filled(SubmissionMode::Execode);
            let request = form.begin_submit().unwrap();
            assert_eq!(request.target, SubmitTarget::Execode);
            assert_eq!(request.keyword.text, "hi");
            assert_eq!(request.responses.len(), 1);
            assert!(form.is_pending());
            assert!(!form.can_submit());
            assert!(form.last_submission().is_some());
        }

        #[test]
        fn double_submit_refused() {
            let mut form = filled(SubmissionMode::Execode);
            form.begin_submit().unwrap();
            assert_eq!(form.begin_submit(), Err(SubmitBlocked::AlreadyPending));
        }

        #[test]
        fn success_unlocks_and_resets() {
            let mut form = filled(SubmissionMode::Execode);
            form.tags_mut().add("greet");
            form.begin_submit().unwrap();
            form.finish_submit(Ok(SubmitReply {
                success: true,
                execode: Some("XC-1".into()),
            }));
            assert!(!form.is_pending());
            assert_eq!(form.outcome(), Some(&SubmitOutcome::Succeeded));
            assert_eq!(form.execode(), Some("XC-1"));
            assert_eq!(form.field(FieldId::Keyword).unwrap().value(), "");
            assert_eq!(form.validity(FieldId::Keyword), Validity::Unset);
            assert_eq!(form.tags().len(), 1);
        }

        #[test]
        fn rejection_unlocks_and_keeps_content() {
            let mut form = filled(SubmissionMode::Execode);
            form.begin_submit().unwrap();
            form.finish_submit(Ok(SubmitReply {
                success: false,
                execode: None,
            }));
            assert!(!form.is_pending());
            assert_eq!(form.outcome(), Some(&SubmitOutcome::Failed));
            assert_eq!(form.field(FieldId::Keyword).unwrap().value(), "hi");
            assert!(form.can_submit());
        }

        #[test]
        fn network_failure_unlocks_and_clears_execode() {
            let mut form = filled(SubmissionMode::Execode);
            form.begin_submit().unwrap();
            form.finish_submit(Ok(SubmitReply {
                success: true,
                execode: Some("XC-1".into()),
            }));
            type_into(&mut form, FieldId::Keyword, "hi");
            type_into(&mut form, FieldId::Response(0), "yo");
            form.begin_submit().unwrap();
            form.finish_submit(Err("connection reset".into()));
            assert!(!form.is_pending());
            assert_eq!(form.execode(), None);
            assert_eq!(form.outcome(), Some(&SubmitOutcome::Failed));
        }

        #[test]
        fn channel_request_carries_target() {
            let mut form = filled(SubmissionMode::Channel);
            type_into(&mut form, FieldId::ChannelToken, "C200");
            form.apply_existence("C200", Ok(true));
            let request = form.begin_submit().unwrap();
            assert_eq!(
                request.target,
                SubmitTarget::Channel {
                    platform: Platform::Line,
                    token: "C200".into(),
                }
            );
        }

        #[test]
        fn member_request_carries_channel_id_and_tags() {
            let mut form = filled(SubmissionMode::Member);
            form.set_member_channels(channels());
            form.select_member_channel(Some(0));
            form.tags_mut().add("a");
            form.tags_mut().add("b");
            let request = form.begin_submit().unwrap();
            assert_eq!(
                request.target,
                SubmitTarget::Member {
                    channel_id: "c1".into()
                }
            );
            assert_eq!(request.tags, "a|b");
        }
    }
}
