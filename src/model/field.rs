//! Editable form fields and their derived validity.

use super::content_type::ContentType;
use super::validation::{
    ValidationError, fill_percent, reverse_flag, validate_channel_token, validate_content,
};

/// Visual validity state of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Not edited yet, or waiting for a remote verdict.
    #[default]
    Unset,
    Valid,
    Invalid,
}

/// The constraint a [`TextField`] is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Length-capped content of the given type.
    Content(ContentType),
    /// A channel token whose existence must be confirmed remotely.
    ChannelToken,
}

/// A free-text field with a length cap.
///
/// Validity is never stored: it is derived from the value, the `touched`
/// flag and the last remote verdict for the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_len: usize,
    touched: bool,
    remote: Option<bool>,
}

impl TextField {
    /// Creates an empty, untouched field.
    pub fn new(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len,
            touched: false,
            remote: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of characters in the value.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the value. Any remote verdict is dropped.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.remote = None;
    }

    /// Appends a character. Any remote verdict is dropped.
    pub fn push(&mut self, ch: char) {
        self.value.push(ch);
        self.remote = None;
    }

    /// Removes the last character. Any remote verdict is dropped.
    pub fn pop(&mut self) {
        if self.value.pop().is_some() {
            self.remote = None;
        }
    }

    /// Empties the field and returns it to the untouched state.
    pub fn clear(&mut self) {
        self.value.clear();
        self.touched = false;
        self.remote = None;
    }

    /// Marks the field as edited so its validity is shown.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Last remote verdict for the current value.
    pub fn remote(&self) -> Option<bool> {
        self.remote
    }

    pub fn set_remote(&mut self, verdict: Option<bool>) {
        self.remote = verdict;
    }

    /// Percentage of the length cap in use. Exceeds 100 when over the cap.
    pub fn percent(&self) -> f64 {
        fill_percent(&self.value, self.max_len)
    }

    pub fn over_limit(&self) -> bool {
        self.percent() > 100.0
    }

    /// Checks the value against `rule`, ignoring remote verdicts.
    pub fn check(&self, rule: FieldRule) -> Result<(), ValidationError> {
        match rule {
            FieldRule::Content(content_type) => {
                validate_content(content_type, &self.value, self.max_len)
            }
            FieldRule::ChannelToken => validate_channel_token(&self.value),
        }
    }

    /// Validity as if the field had been touched.
    pub fn evaluate(&self, rule: FieldRule) -> Validity {
        if self.check(rule).is_err() || self.remote == Some(false) {
            return Validity::Invalid;
        }
        match (rule, self.remote) {
            (FieldRule::ChannelToken, None) => Validity::Unset,
            _ => Validity::Valid,
        }
    }

    /// Validity shown to the user: `Unset` until the field is touched.
    pub fn validity(&self, rule: FieldRule) -> Validity {
        if self.touched {
            self.evaluate(rule)
        } else {
            Validity::Unset
        }
    }

    /// Message explaining why the field is invalid, if it is.
    pub fn error(&self, rule: FieldRule) -> Option<String> {
        if self.validity(rule) != Validity::Invalid {
            return None;
        }
        match self.check(rule) {
            Err(e) => Some(e.to_string()),
            Ok(()) => Some(match rule {
                FieldRule::ChannelToken => "channel not found".to_string(),
                FieldRule::Content(_) => "rejected by server".to_string(),
            }),
        }
    }
}

/// A `"0"`/`"1"` property flag, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue(String);

impl FlagValue {
    pub fn off() -> Self {
        Self("0".to_string())
    }

    pub fn is_on(&self) -> bool {
        self.0 == "1"
    }

    pub fn toggle(&mut self) {
        self.0 = reverse_flag(&self.0).to_string();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FlagValue {
    fn default() -> Self {
        Self::off()
    }
}
