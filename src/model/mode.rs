use std::fmt;

use serde::{Deserialize, Serialize};

/// Registration target for a new auto-reply module.
///
/// Each mode owns exactly one panel of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// Register on one of the signed-in user's channels.
    #[default]
    Member,
    /// Register on a channel identified by platform and token.
    Channel,
    /// Issue an execode to complete the registration from a chat.
    Execode,
}

static ALL_MODES: &[SubmissionMode] = &[
    SubmissionMode::Member,
    SubmissionMode::Channel,
    SubmissionMode::Execode,
];

impl SubmissionMode {
    /// Identifier of the panel bound to this mode.
    pub fn panel_id(&self) -> &'static str {
        match self {
            SubmissionMode::Member => "arMember",
            SubmissionMode::Channel => "arChannel",
            SubmissionMode::Execode => "arExecode",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionMode::Member => "My Channel",
            SubmissionMode::Channel => "Channel Token",
            SubmissionMode::Execode => "Execode",
        }
    }

    /// Returns all modes in tab order.
    pub fn all() -> &'static [SubmissionMode] {
        ALL_MODES
    }

    /// Position in tab order.
    pub fn index(&self) -> usize {
        ALL_MODES.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Whether the panel for `panel` is shown while `self` is active.
    pub fn shows_panel(&self, panel: SubmissionMode) -> bool {
        *self == panel
    }
}

#[mutants::skip]
impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_ids() {
        assert_eq!(SubmissionMode::Member.panel_id(), "arMember");
        assert_eq!(SubmissionMode::Channel.panel_id(), "arChannel");
        assert_eq!(SubmissionMode::Execode.panel_id(), "arExecode");
    }

    #[test]
    fn exactly_one_panel_visible() {
        for active in SubmissionMode::all() {
            let visible: Vec<_> = SubmissionMode::all()
                .iter()
                .filter(|panel| active.shows_panel(**panel))
                .collect();
            assert_eq!(visible, vec![active]);
        }
    }

    #[test]
    fn index_follows_tab_order() {
        assert_eq!(SubmissionMode::Member.index(), 0);
        assert_eq!(SubmissionMode::Channel.index(), 1);
        assert_eq!(SubmissionMode::Execode.index(), 2);
    }

    #[test]
    fn default_is_member() {
        assert_eq!(SubmissionMode::default(), SubmissionMode::Member);
    }

    #[test]
    fn deserializes_from_config_name() {
        let mode: SubmissionMode = serde_json::from_str("\"execode\"").unwrap();
        assert_eq!(mode, SubmissionMode::Execode);
    }
}
