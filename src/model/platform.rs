use std::fmt;

use serde::{Deserialize, Serialize};

/// Chat platform a channel lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Line,
    Discord,
}

static ALL_PLATFORMS: &[Platform] = &[Platform::Line, Platform::Discord];

impl Platform {
    /// Returns the numeric platform code the backend expects.
    pub fn code(&self) -> u8 {
        match self {
            Platform::Line => 1,
            Platform::Discord => 2,
        }
    }

    /// Returns all platforms.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

#[mutants::skip]
impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Line => f.write_str("LINE"),
            Platform::Discord => f.write_str("Discord"),
        }
    }
}
