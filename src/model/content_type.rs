use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of content carried by an auto-reply keyword or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    LineSticker,
}

static ALL_CONTENT_TYPES: &[ContentType] = &[
    ContentType::Text,
    ContentType::Image,
    ContentType::LineSticker,
];

/// Images cannot be used as a keyword.
static KEYWORD_CONTENT_TYPES: &[ContentType] = &[ContentType::Text, ContentType::LineSticker];

impl ContentType {
    /// Returns the numeric code the backend expects.
    pub fn code(&self) -> u8 {
        match self {
            ContentType::Text => 0,
            ContentType::Image => 1,
            ContentType::LineSticker => 2,
        }
    }

    /// Returns all content types, usable for responses.
    pub fn all() -> &'static [ContentType] {
        ALL_CONTENT_TYPES
    }

    /// Returns the content types usable for a keyword.
    pub fn keyword_types() -> &'static [ContentType] {
        KEYWORD_CONTENT_TYPES
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "Text",
            ContentType::Image => "Image",
            ContentType::LineSticker => "LINE Sticker",
        }
    }
}

#[mutants::skip]
impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
