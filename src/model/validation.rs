use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::content_type::ContentType;

/// Validation errors for form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("content cannot be empty")]
    EmptyContent,
    #[error("content is {len} characters, limit is {max}")]
    ContentTooLong { len: usize, max: usize },
    #[error("not an image URL: {0}")]
    InvalidImageUrl(String),
    #[error("not a sticker ID: {0}")]
    InvalidStickerId(String),
    #[error("tag keyword cannot be empty")]
    EmptyTagKeyword,
    #[error("tag keyword cannot contain {0:?}")]
    TagKeywordHasSplitter(String),
    #[error("channel token cannot be empty")]
    EmptyChannelToken,
    #[error("invalid channel token: {0}")]
    InvalidChannelToken(String),
    #[error("invalid cooldown: {0}")]
    InvalidCooldown(String),
}

static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://\S+\.(png|jpe?g)$").expect("valid hardcoded regex")
});

static STICKER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid hardcoded regex"));

/// Validates free text against a length cap: valid iff `0 < len <= max_len`.
///
/// Length is counted in Unicode scalar values of the raw value.
pub fn validate_text_content(value: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    match len {
        0 => Err(ValidationError::EmptyContent),
        n if n > max_len => Err(ValidationError::ContentTooLong { len, max: max_len }),
        _ => Ok(()),
    }
}

/// Percentage of the length cap used by `value`. Exceeds 100 when over the cap.
pub fn fill_percent(value: &str, max_len: usize) -> f64 {
    let len = value.chars().count();
    if max_len == 0 {
        return if len == 0 { 0.0 } else { 100.0 };
    }
    len as f64 / max_len as f64 * 100.0
}

/// Validates content for its declared type.
///
/// All types share the length rule; images and stickers additionally get an
/// offline format check.
pub fn validate_content(
    content_type: ContentType,
    value: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    validate_text_content(value, max_len)?;
    match content_type {
        ContentType::Text => Ok(()),
        ContentType::Image if IMAGE_URL_RE.is_match(value) => Ok(()),
        ContentType::Image => Err(ValidationError::InvalidImageUrl(value.to_string())),
        ContentType::LineSticker if STICKER_ID_RE.is_match(value) => Ok(()),
        ContentType::LineSticker => Err(ValidationError::InvalidStickerId(value.to_string())),
    }
}

/// Validates a tag search keyword: non-empty and free of the tag splitter.
pub fn validate_tag_keyword(keyword: &str, splitter: &str) -> Result<(), ValidationError> {
    if keyword.is_empty() {
        Err(ValidationError::EmptyTagKeyword)
    } else if !splitter.is_empty() && keyword.contains(splitter) {
        Err(ValidationError::TagKeywordHasSplitter(splitter.to_string()))
    } else {
        Ok(())
    }
}

/// Validates a channel token: non-empty, no whitespace.
pub fn validate_channel_token(token: &str) -> Result<(), ValidationError> {
    match token {
        "" => Err(ValidationError::EmptyChannelToken),
        s if s.chars().any(char::is_whitespace) => {
            Err(ValidationError::InvalidChannelToken(token.to_string()))
        }
        _ => Ok(()),
    }
}

/// Parses a cooldown given in whole seconds.
pub fn parse_cooldown(text: &str) -> Result<u32, ValidationError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCooldown(text.to_string()));
    }
    text.parse()
        .map_err(|_| ValidationError::InvalidCooldown(text.to_string()))
}

/// Flips a `"0"`/`"1"` flag value. Any other value is returned unchanged.
pub fn reverse_flag(value: &str) -> &str {
    match value {
        "1" => "0",
        "0" => "1",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- validate_text_content ---

    #[test]
    fn text_within_limit() {
        assert_eq!(validate_text_content("hello", 5), Ok(()));
    }

    #[test]
    fn text_empty() {
        assert_eq!(
            validate_text_content("", 5),
            Err(ValidationError::EmptyContent)
        );
    }

    #[test]
    fn text_one_over_limit() {
        assert_eq!(
            validate_text_content("abcdef", 5),
            Err(ValidationError::ContentTooLong { len: 6, max: 5 })
        );
    }

    #[test]
    fn text_counts_chars_not_bytes() {
        assert_eq!(validate_text_content("日本語", 3), Ok(()));
    }

    #[test]
    fn text_zero_limit_rejects_everything() {
        assert!(validate_text_content("a", 0).is_err());
    }

    #[quickcheck]
    fn text_validity_matches_length_rule(s: String, max: u8) -> bool {
        let max = max as usize;
        let len = s.chars().count();
        validate_text_content(&s, max).is_ok() == (1 <= len && len <= max)
    }

    // --- fill_percent ---

    #[test]
    fn percent_half() {
        assert_eq!(fill_percent("ab", 4), 50.0);
    }

    #[test]
    fn percent_over_limit() {
        assert!(fill_percent("abcdef", 5) > 100.0);
    }

    #[test]
    fn percent_empty_is_zero() {
        assert_eq!(fill_percent("", 5), 0.0);
    }

    #[test]
    fn percent_zero_limit() {
        assert_eq!(fill_percent("", 0), 0.0);
        assert_eq!(fill_percent("a", 0), 100.0);
    }

    // --- validate_content ---

    #[test]
    fn image_url_accepted() {
        assert_eq!(
            validate_content(ContentType::Image, "https://example.com/cat.PNG", 100),
            Ok(())
        );
        assert_eq!(
            validate_content(ContentType::Image, "http://example.com/a.jpeg", 100),
            Ok(())
        );
    }

    #[test]
    fn image_wrong_extension() {
        assert_eq!(
            validate_content(ContentType::Image, "https://example.com/cat.gif", 100),
            Err(ValidationError::InvalidImageUrl(
                "https://example.com/cat.gif".to_string()
            ))
        );
    }

    #[test]
    fn image_not_http() {
        assert!(validate_content(ContentType::Image, "ftp://example.com/a.png", 100).is_err());
    }

    #[test]
    fn sticker_numeric() {
        assert_eq!(
            validate_content(ContentType::LineSticker, "52002734", 100),
            Ok(())
        );
    }

    #[test]
    fn sticker_non_numeric() {
        assert_eq!(
            validate_content(ContentType::LineSticker, "sticker", 100),
            Err(ValidationError::InvalidStickerId("sticker".to_string()))
        );
    }

    #[test]
    fn length_rule_checked_before_format() {
        assert_eq!(
            validate_content(ContentType::LineSticker, "", 100),
            Err(ValidationError::EmptyContent)
        );
    }

    // --- validate_tag_keyword ---

    #[test]
    fn tag_keyword_plain() {
        assert_eq!(validate_tag_keyword("greeting", "|"), Ok(()));
    }

    #[test]
    fn tag_keyword_empty() {
        assert_eq!(
            validate_tag_keyword("", "|"),
            Err(ValidationError::EmptyTagKeyword)
        );
    }

    #[test]
    fn tag_keyword_with_splitter() {
        assert_eq!(
            validate_tag_keyword("a|b", "|"),
            Err(ValidationError::TagKeywordHasSplitter("|".to_string()))
        );
    }

    // --- validate_channel_token ---

    #[test]
    fn channel_token_simple() {
        assert_eq!(validate_channel_token("C1234567890abcdef"), Ok(()));
    }

    #[test]
    fn channel_token_empty() {
        assert_eq!(
            validate_channel_token(""),
            Err(ValidationError::EmptyChannelToken)
        );
    }

    #[test]
    fn channel_token_with_space() {
        assert_eq!(
            validate_channel_token("C12 34"),
            Err(ValidationError::InvalidChannelToken("C12 34".to_string()))
        );
    }

    // --- parse_cooldown ---

    #[test]
    fn cooldown_digits() {
        assert_eq!(parse_cooldown("30"), Ok(30));
    }

    #[test]
    fn cooldown_rejects_sign() {
        assert!(parse_cooldown("-5").is_err());
        assert!(parse_cooldown("").is_err());
    }

    #[test]
    fn cooldown_rejects_overflow() {
        assert!(parse_cooldown("99999999999").is_err());
    }

    // --- reverse_flag ---

    #[test]
    fn reverse_flag_flips() {
        assert_eq!(reverse_flag("0"), "1");
        assert_eq!(reverse_flag("1"), "0");
    }

    #[test]
    fn reverse_flag_passes_through_other_values() {
        assert_eq!(reverse_flag("yes"), "yes");
        assert_eq!(reverse_flag(""), "");
    }

    #[quickcheck]
    fn reverse_flag_round_trips(on: bool) -> bool {
        let x = if on { "1" } else { "0" };
        reverse_flag(reverse_flag(x)) == x
    }
}
