mod content_type;
mod field;
mod form;
mod mode;
mod platform;
mod request;
mod tags;
mod validation;

pub use content_type::ContentType;
pub use field::{FieldRule, FlagValue, TextField, Validity};
pub use form::{FieldId, FormLimits, FormState, ResponseSlot, SubmitBlocked, SubmitOutcome};
pub use mode::SubmissionMode;
pub use platform::Platform;
pub use request::{
    Content, ExistenceCheck, MemberChannel, SubmitReply, SubmitRequest, SubmitTarget,
};
pub use tags::{PopularTags, TagSearch, TagSelection};
pub use validation::{
    ValidationError, fill_percent, parse_cooldown, reverse_flag, validate_channel_token,
    validate_content, validate_tag_keyword, validate_text_content,
};
