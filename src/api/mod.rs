//! Backend access: the [`Backend`] seam, its HTTP client and reply parsers.

mod backend;
mod client;
mod error;
mod reply;

pub use backend::Backend;
pub use client::ApiClient;
pub use error::ApiError;
pub use reply::{
    SignInReply, parse_member_channels, parse_sign_in, parse_submit, parse_success,
    parse_tag_names, redirect_target,
};
