use std::future::Future;

use super::error::ApiError;
use super::reply::SignInReply;
use crate::model::{ContentType, MemberChannel, Platform, SubmitReply, SubmitRequest};

/// Remote operations the form depends on.
///
/// Implemented over HTTP by [`ApiClient`](super::ApiClient); tests supply
/// in-memory fakes.
pub trait Backend: Clone + Send + Sync + 'static {
    /// Posts an identity token to the login page.
    fn sign_in(&self, id_token: &str) -> impl Future<Output = Result<SignInReply, ApiError>> + Send;

    /// Whether a channel with `token` exists on `platform`.
    fn channel_exists(
        &self,
        platform: Platform,
        token: &str,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Server-side content check (e.g. that an image URL really serves an image).
    fn validate_content(
        &self,
        content_type: ContentType,
        content: &str,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Whether the signed-in user may pin modules in `channel_id`.
    fn pinned_access(&self, channel_id: &str)
    -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Tag names matching `keyword`, most popular first. An empty keyword
    /// lists the most popular tags.
    fn search_tags(
        &self,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// Channels the signed-in user belongs to.
    fn member_channels(&self) -> impl Future<Output = Result<Vec<MemberChannel>, ApiError>> + Send;

    /// Registers an auto-reply module.
    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = Result<SubmitReply, ApiError>> + Send;
}
