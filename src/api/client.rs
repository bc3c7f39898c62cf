use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use super::backend::Backend;
use super::error::ApiError;
use super::reply::{
    SignInReply, parse_member_channels, parse_sign_in, parse_submit, parse_success,
    parse_tag_names,
};
use crate::config::ServerConfig;
use crate::model::{ContentType, MemberChannel, Platform, SubmitReply, SubmitRequest};

const CSRF_HEADER: &str = "X-CSRFToken";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP implementation of [`Backend`].
///
/// Every call is a form-encoded POST carrying the CSRF token when one is
/// configured.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    server: ServerConfig,
    tag_search_count: usize,
}

impl ApiClient {
    /// Creates a client for the configured server.
    pub fn new(server: &ServerConfig, tag_search_count: usize) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            server: server.clone(),
            tag_search_count,
        })
    }

    /// Full URL of the login page the identity token is posted to.
    pub fn login_url(&self) -> String {
        self.server.url(&self.server.login_page)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match &self.server.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    /// Sends a prepared request and returns the raw body of a 2xx reply.
    async fn send(&self, url: &str, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%url, %status, %body, "backend reply");
        if !status.is_success() {
            warn!(%url, %status, "backend returned an error status");
            return Err(ApiError::UnexpectedResponse(format!("{status}: {body}")));
        }
        Ok(body)
    }

    async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&'static str, String)],
    ) -> Result<String, ApiError> {
        let url = self.server.url(endpoint);
        let builder = self.request(&url).form(form);
        self.send(&url, builder).await
    }
}

impl Backend for ApiClient {
    async fn sign_in(&self, id_token: &str) -> Result<SignInReply, ApiError> {
        let url = self.login_url();
        let body = format!("idtoken={}", urlencoding::encode(id_token));
        let builder = self
            .request(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        // Rejections come back as plain text, whatever the status.
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, %status, body = %text, "sign-in reply");
        let reply = parse_sign_in(&text);
        match &reply {
            SignInReply::Pass => info!("signed in"),
            SignInReply::Rejected(msg) => warn!(%status, message = %msg, "sign-in rejected"),
        }
        Ok(reply)
    }

    async fn channel_exists(&self, platform: Platform, token: &str) -> Result<bool, ApiError> {
        let form = [
            ("p", platform.code().to_string()),
            ("c", token.to_string()),
        ];
        let body = self.post_form(&self.server.channel_query, &form).await?;
        parse_success(&body)
    }

    async fn validate_content(
        &self,
        content_type: ContentType,
        content: &str,
    ) -> Result<bool, ApiError> {
        let form = [
            ("c", content.to_string()),
            ("t", content_type.code().to_string()),
        ];
        let body = self.post_form(&self.server.content_validate, &form).await?;
        parse_success(&body)
    }

    async fn pinned_access(&self, channel_id: &str) -> Result<bool, ApiError> {
        let form = [("cid", channel_id.to_string())];
        let body = self.post_form(&self.server.pinned_access, &form).await?;
        parse_success(&body)
    }

    async fn search_tags(&self, keyword: &str) -> Result<Vec<String>, ApiError> {
        let form = [
            ("w", keyword.to_string()),
            ("count", self.tag_search_count.to_string()),
        ];
        let body = self.post_form(&self.server.tag_popularity, &form).await?;
        parse_tag_names(&body)
    }

    async fn member_channels(&self) -> Result<Vec<MemberChannel>, ApiError> {
        let body = self.post_form(&self.server.member_channels, &[]).await?;
        parse_member_channels(&body)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitReply, ApiError> {
        let endpoint = if request.issues_execode() {
            &self.server.ar_add_execode
        } else {
            &self.server.ar_add
        };
        info!(endpoint = %endpoint, responses = request.responses.len(), "submitting auto-reply");
        let body = self.post_form(endpoint, &request.to_form_pairs()).await?;
        let reply = parse_submit(&body)?;
        if !reply.success {
            warn!(%body, "auto-reply registration rejected");
        }
        Ok(reply)
    }
}
