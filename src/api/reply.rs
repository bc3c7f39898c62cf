//! Parsers for backend replies.
//!
//! Boolean checks (channel existence, content validity, pinned access) all
//! share one contract: a JSON object whose `success` field is a boolean.
//! Anything else is an [`ApiError::UnexpectedResponse`].

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::model::{MemberChannel, SubmitReply};

/// Literal body the login page returns on a successful sign-in.
const SIGN_IN_PASS: &str = "PASS";

static QUERY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]+([^=&#]+)=([^&#]*)").expect("valid hardcoded regex"));

/// Result of posting an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInReply {
    Pass,
    /// The server's message explaining the rejection.
    Rejected(String),
}

/// Parses the sign-in reply: `PASS`, or a plain-text error message.
pub fn parse_sign_in(body: &str) -> SignInReply {
    let body = body.trim();
    if body == SIGN_IN_PASS {
        SignInReply::Pass
    } else {
        SignInReply::Rejected(body.to_string())
    }
}

fn parse_object(body: &str) -> Result<serde_json::Map<String, Value>, ApiError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::UnexpectedResponse(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn success_flag(map: &serde_json::Map<String, Value>) -> Result<bool, ApiError> {
    map.get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| ApiError::UnexpectedResponse("missing boolean `success`".to_string()))
}

/// Parses a boolean check reply.
pub fn parse_success(body: &str) -> Result<bool, ApiError> {
    success_flag(&parse_object(body)?)
}

/// Parses a registration reply, picking up the issued execode if present.
pub fn parse_submit(body: &str) -> Result<SubmitReply, ApiError> {
    let map = parse_object(body)?;
    let success = success_flag(&map)?;
    let execode = map
        .get("result")
        .and_then(|r| r.get("execode"))
        .or_else(|| map.get("execode"))
        .and_then(Value::as_str)
        .map(str::to_string);
    Ok(SubmitReply { success, execode })
}

/// Extracts a list from either a bare JSON array or the `result` field.
///
/// An object with `success: false` means nothing was found.
fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    match serde_json::from_str::<Value>(body)? {
        list @ Value::Array(_) => Ok(serde_json::from_value(list)?),
        Value::Object(mut map) => {
            if !success_flag(&map).unwrap_or(true) {
                return Ok(Vec::new());
            }
            match map.remove("result") {
                Some(list @ Value::Array(_)) => Ok(serde_json::from_value(list)?),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(other) => Err(ApiError::UnexpectedResponse(format!(
                    "expected a list in `result`, got {other}"
                ))),
            }
        }
        other => Err(ApiError::UnexpectedResponse(format!(
            "expected a list, got {other}"
        ))),
    }
}

/// Parses tag names ordered by popularity.
pub fn parse_tag_names(body: &str) -> Result<Vec<String>, ApiError> {
    parse_list(body)
}

/// Parses the signed-in user's channels.
pub fn parse_member_channels(body: &str) -> Result<Vec<MemberChannel>, ApiError> {
    parse_list(body)
}

/// Where to go after signing in: the decoded `next` query parameter of the
/// login page, or `default` when it is absent or empty.
pub fn redirect_target(page_url: &str, default: &str) -> String {
    let next = QUERY_PARAM_RE
        .captures_iter(page_url)
        .find(|caps| &caps[1] == "next")
        .map(|caps| caps[2].to_string())
        .filter(|value| !value.is_empty());

    match next {
        Some(raw) => urlencoding::decode(&raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or(raw),
        None => default.to_string(),
    }
}
