//! Outbound registration requests and their replies.

use serde::Deserialize;

use super::content_type::ContentType;
use super::platform::Platform;

/// A keyword or response: text plus its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub text: String,
    pub content_type: ContentType,
}

/// Where the module gets registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    /// Issue an execode instead of registering directly.
    Execode,
    /// A channel identified by platform and token.
    Channel { platform: Platform, token: String },
    /// One of the signed-in user's channels.
    Member { channel_id: String },
}

/// A channel the signed-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberChannel {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub token: String,
}

/// Request for a remote channel existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceCheck {
    pub platform: Platform,
    pub token: String,
}

/// A fully validated auto-reply registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub target: SubmitTarget,
    pub keyword: Content,
    pub responses: Vec<Content>,
    pub private: String,
    pub pinned: String,
    pub cooldown_secs: u32,
    pub tags: String,
}

impl SubmitRequest {
    /// Whether the backend should answer with an execode.
    pub fn issues_execode(&self) -> bool {
        self.target == SubmitTarget::Execode
    }

    /// Encodes the request as form parameters.
    ///
    /// Responses and their types are sent as repeated `r` / `rt` pairs in
    /// slot order.
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("k", self.keyword.text.clone()),
            ("kt", self.keyword.content_type.code().to_string()),
        ];
        for response in &self.responses {
            pairs.push(("r", response.text.clone()));
        }
        for response in &self.responses {
            pairs.push(("rt", response.content_type.code().to_string()));
        }
        pairs.push(("pr", self.private.clone()));
        pairs.push(("pin", self.pinned.clone()));
        pairs.push(("cd", self.cooldown_secs.to_string()));
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.clone()));
        }
        match &self.target {
            SubmitTarget::Execode => {}
            SubmitTarget::Channel { platform, token } => {
                pairs.push(("p", platform.code().to_string()));
                pairs.push(("c", token.clone()));
            }
            SubmitTarget::Member { channel_id } => {
                pairs.push(("cid", channel_id.clone()));
            }
        }
        pairs
    }
}

/// The backend's answer to a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    pub success: bool,
    pub execode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Content {
        Content {
            text: s.to_string(),
            content_type: ContentType::Text,
        }
    }

    fn make_request(target: SubmitTarget) -> SubmitRequest {
        SubmitRequest {
            target,
            keyword: text("hello"),
            responses: vec![
                text("hi there"),
                Content {
                    text: "https://example.com/a.png".into(),
                    content_type: ContentType::Image,
                },
            ],
            private: "0".into(),
            pinned: "1".into(),
            cooldown_secs: 30,
            tags: "greet|fun".into(),
        }
    }

    fn values<'a>(pairs: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn encodes_keyword_and_properties() {
        let pairs = make_request(SubmitTarget::Execode).to_form_pairs();
        assert_eq!(values(&pairs, "k"), vec!["hello"]);
        assert_eq!(values(&pairs, "kt"), vec!["0"]);
        assert_eq!(values(&pairs, "pr"), vec!["0"]);
        assert_eq!(values(&pairs, "pin"), vec!["1"]);
        assert_eq!(values(&pairs, "cd"), vec!["30"]);
        assert_eq!(values(&pairs, "tags"), vec!["greet|fun"]);
    }

    #[test]
    fn encodes_responses_as_repeated_pairs() {
        let pairs = make_request(SubmitTarget::Execode).to_form_pairs();
        assert_eq!(
            values(&pairs, "r"),
            vec!["hi there", "https://example.com/a.png"]
        );
        assert_eq!(values(&pairs, "rt"), vec!["0", "1"]);
    }

    #[test]
    fn execode_target_has_no_channel_params() {
        let request = make_request(SubmitTarget::Execode);
        assert!(request.issues_execode());
        let pairs = request.to_form_pairs();
        assert!(values(&pairs, "c").is_empty());
        assert!(values(&pairs, "cid").is_empty());
    }

    #[test]
    fn channel_target_params() {
        let request = make_request(SubmitTarget::Channel {
            platform: Platform::Discord,
            token: "C123".into(),
        });
        assert!(!request.issues_execode());
        let pairs = request.to_form_pairs();
        assert_eq!(values(&pairs, "p"), vec!["2"]);
        assert_eq!(values(&pairs, "c"), vec!["C123"]);
    }

    #[test]
    fn member_target_params() {
        let pairs = make_request(SubmitTarget::Member {
            channel_id: "5e1f".into(),
        })
        .to_form_pairs();
        assert_eq!(values(&pairs, "cid"), vec!["5e1f"]);
        assert!(values(&pairs, "p").is_empty());
    }

    #[test]
    fn empty_tags_omitted() {
        let mut request = make_request(SubmitTarget::Execode);
        request.tags.clear();
        assert!(values(&request.to_form_pairs(), "tags").is_empty());
    }

    #[test]
    fn member_channel_deserializes() {
        let json = r#"{"id":"5e1f","name":"Friends","platform":"discord","token":"T1"}"#;
        let channel: MemberChannel = serde_json::from_str(json).unwrap();
        assert_eq!(channel.platform, Platform::Discord);
        assert_eq!(channel.name, "Friends");
    }
}
