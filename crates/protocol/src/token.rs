//! Wire types for the form-token exchange.
//!
//! The client POSTs its position as JSON and expects a JSON verdict back:
//! - request: `{"lat": number, "lon": number}`
//! - response: `{"success": bool, "token"?: string, "reason"?: string}`
//!
//! Servers are loose about the verdict fields, so decoding follows their
//! truthiness: `success` of `null`, `0` or `""` reads as false and a token
//! or reason of the wrong type reads as absent.
//!
//! Transports hand back a [`RawResponse`] so classification stays independent
//! of `fetch`, reqwest or a test fake.

use foundation::Position;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Maximum number of body characters kept when a response is not JSON.
pub const BODY_SNIPPET_CHARS: usize = 120;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of `POST /api/get-form-token`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub lat: f64,
    pub lon: f64,
}

impl From<Position> for TokenRequest {
    fn from(p: Position) -> Self {
        Self {
            lat: p.latitude,
            lon: p.longitude,
        }
    }
}

/// Decoded verdict from the token endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
}

fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Strings pass through, numbers are rendered, anything else is absent.
fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl TokenResponse {
    /// The token, only when the server both succeeded and issued a non-empty one.
    pub fn granted_token(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Server-supplied reason, ignoring blank strings.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Transport-neutral HTTP response as seen by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some(JSON_CONTENT_TYPE), body)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// True when the declared content type names JSON. Parameters such as
    /// `; charset=utf-8` are accepted.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
    }

    /// Decodes the body as an untyped JSON document.
    pub fn decode_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// First [`BODY_SNIPPET_CHARS`] characters of `body`.
pub fn body_snippet(body: &str) -> &str {
    match body.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_serializes_lat_lon() {
        let req = TokenRequest::from(Position::new(21.5, 39.25));
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"lat":21.5,"lon":39.25}"#
        );
    }

    #[test]
    fn response_tolerates_missing_and_unknown_fields() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"token":"abc","extra":1}"#).unwrap();
        assert_eq!(
            resp,
            TokenResponse {
                success: false,
                token: Some("abc".to_string()),
                reason: None,
            }
        );
        assert_eq!(resp.granted_token(), None);
    }

    #[test]
    fn success_follows_truthiness() {
        for (body, expected) in [
            (r#"{"success":null}"#, false),
            (r#"{"success":0}"#, false),
            (r#"{"success":""}"#, false),
            (r#"{"success":false}"#, false),
            (r#"{"success":1}"#, true),
            (r#"{"success":"yes"}"#, true),
            (r#"{"success":true}"#, true),
        ] {
            let resp: TokenResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.success, expected, "body {body}");
        }
    }

    #[test]
    fn mistyped_token_and_reason_read_loosely() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"success":true,"token":42,"reason":{"code":7}}"#).unwrap();
        assert_eq!(resp.granted_token(), Some("42"));
        assert_eq!(resp.reason(), None);

        let resp: TokenResponse =
            serde_json::from_str(r#"{"success":true,"token":null,"reason":null}"#).unwrap();
        assert_eq!(resp.granted_token(), None);
    }

    #[test]
    fn granted_token_requires_success_and_non_empty_token() {
        let ok = TokenResponse {
            success: true,
            token: Some("t-1".into()),
            reason: None,
        };
        assert_eq!(ok.granted_token(), Some("t-1"));

        let empty = TokenResponse {
            token: Some(String::new()),
            ..ok.clone()
        };
        assert_eq!(empty.granted_token(), None);

        let missing = TokenResponse {
            token: None,
            ..ok
        };
        assert_eq!(missing.granted_token(), None);
    }

    #[test]
    fn blank_reason_is_ignored() {
        let resp = TokenResponse {
            reason: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(resp.reason(), None);
    }

    #[test]
    fn json_content_type_detection() {
        assert!(RawResponse::new(200, Some("application/json; charset=utf-8"), "").is_json());
        assert!(RawResponse::new(200, Some("Application/JSON"), "").is_json());
        assert!(!RawResponse::new(200, Some("text/html"), "").is_json());
        assert!(!RawResponse::new(200, None, "").is_json());
    }

    #[test]
    fn success_status_range() {
        assert!(RawResponse::json(200, "").is_success());
        assert!(RawResponse::json(204, "").is_success());
        assert!(!RawResponse::json(302, "").is_success());
        assert!(!RawResponse::json(403, "").is_success());
    }

    #[test]
    fn snippet_keeps_at_most_120_chars() {
        let long = "x".repeat(500);
        assert_eq!(body_snippet(&long).len(), 120);
        assert_eq!(body_snippet("short"), "short");
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let arabic = "م".repeat(200);
        let snippet = body_snippet(&arabic);
        assert_eq!(snippet.chars().count(), 120);
        assert!(arabic.starts_with(snippet));
    }
}
