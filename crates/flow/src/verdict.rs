use protocol::{RawResponse, TokenResponse, body_snippet};
use serde_json::Value;

use crate::error::VerifyError;

/// Result of interpreting one token-endpoint response.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Decoded body, present whenever the response carried parseable JSON.
    pub payload: Option<Value>,
    /// The granted token, or why there is none.
    pub token: Result<String, VerifyError>,
}

impl Verdict {
    fn failed(payload: Option<Value>, err: VerifyError) -> Self {
        Self {
            payload,
            token: Err(err),
        }
    }

    /// Pretty-printed payload for the debug surface.
    pub fn payload_text(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
    }
}

/// Classifies a response: content type first, then HTTP status, then the
/// `success`/`token` fields.
pub fn classify_response(raw: &RawResponse) -> Verdict {
    if !raw.is_json() {
        return Verdict::failed(
            None,
            VerifyError::NotJson {
                content_type: raw.content_type.clone(),
                snippet: body_snippet(&raw.body).to_string(),
            },
        );
    }

    let value = match raw.decode_value() {
        Ok(v) => v,
        Err(err) => return Verdict::failed(None, VerifyError::Malformed(err.to_string())),
    };

    // Field decoding is lenient, so only a non-object document lands here;
    // it carries no verdict fields at all.
    let decoded: TokenResponse = serde_json::from_value(value.clone()).unwrap_or_default();

    let granted = if raw.is_success() {
        decoded.granted_token()
    } else {
        None
    };

    match granted {
        Some(token) => Verdict {
            token: Ok(token.to_string()),
            payload: Some(value),
        },
        None => Verdict::failed(
            Some(value),
            VerifyError::Rejected {
                status: raw.status,
                reason: decoded.reason().map(str::to_string),
            },
        ),
    }
}
