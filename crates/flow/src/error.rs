use std::fmt;

/// Closed set of geolocation failures reported by the browser.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeolocationErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other,
}

impl GeolocationErrorKind {
    /// Maps a `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationErrorKind::PermissionDenied,
            2 => GeolocationErrorKind::PositionUnavailable,
            3 => GeolocationErrorKind::Timeout,
            _ => GeolocationErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeolocationErrorKind::PermissionDenied => "permission-denied",
            GeolocationErrorKind::PositionUnavailable => "position-unavailable",
            GeolocationErrorKind::Timeout => "timeout",
            GeolocationErrorKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationError {
    pub kind: GeolocationErrorKind,
    /// Raw detail from the collaborator, shown in the debug surface.
    pub message: String,
}

impl GeolocationError {
    pub fn new(kind: GeolocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "geolocation failed: {}", self.kind.as_str())
        } else {
            write!(f, "geolocation failed ({}): {}", self.kind.as_str(), self.message)
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Connection-level failure from a token client (no response was received).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Failures of the token exchange and unlock steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Declared content type was not JSON; `snippet` holds at most 120 body characters.
    NotJson {
        content_type: Option<String>,
        snippet: String,
    },
    /// HTTP failure, `success: false`, or no token.
    Rejected { status: u16, reason: Option<String> },
    /// JSON content type but the body did not decode.
    Malformed(String),
    Network(String),
    PopupBlocked,
}

impl VerifyError {
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::NotJson { .. } => "response-not-json",
            VerifyError::Rejected { .. } => "verification-rejected",
            VerifyError::Malformed(_) => "response-malformed",
            VerifyError::Network(_) => "network-failure",
            VerifyError::PopupBlocked => "popup-blocked",
        }
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::NotJson {
                content_type,
                snippet,
            } => write!(
                f,
                "response is not JSON (content-type: {}): {snippet}",
                content_type.as_deref().unwrap_or("none")
            ),
            VerifyError::Rejected { status, reason } => match reason {
                Some(r) => write!(f, "verification rejected (HTTP {status}): {r}"),
                None => write!(f, "verification rejected (HTTP {status})"),
            },
            VerifyError::Malformed(msg) => write!(f, "malformed JSON response: {msg}"),
            VerifyError::Network(msg) => write!(f, "network failure: {msg}"),
            VerifyError::PopupBlocked => write!(f, "form window was blocked"),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<TransportError> for VerifyError {
    fn from(e: TransportError) -> Self {
        VerifyError::Network(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_codes_map_to_kinds() {
        assert_eq!(
            GeolocationErrorKind::from_code(1),
            GeolocationErrorKind::PermissionDenied
        );
        assert_eq!(
            GeolocationErrorKind::from_code(2),
            GeolocationErrorKind::PositionUnavailable
        );
        assert_eq!(GeolocationErrorKind::from_code(3), GeolocationErrorKind::Timeout);
        assert_eq!(GeolocationErrorKind::from_code(0), GeolocationErrorKind::Other);
        assert_eq!(GeolocationErrorKind::from_code(42), GeolocationErrorKind::Other);
    }

    #[test]
    fn transport_errors_become_network_failures() {
        let e: VerifyError = TransportError("connection refused".into()).into();
        assert_eq!(e.kind(), "network-failure");
        assert_eq!(e.to_string(), "network failure: connection refused");
    }
}
