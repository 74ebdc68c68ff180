use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://forms.geo-verification.com";

/// Addresses of the remote form service and the local confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub base_url: String,
    pub token_path: String,
    pub form_path: String,
    /// Relative to the page hosting the widget.
    pub thank_you: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_path: "/api/get-form-token".to_string(),
            form_path: "/embed-form".to_string(),
            thank_you: "./thank-you.html".to_string(),
        }
    }
}

impl Endpoints {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn join(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn token_url(&self) -> String {
        self.join(&self.token_path)
    }

    /// Embedded form URL carrying the percent-encoded token.
    pub fn form_url(&self, token: &str) -> String {
        format!(
            "{}?token={}",
            self.join(&self.form_path),
            urlencoding::encode(token)
        )
    }

    pub fn thank_you_url(&self) -> &str {
        &self.thank_you
    }
}
