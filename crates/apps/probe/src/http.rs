use flow::{TokenClient, TransportError};
use protocol::{RawResponse, TokenRequest};
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use tracing::debug;

/// Token exchange over reqwest, never served from a cache.
#[derive(Clone, Default)]
pub struct ReqwestTokenClient {
    client: Client,
}

impl ReqwestTokenClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl TokenClient for ReqwestTokenClient {
    async fn exchange(
        &self,
        url: &str,
        request: &TokenRequest,
    ) -> Result<RawResponse, TransportError> {
        let resp = self
            .client
            .post(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!(status, ?content_type, "token endpoint answered");

        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
