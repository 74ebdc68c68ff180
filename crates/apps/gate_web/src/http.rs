use flow::{TokenClient, TransportError};
use gloo_net::http::Request;
use protocol::{RawResponse, TokenRequest};
use web_sys::RequestCache;

/// Token exchange over `fetch`.
#[derive(Debug, Default, Copy, Clone)]
pub struct FetchTokenClient;

impl TokenClient for FetchTokenClient {
    async fn exchange(
        &self,
        url: &str,
        request: &TokenRequest,
    ) -> Result<RawResponse, TransportError> {
        let resp = Request::post(url)
            .cache(RequestCache::NoStore)
            .json(request)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status();
        let content_type = resp.headers().get("Content-Type");
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
