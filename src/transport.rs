//! Single HTTP exchange with the STS endpoint.

use crate::config::ClientConfig;
use crate::error::{Result, StsError};
use crate::request::SignedRequest;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Raw outcome of an exchange that reached the service.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Builds the async HTTP client for a configuration.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| StsError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Sends one request. Any failure before a body is read is a transport error.
pub(crate) async fn send(
    http: &reqwest::Client,
    request: &SignedRequest,
    config: &ClientConfig,
) -> Result<RawResponse> {
    let response = http
        .request(request.method.clone(), &request.endpoint)
        .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .timeout(config.timeout)
        .body(request.body.clone())
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.bytes().await?.to_vec();

    tracing::debug!(
        status,
        nonce = request.nonce(),
        bytes = body.len(),
        "received STS response"
    );

    Ok(RawResponse { status, body })
}

#[cfg(feature = "blocking")]
pub(crate) fn build_blocking_http_client(
    config: &ClientConfig,
) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| StsError::Config(format!("Failed to build HTTP client: {}", e)))
}

#[cfg(feature = "blocking")]
pub(crate) fn send_blocking(
    http: &reqwest::blocking::Client,
    request: &SignedRequest,
    config: &ClientConfig,
) -> Result<RawResponse> {
    let response = http
        .request(request.method.clone(), &request.endpoint)
        .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .timeout(config.timeout)
        .body(request.body.clone())
        .send()?;

    let status = response.status().as_u16();
    let body = response.bytes()?.to_vec();

    tracing::debug!(
        status,
        nonce = request.nonce(),
        bytes = body.len(),
        "received STS response"
    );

    Ok(RawResponse { status, body })
}
