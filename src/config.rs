use std::time::Duration;

/// Configuration for the STS client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// STS API endpoint URL.
    pub endpoint: String,

    /// Timeout for the whole request/response exchange.
    pub timeout: Duration,

    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,

    /// Response format (always "JSON").
    pub(crate) format: &'static str,

    /// API version (always "2015-04-01").
    pub(crate) api_version: &'static str,

    /// Signature method (always "HMAC-SHA1").
    pub(crate) signature_method: &'static str,

    /// Signature version (always "1.0").
    pub(crate) signature_version: &'static str,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sts.aliyuncs.com".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            format: "JSON",
            api_version: "2015-04-01",
            signature_method: "HMAC-SHA1",
            signature_version: "1.0",
        }
    }
}

impl ClientConfig {
    /// Sets a custom endpoint, e.g. a regional VPC endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TCP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
