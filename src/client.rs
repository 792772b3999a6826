use crate::classify::classify;
use crate::config::ClientConfig;
use crate::credential::{ChainProvider, Credential, CredentialProvider, RoleRef};
use crate::error::Result;
use crate::request::build_signed_request;
use crate::response::AssumeRoleResponse;
use crate::transport::{build_http_client, send};

/// Default validity requested for temporary credentials, in seconds.
pub const DEFAULT_DURATION_SECONDS: u64 = 3600;

/// Async client for the STS AssumeRole API.
///
/// Holds the long-lived credential and the role to assume; every field is
/// read-only after construction, so one client can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    credential: Credential,
    role: RoleRef,
}

impl Client {
    /// Creates a new client with an explicit credential and role.
    pub fn new(credential: Credential, role: RoleRef) -> Result<Self> {
        Self::with_config(credential, role, ClientConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(credential: Credential, role: RoleRef, config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self::with_http_client(credential, role, config, http))
    }

    /// Creates a client on top of an existing (possibly shared) HTTP client.
    ///
    /// `config.timeout` is still applied to each request.
    pub fn with_http_client(
        credential: Credential,
        role: RoleRef,
        config: ClientConfig,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            config,
            credential,
            role,
        }
    }

    /// Creates a new client from environment variables.
    ///
    /// The credential comes from the default provider chain, the role from
    /// `ALIBABA_CLOUD_ROLE_ARN` and `ALIBABA_CLOUD_ROLE_SESSION_NAME`.
    pub fn from_env() -> Result<Self> {
        let credential = ChainProvider::default_chain().resolve()?;
        let role = RoleRef::from_env()?;
        Self::new(credential, role)
    }

    /// Returns the role this client assumes.
    pub fn role(&self) -> &RoleRef {
        &self.role
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Assumes the configured RAM role and obtains temporary security credentials.
    ///
    /// Makes exactly one request. `duration_seconds` and `policy` are passed
    /// through; the service rejects out-of-range or malformed values with a
    /// [`crate::StsError::Service`].
    pub async fn assume_role(
        &self,
        duration_seconds: u64,
        policy: Option<&str>,
    ) -> Result<AssumeRoleResponse> {
        let request = build_signed_request(
            &self.credential,
            &self.role,
            duration_seconds,
            policy,
            &self.config,
        );
        let raw = send(&self.http, &request, &self.config).await?;
        let resp = classify(&raw.body, raw.status)?;

        tracing::info!(
            request_id = %resp.request_id,
            access_key_id = %resp.credentials.access_key_id,
            expiration = %resp.credentials.expiration,
            "assumed role {}",
            self.role.role_arn
        );
        Ok(resp)
    }
}
