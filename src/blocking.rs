//! Synchronous (blocking) client for the STS AssumeRole API.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors the async [`crate::client::Client`] API using `reqwest::blocking`.
//! Do not call it from inside an async runtime.
//!
//! # Example
//!
//! ```no_run
//! use ali_sts_assume_role::blocking::Client;
//! use ali_sts_assume_role::{Credential, RoleRef};
//!
//! fn main() -> ali_sts_assume_role::Result<()> {
//!     let client = Client::new(
//!         Credential::new("id", "secret"),
//!         RoleRef::new("acs:ram::123456789012:role/example", "session"),
//!     )?;
//!
//!     let resp = client.assume_role(3600, None)?;
//!     println!("AK: {}", resp.credentials.access_key_id);
//!     Ok(())
//! }
//! ```

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::credential::{ChainProvider, Credential, CredentialProvider, RoleRef};
use crate::error::Result;
use crate::request::build_signed_request;
use crate::response::AssumeRoleResponse;
use crate::transport::{build_blocking_http_client, send_blocking};

/// Synchronous client for the STS AssumeRole API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    credential: Credential,
    role: RoleRef,
}

impl Client {
    /// Creates a new blocking client with an explicit credential and role.
    pub fn new(credential: Credential, role: RoleRef) -> Result<Self> {
        Self::with_config(credential, role, ClientConfig::default())
    }

    /// Creates a new blocking client with custom configuration.
    pub fn with_config(credential: Credential, role: RoleRef, config: ClientConfig) -> Result<Self> {
        let http = build_blocking_http_client(&config)?;
        Ok(Self::with_http_client(credential, role, config, http))
    }

    /// Creates a blocking client on top of an existing HTTP client.
    pub fn with_http_client(
        credential: Credential,
        role: RoleRef,
        config: ClientConfig,
        http: reqwest::blocking::Client,
    ) -> Self {
        Self {
            http,
            config,
            credential,
            role,
        }
    }

    /// Creates a new blocking client from environment variables.
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
    pub fn assume_role(
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
        let raw = send_blocking(&self.http, &request, &self.config)?;
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
