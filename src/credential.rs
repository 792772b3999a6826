use std::env;

use crate::error::{Result, StsError};

/// Environment variable holding the AccessKey ID.
pub const ENV_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
/// Environment variable holding the AccessKey secret.
pub const ENV_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
/// Environment variable holding the RAM role ARN.
pub const ENV_ROLE_ARN: &str = "ALIBABA_CLOUD_ROLE_ARN";
/// Environment variable holding the role session name.
pub const ENV_ROLE_SESSION_NAME: &str = "ALIBABA_CLOUD_ROLE_SESSION_NAME";

/// Alibaba Cloud AccessKey credential.
///
/// The `Debug` implementation masks `access_key_id` and redacts
/// `access_key_secret` to prevent accidental leakage in logs.
#[derive(Clone)]
pub struct Credential {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl Credential {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Returns the access key ID with everything but its first four characters masked.
    pub fn masked_access_key_id(&self) -> String {
        let visible: String = self.access_key_id.chars().take(4).collect();
        format!("{}****", visible)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &self.masked_access_key_id())
            .field("access_key_secret", &"****")
            .finish()
    }
}

/// The role to assume and the session name to record for it.
///
/// Neither value is checked locally; the service rejects malformed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    /// ARN of the RAM role, e.g. `acs:ram::123456789012:role/example`.
    pub role_arn: String,
    /// Session name recorded in the audit trail.
    pub role_session_name: String,
}

impl RoleRef {
    pub fn new(role_arn: impl Into<String>, role_session_name: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            role_session_name: role_session_name.into(),
        }
    }

    /// Reads `ALIBABA_CLOUD_ROLE_ARN` and `ALIBABA_CLOUD_ROLE_SESSION_NAME`.
    pub fn from_env() -> Result<Self> {
        let role_arn = non_empty_var(ENV_ROLE_ARN)?;
        let role_session_name = non_empty_var(ENV_ROLE_SESSION_NAME)?;
        Ok(Self {
            role_arn,
            role_session_name,
        })
    }
}

fn non_empty_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => Err(StsError::Credential(format!("{} is empty", name))),
        Err(_) => Err(StsError::Credential(format!("{} not set", name))),
    }
}

/// Resolves a [`Credential`] from a specific source.
pub trait CredentialProvider {
    /// Attempt to resolve a credential from this provider.
    fn resolve(&self) -> Result<Credential>;
}

/// Provides a credential from explicitly specified values.
pub struct StaticProvider {
    credential: Credential,
}

impl StaticProvider {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(access_key_id, access_key_secret),
        }
    }
}

impl CredentialProvider for StaticProvider {
    fn resolve(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}

/// Provides a credential from environment variables.
///
/// Reads `ALIBABA_CLOUD_ACCESS_KEY_ID` and `ALIBABA_CLOUD_ACCESS_KEY_SECRET`.
pub struct EnvProvider;

impl CredentialProvider for EnvProvider {
    fn resolve(&self) -> Result<Credential> {
        let id = non_empty_var(ENV_ACCESS_KEY_ID)?;
        let secret = non_empty_var(ENV_ACCESS_KEY_SECRET)?;
        Ok(Credential::new(id, secret))
    }
}

/// Tries multiple credential providers in order and returns the first success.
pub struct ChainProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainProvider {
    /// Creates a chain with the given providers.
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Creates the default credential chain. Only environment variables are consulted.
    pub fn default_chain() -> Self {
        Self {
            providers: vec![Box::new(EnvProvider)],
        }
    }
}

impl CredentialProvider for ChainProvider {
    fn resolve(&self) -> Result<Credential> {
        let mut last_err = StsError::Credential("no credential providers configured".into());
        for provider in &self.providers {
            match provider.resolve() {
                Ok(cred) => return Ok(cred),
                Err(e) => last_err = e,
            }
        }
        Err(StsError::Credential(format!(
            "all credential providers failed, last error: {}",
            last_err
        )))
    }
}
