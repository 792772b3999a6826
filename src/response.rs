use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Temporary security credentials returned by STS.
///
/// The `Debug` implementation redacts `access_key_secret` and `security_token`
/// to prevent accidental credential leakage in logs.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub security_token: String,
    pub expiration: DateTime<Utc>,
}

impl Credentials {
    /// Returns the access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the access key secret.
    pub fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }

    /// Returns the security token.
    pub fn security_token(&self) -> &str {
        &self.security_token
    }

    /// Returns the absolute expiration time.
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Checks if the credentials have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiration
    }

    /// Returns the remaining time until expiration.
    ///
    /// Returns `None` if the credentials are already expired.
    pub fn time_to_expiry(&self) -> Option<std::time::Duration> {
        (self.expiration - Utc::now()).to_std().ok()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"****")
            .field("security_token", &"****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Response from the AssumeRole API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumeRoleResponse {
    pub request_id: String,
    pub assumed_role_user: AssumedRoleUser,
    pub credentials: Credentials,
}

/// Information about the assumed role identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumedRoleUser {
    pub arn: String,
    pub assumed_role_id: String,
}

/// Alibaba Cloud API error response body.
///
/// Every field tolerates `null`, absence and non-string scalars, so any
/// object carrying `Code` deserializes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiErrorResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub host_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommend: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
