//! Request building and signing for the AssumeRole call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::ClientConfig;
use crate::credential::{Credential, RoleRef};
use crate::sign::{canonicalize, sign_request};

pub(crate) const ASSUME_ROLE_ACTION: &str = "AssumeRole";
const HTTP_METHOD: reqwest::Method = reqwest::Method::POST;

/// A signed request, ready to hand to the transport.
#[derive(Debug, Clone)]
pub(crate) struct SignedRequest {
    pub method: reqwest::Method,
    pub endpoint: String,
    /// All parameters including `Signature`.
    pub params: BTreeMap<String, String>,
    /// Percent-encoded form body.
    pub body: String,
}

impl SignedRequest {
    pub(crate) fn nonce(&self) -> &str {
        self.params
            .get("SignatureNonce")
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Generates a random nonce for signature requests.
fn generate_nonce() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Formats a timestamp in the ISO 8601 form STS expects.
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Builds a signed AssumeRole request with a fresh nonce and the current time.
///
/// `duration_seconds`, the role ARN and the session name are passed through
/// as-is; range and format checks are left to the service.
pub(crate) fn build_signed_request(
    credential: &Credential,
    role: &RoleRef,
    duration_seconds: u64,
    policy: Option<&str>,
    config: &ClientConfig,
) -> SignedRequest {
    build_with(
        credential,
        role,
        duration_seconds,
        policy,
        config,
        &generate_nonce(),
        &format_timestamp(Utc::now()),
    )
}

/// Builds a signed AssumeRole request from caller-supplied nonce and timestamp.
pub(crate) fn build_with(
    credential: &Credential,
    role: &RoleRef,
    duration_seconds: u64,
    policy: Option<&str>,
    config: &ClientConfig,
    nonce: &str,
    timestamp: &str,
) -> SignedRequest {
    let mut params = BTreeMap::new();

    // Common parameters
    params.insert("Action".to_string(), ASSUME_ROLE_ACTION.to_string());
    params.insert("Version".to_string(), config.api_version.to_string());
    params.insert("Format".to_string(), config.format.to_string());
    params.insert(
        "AccessKeyId".to_string(),
        credential.access_key_id.clone(),
    );
    params.insert(
        "SignatureMethod".to_string(),
        config.signature_method.to_string(),
    );
    params.insert(
        "SignatureVersion".to_string(),
        config.signature_version.to_string(),
    );
    params.insert("SignatureNonce".to_string(), nonce.to_string());
    params.insert("Timestamp".to_string(), timestamp.to_string());

    // AssumeRole parameters
    params.insert("RoleArn".to_string(), role.role_arn.clone());
    params.insert(
        "RoleSessionName".to_string(),
        role.role_session_name.clone(),
    );
    params.insert("DurationSeconds".to_string(), duration_seconds.to_string());
    if let Some(policy) = policy {
        params.insert("Policy".to_string(), policy.to_string());
    }

    let signature = sign_request(&params, &credential.access_key_secret, HTTP_METHOD.as_str());
    params.insert("Signature".to_string(), signature);

    let body = canonicalize(&params);

    tracing::debug!(
        action = ASSUME_ROLE_ACTION,
        access_key_id = %credential.masked_access_key_id(),
        nonce,
        timestamp,
        endpoint = %config.endpoint,
        "built signed STS request"
    );

    SignedRequest {
        method: HTTP_METHOD,
        endpoint: config.endpoint.clone(),
        params,
        body,
    }
}
