//! Response classification by body shape.
//!
//! The HTTP status is recorded but never decides the outcome: STS has been
//! observed to return error bodies with 2xx statuses, and non-JSON bodies
//! with any status.

use serde_json::Value;

use crate::error::{Result, ServiceError, StsError};
use crate::response::{ApiErrorResponse, AssumeRoleResponse};

const SUCCESS_FIELDS: [&str; 3] = ["RequestId", "AssumedRoleUser", "Credentials"];

/// Classifies a raw AssumeRole response as success, service error, or undecodable.
pub(crate) fn classify(body: &[u8], status: u16) -> Result<AssumeRoleResponse> {
    let text = String::from_utf8_lossy(body);

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(status, error = %e, "STS response body is not valid JSON");
            return Err(StsError::decode(
                status,
                format!("body is not valid JSON: {}", e),
                &text,
            ));
        }
    };

    let Some(object) = value.as_object() else {
        return Err(StsError::decode(status, "body is not a JSON object", &text));
    };

    if object.contains_key("Code") {
        let api_err: ApiErrorResponse = serde_json::from_value(value).map_err(|e| {
            StsError::decode(status, format!("malformed error body: {}", e), &text)
        })?;
        let err = ServiceError {
            code: api_err.code.unwrap_or_default(),
            message: api_err.message.unwrap_or_default(),
            raw_message: text.into_owned(),
            status_code: status,
            request_id: api_err.request_id.unwrap_or_default(),
            host_id: api_err.host_id,
            recommend: api_err.recommend,
        };
        if (200..300).contains(&status) {
            tracing::warn!(
                status,
                code = %err.code,
                request_id = %err.request_id,
                "STS returned an error body with a success status"
            );
        }
        return Err(StsError::Service(err));
    }

    if SUCCESS_FIELDS.iter().all(|field| object.contains_key(*field)) {
        return serde_json::from_value(value).map_err(|e| {
            tracing::warn!(status, error = %e, "STS success body has malformed fields");
            StsError::decode(status, format!("malformed success body: {}", e), &text)
        });
    }

    tracing::warn!(status, "STS response matches neither success nor error shape");
    Err(StsError::decode(
        status,
        "body matches neither the success nor the error shape",
        &text,
    ))
}
