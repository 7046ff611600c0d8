use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use business::domain::errors::RemoteCartError;

/// Wrapper the backend puts around every response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    /// The `error` field may be a plain string or an object with `message`.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) => Some(message.clone()),
            serde_json::Value::Object(fields) => Some(
                fields
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| serde_json::Value::Object(fields.clone()).to_string()),
            ),
            other => Some(other.to_string()),
        }
    }
}

/// Turns an HTTP status and body into the payload or a typed error.
///
/// Contract:
/// - 401 is `Unauthorized`, any other non-2xx is `Status` (or `Rejected` when
///   the body still carries an envelope error message);
/// - a 2xx body that is not an envelope of `T` is `Decode`;
/// - `success: false` is `Rejected` (or `Unauthorized` for status code 401);
/// - `success: true` without `data` is `Decode`.
pub fn decode_envelope<T: DeserializeOwned>(
    http_status: u16,
    body: &[u8],
) -> Result<T, RemoteCartError> {
    if http_status == 401 {
        return Err(RemoteCartError::Unauthorized);
    }

    if !(200..300).contains(&http_status) {
        let message = serde_json::from_slice::<ApiEnvelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.error_message());
        return Err(match message {
            Some(message) => RemoteCartError::Rejected {
                status_code: http_status,
                message,
            },
            None => RemoteCartError::Status(http_status),
        });
    }

    let envelope: ApiEnvelope<T> =
        serde_json::from_slice(body).map_err(RemoteCartError::decode)?;

    if !envelope.success {
        if envelope.status_code == 401 {
            return Err(RemoteCartError::Unauthorized);
        }
        return Err(RemoteCartError::Rejected {
            status_code: envelope.status_code,
            message: envelope
                .error_message()
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    envelope
        .data
        .ok_or_else(|| RemoteCartError::decode("envelope.missing_data"))
}
