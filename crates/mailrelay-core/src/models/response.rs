/// Relay response bodies
use crate::constants::{MESSAGE_SENT, REQUIRED_FIELDS};
use crate::error::{ErrorCode, RelayError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of a delivered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
    /// ISO-8601 UTC timestamp taken at send completion
    pub sent_at: String,
}

impl SentEmail {
    pub fn new(to: String, subject: String, message_id: String, sent_at: DateTime<Utc>) -> Self {
        Self {
            to,
            subject,
            message_id,
            sent_at: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// JSON body returned for every non-preflight request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SentEmail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl EmailResponse {
    pub fn sent(data: SentEmail) -> Self {
        Self {
            success: true,
            message: MESSAGE_SENT.to_string(),
            data: Some(data),
            error: None,
            details: None,
            required: None,
        }
    }

    pub fn failed(err: &RelayError) -> Self {
        let code = err.code();
        let required = matches!(err, RelayError::MissingParams(_))
            .then(|| REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect());

        Self {
            success: false,
            message: code.message().to_string(),
            data: None,
            error: Some(code),
            details: err.details().map(str::to_string),
            required,
        }
    }
}
