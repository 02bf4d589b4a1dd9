/// Inbound relay request
use crate::error::RelayError;
use crate::utils::validation::validate_email_address;
use serde::{Deserialize, Deserializer};

/// JSON payload accepted by the relay endpoint.
///
/// Every field is optional at the wire level: absent, `null`, and non-string
/// values all deserialize to `None` so that presence is decided by
/// [`EmailRequest::missing_fields`] rather than by the JSON parser.
#[derive(Clone, Default, Deserialize)]
pub struct EmailRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,

    /// Plain text body, may contain newlines
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: Option<String>,

    /// Sender address, also the SMTP username
    #[serde(default, deserialize_with = "lenient_string")]
    pub from_email: Option<String>,

    /// SMTP app password
    #[serde(default, deserialize_with = "lenient_string")]
    pub from_password: Option<String>,
}

/// A request that passed presence and format checks
#[derive(Clone)]
pub struct ValidatedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub from_email: String,
    pub from_password: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl EmailRequest {
    /// Parse a request body, treating anything that is not a JSON object as empty
    pub fn from_json_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Request body is not a JSON object, treating as empty");
                Self::default()
            }
        }
    }

    /// Names of required fields that are absent or empty, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("api_key", &self.api_key),
            ("to", &self.to),
            ("subject", &self.subject),
            ("body", &self.body),
            ("from_email", &self.from_email),
            ("from_password", &self.from_password),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Run the presence check, then the address format check
    pub fn validate(self) -> Result<ValidatedEmail, RelayError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(RelayError::MissingParams(missing));
        }

        let email = ValidatedEmail {
            to: self.to.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            from_email: self.from_email.unwrap_or_default(),
            from_password: self.from_password.unwrap_or_default(),
        };

        validate_email_address("to", &email.to)?;
        validate_email_address("from_email", &email.from_email)?;

        Ok(email)
    }
}

impl std::fmt::Debug for EmailRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailRequest")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("to", &self.to)
            .field("subject", &self.subject)
            .field("body", &self.body.as_ref().map(|b| b.len()))
            .field("from_email", &self.from_email)
            .field("from_password", &self.from_password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl std::fmt::Debug for ValidatedEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedEmail")
            .field("to", &self.to)
            .field("subject", &self.subject)
            .field("body", &self.body.len())
            .field("from_email", &self.from_email)
            .field("from_password", &"***")
            .finish()
    }
}
