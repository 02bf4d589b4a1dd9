/// Error types for the Mailrelay system
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable failure codes returned in the `error` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MethodNotAllowed,
    InvalidApiKey,
    MissingParams,
    InvalidEmail,
    InvalidPassword,
    SmtpError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::MissingParams => "MISSING_PARAMS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::SmtpError => "SMTP_ERROR",
        }
    }

    /// HTTP status code for this failure
    pub fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::InvalidApiKey => 401,
            Self::MissingParams => 400,
            Self::InvalidEmail => 400,
            Self::InvalidPassword => 401,
            Self::SmtpError => 500,
        }
    }

    /// User-facing message for this failure
    pub fn message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method not allowed",
            Self::InvalidApiKey => "API key tidak valid",
            Self::MissingParams => "Parameter tidak lengkap",
            Self::InvalidEmail => "Format email tidak valid",
            Self::InvalidPassword => {
                "Gmail authentication failed. Pastikan menggunakan App Password."
            }
            Self::SmtpError => "Gagal mengirim email",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParams(Vec<&'static str>),

    /// Carries the name of the offending field, never the address
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("SMTP authentication failed: {0}")]
    Authentication(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// Maps the error onto its response code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MethodNotAllowed(_) => ErrorCode::MethodNotAllowed,
            Self::InvalidApiKey => ErrorCode::InvalidApiKey,
            Self::MissingParams(_) => ErrorCode::MissingParams,
            Self::InvalidEmail(_) => ErrorCode::InvalidEmail,
            Self::Authentication(_) => ErrorCode::InvalidPassword,
            Self::Smtp(_) => ErrorCode::SmtpError,
            Self::Config(_) => ErrorCode::SmtpError,
        }
    }

    /// Raw transport text, surfaced to operators in the `details` field.
    ///
    /// Opaque provider output: never branch on its contents.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Authentication(details) | Self::Smtp(details) => Some(details.as_str()),
            _ => None,
        }
    }
}

impl From<lettre::error::Error> for RelayError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Smtp(err.to_string())
    }
}

impl From<lettre::address::AddressError> for RelayError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::Smtp(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for RelayError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Smtp(err.to_string())
    }
}
