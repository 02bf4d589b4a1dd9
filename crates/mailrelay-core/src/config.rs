/// Configuration - loads relay settings from environment variables
use crate::constants::{DEFAULT_SMTP_TIMEOUT_SECS, INSECURE_DEFAULT_API_KEY};
use crate::error::RelayError;
use crate::utils::auth::constant_time_eq;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Relay configuration, immutable for the lifetime of the process
#[derive(Clone, TypedBuilder)]
pub struct RelayConfig {
    /// Shared secret every request must present as `api_key`
    #[builder(setter(into))]
    api_key: String,

    /// Set when `api_key` is the built-in insecure default
    #[builder(default = false)]
    pub uses_insecure_default: bool,

    /// Bound applied to connection verification and to the send
    #[builder(default = Duration::from_secs(DEFAULT_SMTP_TIMEOUT_SECS))]
    pub smtp_timeout: Duration,

    /// Relax STARTTLS certificate validation
    #[builder(default = false)]
    pub accept_invalid_certs: bool,

    /// Optional display name for the `From` header
    #[builder(default, setter(strip_option, into))]
    pub from_name: Option<String>,
}

impl RelayConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_insecure_default = parse_bool(
            "ALLOW_INSECURE_DEFAULT_API_KEY",
            lookup("ALLOW_INSECURE_DEFAULT_API_KEY"),
        )?;

        let (api_key, uses_insecure_default) = match lookup("API_KEY").filter(|k| !k.is_empty()) {
            Some(key) => (key, false),
            None if allow_insecure_default => {
                tracing::warn!(
                    "API_KEY is not set, falling back to the built-in default key. \
                     This key is public and insecure; set API_KEY before exposing this endpoint"
                );
                (INSECURE_DEFAULT_API_KEY.to_string(), true)
            }
            None => {
                return Err(RelayError::Config(
                    "Missing API_KEY env var (set ALLOW_INSECURE_DEFAULT_API_KEY=true to use the insecure default)"
                        .to_string(),
                ));
            }
        };

        let smtp_timeout = match lookup("SMTP_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    RelayError::Config(format!("Invalid SMTP_TIMEOUT_SECS '{}': {}", raw, e))
                })?;
                if secs == 0 {
                    return Err(RelayError::Config(
                        "SMTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_SMTP_TIMEOUT_SECS),
        };

        let accept_invalid_certs = parse_bool(
            "SMTP_ACCEPT_INVALID_CERTS",
            lookup("SMTP_ACCEPT_INVALID_CERTS"),
        )?;
        if accept_invalid_certs {
            tracing::warn!("SMTP certificate validation is disabled");
        }

        let from_name = lookup("SMTP_FROM_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let config = Self {
            api_key,
            uses_insecure_default,
            smtp_timeout,
            accept_invalid_certs,
            from_name,
        };

        tracing::info!(
            insecure_default_key = config.uses_insecure_default,
            smtp_timeout_secs = config.smtp_timeout.as_secs(),
            accept_invalid_certs = config.accept_invalid_certs,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Check a presented key against the configured secret
    pub fn api_key_matches(&self, candidate: Option<&str>) -> bool {
        candidate
            .map(|key| constant_time_eq(key.as_bytes(), self.api_key.as_bytes()))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"***")
            .field("uses_insecure_default", &self.uses_insecure_default)
            .field("smtp_timeout", &self.smtp_timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("from_name", &self.from_name)
            .finish()
    }
}

fn parse_bool(name: &str, value: Option<String>) -> Result<bool, RelayError> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(RelayError::Config(format!(
            "Invalid boolean for {}: '{}'",
            name, other
        ))),
    }
}
