/// SMTP transport service
use crate::config::RelayConfig;
use crate::constants::{DEFAULT_SMTP_TIMEOUT_SECS, SMTP_HOST, SMTP_PORT};
use crate::error::RelayError;
use async_trait::async_trait;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Per-request SMTP login, taken from the request body
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Connection settings shared by every transport the factory creates
#[derive(Debug, Clone, TypedBuilder)]
pub struct SmtpSettings {
    #[builder(default = SMTP_HOST.to_string(), setter(into))]
    pub host: String,

    #[builder(default = SMTP_PORT)]
    pub port: u16,

    #[builder(default = Duration::from_secs(DEFAULT_SMTP_TIMEOUT_SECS))]
    pub timeout: Duration,

    #[builder(default = false)]
    pub accept_invalid_certs: bool,
}

impl From<&RelayConfig> for SmtpSettings {
    fn from(config: &RelayConfig) -> Self {
        Self::builder()
            .timeout(config.smtp_timeout)
            .accept_invalid_certs(config.accept_invalid_certs)
            .build()
    }
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Connect, upgrade with STARTTLS, and authenticate without sending anything
    async fn verify(&self) -> Result<(), RelayError>;

    /// Submit one message
    async fn send(&self, message: Message) -> Result<(), RelayError>;
}

/// Creates a fresh transport for each request; transports are never pooled
pub trait TransportFactory: Send + Sync {
    fn create(&self, credentials: SmtpCredentials) -> Result<Box<dyn MailTransport>, RelayError>;
}

pub struct LettreTransportFactory {
    settings: SmtpSettings,
}

impl LettreTransportFactory {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

impl TransportFactory for LettreTransportFactory {
    fn create(&self, credentials: SmtpCredentials) -> Result<Box<dyn MailTransport>, RelayError> {
        let tls = TlsParameters::builder(self.settings.host.clone())
            .dangerous_accept_invalid_certs(self.settings.accept_invalid_certs)
            .build()?;

        // STARTTLS on the submission port, never implicit TLS
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.host)
            .port(self.settings.port)
            .tls(Tls::Required(tls))
            .credentials(Credentials::new(credentials.username, credentials.password))
            .timeout(Some(self.settings.timeout))
            .build();

        Ok(Box::new(LettreMailTransport::new(transport)))
    }
}

pub struct LettreMailTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl LettreMailTransport {
    pub fn new(inner: AsyncSmtpTransport<Tokio1Executor>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MailTransport for LettreMailTransport {
    async fn verify(&self) -> Result<(), RelayError> {
        if self.inner.test_connection().await? {
            Ok(())
        } else {
            Err(RelayError::Smtp(
                "SMTP server did not respond to the connection test".to_string(),
            ))
        }
    }

    async fn send(&self, message: Message) -> Result<(), RelayError> {
        let response = self.inner.send(message).await?;

        tracing::debug!(
            code = %response.code(),
            "SMTP server accepted message"
        );

        Ok(())
    }
}
