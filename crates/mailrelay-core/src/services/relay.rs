/// Relay pipeline - authorizes, validates, verifies, and sends one email
use crate::config::RelayConfig;
use crate::email::compose;
use crate::error::RelayError;
use crate::models::{EmailRequest, SentEmail};
use crate::services::smtp::{SmtpCredentials, TransportFactory};
use crate::utils::logging::{extract_domain, redact_body, redact_email, redact_subject};
use chrono::Utc;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct MailRelay {
    config: RelayConfig,
    factory: Arc<dyn TransportFactory>,
}

fn transport_text(err: RelayError) -> String {
    match err {
        RelayError::Authentication(text) | RelayError::Smtp(text) => text,
        other => other.to_string(),
    }
}

impl MailRelay {
    pub fn new(config: RelayConfig, factory: Arc<dyn TransportFactory>) -> Self {
        Self { config, factory }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay one request.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// 1. API key
    /// 2. Required fields present
    /// 3. `to` and `from_email` are email-shaped
    /// 4. Transport connects and authenticates (any failure is `Authentication`)
    /// 5. Message is composed and sent once (any failure is `Smtp`)
    pub async fn relay(&self, request: EmailRequest) -> Result<SentEmail, RelayError> {
        if !self.config.api_key_matches(request.api_key.as_deref()) {
            warn!("Rejected request with invalid API key");
            return Err(RelayError::InvalidApiKey);
        }

        let email = request.validate().inspect_err(|e| {
            warn!(error = %e, "Rejected invalid relay request");
        })?;

        info!(
            to = %redact_email(&email.to),
            from_domain = %extract_domain(&email.from_email),
            subject = %redact_subject(&email.subject),
            body = %redact_body(&email.body),
            "Relaying email"
        );

        let transport = self.factory.create(SmtpCredentials {
            username: email.from_email.clone(),
            password: email.from_password.clone(),
        })?;

        let limit = self.config.smtp_timeout;

        match timeout(limit, transport.verify()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "SMTP verification failed");
                return Err(RelayError::Authentication(transport_text(e)));
            }
            Err(_) => {
                warn!(timeout_secs = limit.as_secs_f64(), "SMTP verification timed out");
                return Err(RelayError::Authentication(format!(
                    "SMTP verification timed out after {:?}",
                    limit
                )));
            }
        }

        let composed = compose(&email, self.config.from_name.as_deref())?;

        match timeout(limit, transport.send(composed.message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "SMTP send failed");
                return Err(RelayError::Smtp(transport_text(e)));
            }
            Err(_) => {
                warn!(timeout_secs = limit.as_secs_f64(), "SMTP send timed out");
                return Err(RelayError::Smtp(format!(
                    "SMTP send timed out after {:?}",
                    limit
                )));
            }
        }

        let sent = SentEmail::new(email.to, email.subject, composed.message_id, Utc::now());

        info!(
            message_id = %sent.message_id,
            to = %redact_email(&sent.to),
            "Email sent"
        );

        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::smtp::MailTransport;
    use async_trait::async_trait;
    use lettre::message::Message;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone, Copy)]
    enum Outcome {
        Ok,
        Fail,
        Hang,
    }

    #[derive(Default)]
    struct Calls {
        created: Vec<String>,
        verified: usize,
        sent: Vec<Vec<u8>>,
    }

    struct MockTransport {
        verify: Outcome,
        send: Outcome,
        calls: Arc<Mutex<Calls>>,
    }

    #[async_trait]
    impl MailTransport for MockTransport {
        async fn verify(&self) -> Result<(), RelayError> {
            self.calls.lock().unwrap().verified += 1;
            match self.verify {
                Outcome::Ok => Ok(()),
                Outcome::Fail => Err(RelayError::Smtp("535 5.7.8 bad credentials".into())),
                Outcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
            }
        }

        async fn send(&self, message: Message) -> Result<(), RelayError> {
            match self.send {
                Outcome::Ok => {
                    self.calls.lock().unwrap().sent.push(message.formatted());
                    Ok(())
                }
                Outcome::Fail => Err(RelayError::Smtp("552 message rejected".into())),
                Outcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
            }
        }
    }

    struct MockFactory {
        verify: Outcome,
        send: Outcome,
        calls: Arc<Mutex<Calls>>,
    }

    impl TransportFactory for MockFactory {
        fn create(
            &self,
            credentials: SmtpCredentials,
        ) -> Result<Box<dyn MailTransport>, RelayError> {
            self.calls.lock().unwrap().created.push(credentials.username);
            Ok(Box::new(MockTransport {
                verify: self.verify,
                send: self.send,
                calls: Arc::clone(&self.calls),
            }))
        }
    }

    fn relay_with(verify: Outcome, send: Outcome) -> (MailRelay, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let config = RelayConfig::builder()
            .api_key("beckk001")
            .smtp_timeout(Duration::from_millis(50))
            .build();
        let factory = MockFactory {
            verify,
            send,
            calls: Arc::clone(&calls),
        };
        (MailRelay::new(config, Arc::new(factory)), calls)
    }

    fn request() -> EmailRequest {
        EmailRequest {
            api_key: Some("beckk001".to_string()),
            to: Some("a@b.com".to_string()),
            subject: Some("Hi".to_string()),
            body: Some("Line1\nLine2".to_string()),
            from_email: Some("x@gmail.com".to_string()),
            from_password: Some("app-pass".to_string()),
        }
    }

    #[tokio::test]
    async fn test_relay_success() {
        let (relay, calls) = relay_with(Outcome::Ok, Outcome::Ok);

        let sent = relay.relay(request()).await.unwrap();
        assert_eq!(sent.to, "a@b.com");
        assert_eq!(sent.subject, "Hi");
        assert!(sent.message_id.ends_with("@gmail.com>"));
        assert!(chrono::DateTime::parse_from_rfc3339(&sent.sent_at).is_ok());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.created, vec!["x@gmail.com".to_string()]);
        assert_eq!(calls.verified, 1);
        assert_eq!(calls.sent.len(), 1);
        let raw = String::from_utf8_lossy(&calls.sent[0]);
        assert!(raw.contains("Line1<br>Line2"));
    }

    #[tokio::test]
    async fn test_api_key_checked_before_fields() {
        let (relay, calls) = relay_with(Outcome::Ok, Outcome::Ok);
        let bad = EmailRequest {
            api_key: Some("wrong".to_string()),
            ..EmailRequest::default()
        };

        let err = relay.relay(bad).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidApiKey));
        assert!(calls.lock().unwrap().created.is_empty());
    }

    #[tokio::test]
    async fn test_missing_and_invalid_fields_never_connect() {
        let (relay, calls) = relay_with(Outcome::Ok, Outcome::Ok);

        let mut missing = request();
        missing.subject = None;
        assert!(matches!(
            relay.relay(missing).await,
            Err(RelayError::MissingParams(_))
        ));

        let mut invalid = request();
        invalid.to = Some("a@b".to_string());
        assert!(matches!(
            relay.relay(invalid).await,
            Err(RelayError::InvalidEmail(_))
        ));

        assert!(calls.lock().unwrap().created.is_empty());
    }

    #[tokio::test]
    async fn test_verify_failure_is_authentication() {
        let (relay, calls) = relay_with(Outcome::Fail, Outcome::Ok);

        let err = relay.relay(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Authentication(_)));
        assert_eq!(err.details(), Some("535 5.7.8 bad credentials"));
        assert!(calls.lock().unwrap().sent.is_empty());
    }

    #[tokio::test]
    async fn test_verify_timeout_is_authentication() {
        let (relay, _) = relay_with(Outcome::Hang, Outcome::Ok);

        let err = relay.relay(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Authentication(_)));
        assert!(err.details().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_send_failure_is_smtp_error() {
        let (relay, _) = relay_with(Outcome::Ok, Outcome::Fail);

        let err = relay.relay(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Smtp(_)));
        assert_eq!(err.details(), Some("552 message rejected"));
    }

    #[tokio::test]
    async fn test_send_timeout_is_smtp_error() {
        let (relay, _) = relay_with(Outcome::Ok, Outcome::Hang);

        let err = relay.relay(request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Smtp(_)));
        assert!(err.details().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_each_request_creates_fresh_transport() {
        let (relay, calls) = relay_with(Outcome::Ok, Outcome::Ok);

        let first = relay.relay(request()).await.unwrap();
        let second = relay.relay(request()).await.unwrap();

        assert_ne!(first.message_id, second.message_id);
        assert_eq!(calls.lock().unwrap().created.len(), 2);
    }
}
