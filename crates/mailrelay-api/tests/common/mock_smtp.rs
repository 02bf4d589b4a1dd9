/// Mock SMTP transports for integration testing
use async_trait::async_trait;
use lettre::message::Message;
use mailrelay_core::services::SmtpCredentials;
use mailrelay_core::{MailTransport, RelayError, TransportFactory};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Succeed,
    Fail(&'static str),
    Hang,
}

impl Outcome {
    async fn resolve(self) -> Result<(), RelayError> {
        match self {
            Outcome::Succeed => Ok(()),
            Outcome::Fail(text) => Err(RelayError::Smtp(text.to_string())),
            Outcome::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

/// Everything the mock transports observed
#[derive(Default)]
pub struct Recorded {
    pub logins: Vec<(String, String)>,
    pub verifications: usize,
    pub messages: Vec<Vec<u8>>,
}

#[derive(Clone)]
pub struct MockFactory {
    verify: Outcome,
    send: Outcome,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockFactory {
    pub fn new(verify: Outcome, send: Outcome) -> Self {
        Self {
            verify,
            send,
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn logins(&self) -> Vec<(String, String)> {
        self.recorded.lock().unwrap().logins.clone()
    }

    pub fn verifications(&self) -> usize {
        self.recorded.lock().unwrap().verifications
    }

    pub fn messages(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .messages
            .iter()
            .map(|m| String::from_utf8_lossy(m).into_owned())
            .collect()
    }
}

impl TransportFactory for MockFactory {
    fn create(&self, credentials: SmtpCredentials) -> Result<Box<dyn MailTransport>, RelayError> {
        self.recorded
            .lock()
            .unwrap()
            .logins
            .push((credentials.username, credentials.password));

        Ok(Box::new(MockTransport {
            verify: self.verify,
            send: self.send,
            recorded: Arc::clone(&self.recorded),
        }))
    }
}

pub struct MockTransport {
    verify: Outcome,
    send: Outcome,
    recorded: Arc<Mutex<Recorded>>,
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn verify(&self) -> Result<(), RelayError> {
        self.recorded.lock().unwrap().verifications += 1;
        self.verify.resolve().await
    }

    async fn send(&self, message: Message) -> Result<(), RelayError> {
        self.send.resolve().await?;
        self.recorded.lock().unwrap().messages.push(message.formatted());
        Ok(())
    }
}
