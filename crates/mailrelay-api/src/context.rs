/// API Context - shared state for the relay handler
use mailrelay_core::services::{LettreTransportFactory, SmtpSettings};
use mailrelay_core::{MailRelay, RelayConfig, RelayError, TransportFactory};
use std::sync::Arc;

/// Built once per cold start; SMTP transports are still created per request
pub struct ApiContext {
    pub relay: MailRelay,
}

impl ApiContext {
    /// Create a new API context from the process environment
    pub fn new() -> Result<Arc<Self>, RelayError> {
        let config = RelayConfig::from_env()?;
        let factory = Arc::new(LettreTransportFactory::new(SmtpSettings::from(&config)));

        Ok(Self::with_factory(config, factory))
    }

    /// Create a context around an explicit transport factory
    pub fn with_factory(config: RelayConfig, factory: Arc<dyn TransportFactory>) -> Arc<Self> {
        Arc::new(Self {
            relay: MailRelay::new(config, factory),
        })
    }
}
