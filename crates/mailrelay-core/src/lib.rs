/// Mailrelay Core - Relay pipeline for the Mailrelay endpoint
///
/// This crate contains the request and response models, configuration,
/// validation, message composition, and the SMTP transport seam used by
/// the Mailrelay API Lambda function.
pub mod config;
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::RelayConfig;
pub use error::{ErrorCode, RelayError};
pub use models::{EmailRequest, EmailResponse, SentEmail};
pub use services::{MailRelay, MailTransport, TransportFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
