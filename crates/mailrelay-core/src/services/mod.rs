/// Service modules
pub mod relay;
pub mod smtp;

pub use relay::MailRelay;
pub use smtp::{
    LettreMailTransport, LettreTransportFactory, MailTransport, SmtpCredentials, SmtpSettings,
    TransportFactory,
};
