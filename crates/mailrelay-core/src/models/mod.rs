/// Data models for relay requests and responses
pub mod request;
pub mod response;

pub use request::{EmailRequest, ValidatedEmail};
pub use response::{EmailResponse, SentEmail};
