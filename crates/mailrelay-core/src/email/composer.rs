/// Email composer using lettre crate
use crate::constants::HTML_LINE_BREAK;
use crate::error::RelayError;
use crate::models::ValidatedEmail;
use crate::utils::logging::extract_domain;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart};
use std::str::FromStr;
use uuid::Uuid;

/// A message ready for submission, with the Message-ID it was stamped with
#[derive(Debug, Clone)]
pub struct ComposedEmail {
    pub message_id: String,
    pub message: Message,
}

/// Converts a plain text body into its HTML alternative.
///
/// Every line ending becomes a `<br>`; the text is otherwise passed through
/// untouched, so markup in the body is preserved.
pub fn text_to_html(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\n', HTML_LINE_BREAK)
}

fn sender_mailbox(from_email: &str, from_name: Option<&str>) -> Result<Mailbox, RelayError> {
    let mailbox = match from_name {
        Some(name) => Mailbox::new(Some(name.to_string()), from_email.parse()?),
        None => Mailbox::from_str(from_email)?,
    };
    Ok(mailbox)
}

fn generate_message_id(from_email: &str) -> String {
    format!("<{}@{}>", Uuid::new_v4(), extract_domain(from_email))
}

/// Build a `multipart/alternative` message with text and HTML bodies
pub fn compose(email: &ValidatedEmail, from_name: Option<&str>) -> Result<ComposedEmail, RelayError> {
    let message_id = generate_message_id(&email.from_email);

    let message = Message::builder()
        .from(sender_mailbox(&email.from_email, from_name)?)
        .to(Mailbox::from_str(&email.to)?)
        .subject(email.subject.clone())
        .message_id(Some(message_id.clone()))
        .multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(email.body.clone()))
                .singlepart(SinglePart::html(text_to_html(&email.body))),
        )?;

    Ok(ComposedEmail {
        message_id,
        message,
    })
}
