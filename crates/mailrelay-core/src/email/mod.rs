/// Email composition modules
pub mod composer;

pub use composer::{ComposedEmail, compose, text_to_html};
