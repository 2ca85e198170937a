//! Sink implementations

pub mod console;
pub mod email;
pub mod file;
pub mod mailer;

pub use console::{ConsoleSink, ConsoleTarget};
pub use email::EmailSink;
pub use file::{FileSink, RotationPolicy};
pub use mailer::{Mailbox, MailTransport, OutgoingEmail, SmtpMailer, SmtpSettings, TestMailer};

pub use crate::core::Sink;
