//! Mail transports used by the email sink
//!
//! [`SmtpMailer`] delivers through a blocking `lettre` SMTP transport.
//! [`TestMailer`] records messages without delivering them and backs the
//! email sink's `debug` mode.

use crate::core::config::SinkConfig;
use crate::core::error::{LoggerError, Result};
use lettre::message::{Mailbox as LettreMailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, Message, SmtpTransport, Transport};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// An address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub address: String,
    pub name: Option<String>,
}

impl Mailbox {
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            address: address.into(),
            name,
        }
    }

    /// Minimal syntactic check using lettre's address parser
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.address.parse::<Address>().is_ok()
    }

    fn to_lettre(&self) -> Result<LettreMailbox> {
        let address = self
            .address
            .parse::<Address>()
            .map_err(|e| LoggerError::transport(format!("invalid address `{}`: {}", self.address, e)))?;
        Ok(LettreMailbox::new(self.name.clone(), address))
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// A fully built message handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Mailbox,
    pub from: Mailbox,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivers an [`OutgoingEmail`]
pub trait MailTransport: Send {
    fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// SMTP connection settings read from the email sink options
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade with STARTTLS
    pub tls: bool,
    /// Implicit TLS from the first byte
    pub ssl: bool,
    pub timeout: Duration,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25,
            username: None,
            password: None,
            tls: false,
            ssl: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("tls", &self.tls)
            .field("ssl", &self.ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SmtpSettings {
    /// Read `host`, `port`, `username`, `password`, `tls`, `ssl` and `timeout`
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        let defaults = Self::default();
        let port = match config.unsigned("port")? {
            Some(p) => u16::try_from(p)
                .map_err(|_| LoggerError::config("port", format!("{} is not a valid port", p)))?,
            None => defaults.port,
        };

        Ok(Self {
            host: config
                .string("host")?
                .map(str::to_string)
                .unwrap_or(defaults.host),
            port,
            username: config.string("username")?.map(str::to_string),
            password: config.string("password")?.map(str::to_string),
            tls: config.boolean("tls")?.unwrap_or(defaults.tls),
            ssl: config.boolean("ssl")?.unwrap_or(defaults.ssl),
            timeout: config
                .unsigned("timeout")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }
}

/// Blocking SMTP delivery. No connection is made until the first send.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let mut builder = SmtpTransport::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .timeout(Some(settings.timeout));

        if settings.ssl || settings.tls {
            let params = TlsParameters::new(settings.host.clone())
                .map_err(|e| LoggerError::config("tls", e.to_string()))?;
            builder = builder.tls(if settings.ssl {
                Tls::Wrapper(params)
            } else {
                Tls::Required(params)
            });
        }

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = Message::builder()
            .from(email.from.to_lettre()?)
            .to(email.to.to_lettre()?)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| LoggerError::transport(format!("failed to build message: {}", e)))?;

        self.transport
            .send(&message)
            .map_err(|e| LoggerError::transport(e.to_string()))?;
        Ok(())
    }
}

/// Non-delivering transport that keeps every message it is given.
///
/// Clones share the same outbox, so a test can keep one handle and give the
/// other to a sink.
#[derive(Debug, Clone, Default)]
pub struct TestMailer {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl TestMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().clone()
    }

    pub fn last(&self) -> Option<OutgoingEmail> {
        self.outbox.lock().last().cloned()
    }
}

impl MailTransport for TestMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<()> {
        self.outbox.lock().push(email.clone());
        Ok(())
    }
}
