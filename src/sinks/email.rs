//! Email sink: one message per log call

use super::mailer::{Mailbox, MailTransport, OutgoingEmail, SmtpMailer, SmtpSettings, TestMailer};
use crate::core::config::SinkConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::LineFormatter;
use crate::core::log_entry::LogEntry;
use crate::core::sink::Sink;
use serde_json::Value;

/// Sends each log line as an email with subject `Log: <LEVEL>`.
///
/// Addresses are validated at construction. Delivery failures are returned
/// from [`Sink::log`] and swallowed by the dispatcher, so a broken mail server
/// never fails the logging call.
///
/// # Example
///
/// ```
/// use multisink_logger::sinks::{EmailSink, Mailbox, TestMailer};
///
/// let sink = EmailSink::new(
///     Mailbox::new("ops@example.com", None),
///     Mailbox::new("app@example.com", Some("App".to_string())),
///     Box::new(TestMailer::new()),
/// )
/// .unwrap();
/// ```
pub struct EmailSink {
    to: Mailbox,
    from: Mailbox,
    transport: Box<dyn MailTransport>,
    formatter: LineFormatter,
    last_email: Option<OutgoingEmail>,
}

impl EmailSink {
    pub fn new(to: Mailbox, from: Mailbox, transport: Box<dyn MailTransport>) -> Result<Self> {
        if !to.is_valid() {
            return Err(LoggerError::config("to", "Invalid email address for to"));
        }
        if !from.is_valid() {
            return Err(LoggerError::config("from", "Invalid email address for from"));
        }
        Ok(Self {
            to,
            from,
            transport,
            formatter: LineFormatter::default(),
            last_email: None,
        })
    }

    /// Build from `to`, `from`, the SMTP options and `debug`.
    ///
    /// With `debug: true` messages go to a [`TestMailer`] and are never delivered.
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        let to = mailbox_option(config, "to")?;
        let from = mailbox_option(config, "from")?;

        let transport: Box<dyn MailTransport> = if config.boolean("debug")?.unwrap_or(false) {
            Box::new(TestMailer::new())
        } else {
            Box::new(SmtpMailer::new(&SmtpSettings::from_config(config)?)?)
        };

        Self::new(to, from, transport)
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn recipient(&self) -> &Mailbox {
        &self.to
    }

    pub fn sender(&self) -> &Mailbox {
        &self.from
    }

    /// The most recent message the transport accepted
    pub fn last_email(&self) -> Option<&OutgoingEmail> {
        self.last_email.as_ref()
    }

    fn build(&self, entry: &LogEntry) -> OutgoingEmail {
        let mut text = self.formatter.format(entry);
        text.push('\n');
        OutgoingEmail {
            to: self.to.clone(),
            from: self.from.clone(),
            subject: format!("Log: {}", entry.level.to_str()),
            html_body: format!("<p>{}</p>", escape_html(&text)),
            text_body: text,
        }
    }
}

impl Sink for EmailSink {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let email = self.build(entry);
        self.transport.send(&email)?;
        self.last_email = Some(email);
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}

/// Accepts `"a@b.c"`, `["a@b.c"]` or `{"a@b.c": "Name"}`
pub fn parse_mailbox(value: &Value) -> Option<Mailbox> {
    match value {
        Value::String(address) => Some(Mailbox::new(address.clone(), None)),
        Value::Array(items) => match items.first() {
            Some(Value::String(address)) => Some(Mailbox::new(address.clone(), None)),
            _ => None,
        },
        Value::Object(map) => {
            let (address, name) = map.iter().next()?;
            let name = match name {
                Value::String(n) => Some(n.clone()),
                Value::Null => None,
                _ => return None,
            };
            Some(Mailbox::new(address.clone(), name))
        }
        _ => None,
    }
}

fn mailbox_option(config: &SinkConfig, key: &str) -> Result<Mailbox> {
    config
        .get(key)
        .and_then(parse_mailbox)
        .filter(Mailbox::is_valid)
        .ok_or_else(|| LoggerError::config(key, format!("Invalid email address for {}", key)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_context::LogContext;
    use crate::core::log_level::LogLevel;
    use serde_json::json;

    struct FailingTransport;

    impl MailTransport for FailingTransport {
        fn send(&self, _email: &OutgoingEmail) -> Result<()> {
            Err(LoggerError::transport("connection refused"))
        }
    }

    fn debug_config() -> SinkConfig {
        SinkConfig::with_engine("Email")
            .with_option("to", "ops@example.com")
            .with_option("from", json!({ "app@example.com": "App" }))
            .with_option("debug", true)
    }

    #[test]
    fn test_parse_mailbox_forms() {
        assert_eq!(
            parse_mailbox(&json!("a@example.com")),
            Some(Mailbox::new("a@example.com", None))
        );
        assert_eq!(
            parse_mailbox(&json!(["a@example.com"])),
            Some(Mailbox::new("a@example.com", None))
        );
        assert_eq!(
            parse_mailbox(&json!({ "a@example.com": "Alice" })),
            Some(Mailbox::new("a@example.com", Some("Alice".to_string())))
        );
        assert_eq!(parse_mailbox(&json!([])), None);
        assert_eq!(parse_mailbox(&json!(5)), None);
    }

    #[test]
    fn test_from_config_debug_mode() {
        let mut sink = EmailSink::from_config(&debug_config()).unwrap();
        assert_eq!(sink.sender().name.as_deref(), Some("App"));

        let ctx = LogContext::new().with_field("code", 500);
        sink.log(&LogEntry::new(LogLevel::Critical, "status {code}", ctx))
            .unwrap();

        let email = sink.last_email().unwrap();
        assert_eq!(email.subject, "Log: CRITICAL");
        assert!(email.text_body.ends_with("application CRITICAL: status 500\n"));
        assert!(email.html_body.starts_with("<p>["));
        assert!(email.html_body.ends_with("</p>"));
    }

    #[test]
    fn test_invalid_addresses_rejected() {
        for (key, value) in [
            ("to", json!("not-an-email")),
            ("to", json!(null)),
            ("from", json!({ "": "Nobody" })),
            ("from", json!([])),
        ] {
            let config = debug_config().with_option(key, value);
            let err = EmailSink::from_config(&config).err().unwrap();
            assert!(err.is_configuration(), "{} should be rejected", key);
        }
    }

    #[test]
    fn test_transport_failure_reported() {
        let mut sink = EmailSink::new(
            Mailbox::new("ops@example.com", None),
            Mailbox::new("app@example.com", None),
            Box::new(FailingTransport),
        )
        .unwrap();

        let result = sink.log(&LogEntry::new(LogLevel::Error, "x", LogContext::new()));
        assert!(matches!(result, Err(LoggerError::TransportError(_))));
        assert!(sink.last_email().is_none());
    }

    #[test]
    fn test_html_body_escaped() {
        let mailer = TestMailer::new();
        let mut sink = EmailSink::new(
            Mailbox::new("ops@example.com", None),
            Mailbox::new("app@example.com", None),
            Box::new(mailer.clone()),
        )
        .unwrap();

        sink.log(&LogEntry::new(LogLevel::Alert, "<script>", LogContext::new()))
            .unwrap();

        let sent = mailer.last().unwrap();
        assert!(sent.html_body.contains("&lt;script&gt;"));
        assert!(sent.text_body.contains("<script>"));
    }
}
