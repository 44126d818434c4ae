//! SMTP notification dispatcher using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationDispatcher, NotificationError};

/// Configuration for the SMTP dispatcher.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host, e.g. `smtp.example.com`.
    pub host: String,
    /// Relay port, usually 587 for STARTTLS.
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address placed in the `From` header.
    pub from_address: String,
}

/// Dispatcher that delivers notifications over SMTP.
///
/// Failures are reported as [`NotificationError::Delivery`]; the booking
/// service treats them as non-fatal and surfaces them in the create response.
#[derive(Clone)]
pub struct SmtpNotificationDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotificationDispatcher {
    /// Build a dispatcher from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Delivery`] if the relay host is invalid.
    pub fn new(config: SmtpConfig) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|err| NotificationError::delivery(format!("smtp relay error: {err}")))?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }
}

#[async_trait]
impl NotificationDispatcher for SmtpNotificationDispatcher {
    async fn dispatch(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|err| {
                        NotificationError::delivery(format!("invalid from address: {err}"))
                    })?,
            )
            .to(message.recipient.parse().map_err(|err| {
                NotificationError::delivery(format!("invalid recipient address: {err}"))
            })?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|err| NotificationError::delivery(format!("failed to build email: {err}")))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|err| NotificationError::delivery(format!("failed to send email: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bad_recipient_fails_before_the_wire() {
        let dispatcher = SmtpNotificationDispatcher::new(SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "roomly".into(),
            password: "pw".into(),
            from_address: "bookings@example.com".into(),
        })
        .expect("valid config");

        let message = NotificationMessage {
            recipient: "not an address".into(),
            subject: "subject".into(),
            body: "body".into(),
        };
        let err = dispatcher
            .dispatch(&message)
            .await
            .expect_err("rejected recipient");
        assert!(err.to_string().contains("invalid recipient address"));
    }
}
