//! Log-only notification dispatcher for development mode.

use async_trait::async_trait;
use tracing::info;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationDispatcher, NotificationError};

/// Dispatcher that writes notifications to the log instead of sending them.
///
/// Used when no SMTP relay is configured so booking flows stay exercisable
/// locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn dispatch(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            "notification logged instead of sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_dispatch_always_succeeds() {
        let message = NotificationMessage {
            recipient: "ada@example.com".into(),
            subject: "Reservation confirmation".into(),
            body: "details".into(),
        };
        LoggingNotificationDispatcher
            .dispatch(&message)
            .await
            .expect("logged");
    }
}
