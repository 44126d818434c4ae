//! Port for outbound notification delivery.

use async_trait::async_trait;

use crate::domain::notification::NotificationMessage;

/// Errors raised by notification dispatcher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// The message could not be handed to the delivery channel.
    #[error("notification delivery failed: {reason}")]
    Delivery { reason: String },
}

impl NotificationError {
    pub fn delivery(reason: impl Into<String>) -> Self {
        Self::Delivery {
            reason: reason.into(),
        }
    }
}

/// Port for sending rendered notifications.
///
/// Dispatch is fire-and-forget from the domain's point of view: callers
/// record the outcome but never roll back committed state over a delivery
/// failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver one message.
    async fn dispatch(&self, message: &NotificationMessage) -> Result<(), NotificationError>;
}

/// Fixture implementation that silently drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for FixtureNotificationDispatcher {
    async fn dispatch(&self, _message: &NotificationMessage) -> Result<(), NotificationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_accepts_any_message() {
        let dispatcher = FixtureNotificationDispatcher;
        let message = NotificationMessage {
            recipient: "ada@example.com".into(),
            subject: "Reservation confirmation".into(),
            body: "See you soon".into(),
        };
        dispatcher
            .dispatch(&message)
            .await
            .expect("fixture dispatch should succeed");
    }

    #[rstest]
    fn delivery_error_carries_the_reason() {
        let message = NotificationError::delivery("relay refused connection").to_string();
        assert!(message.contains("relay refused connection"));
    }
}
