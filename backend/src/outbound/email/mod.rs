//! Email adapters implementing the notification dispatcher port.

mod logging;
mod smtp;

pub use logging::LoggingNotificationDispatcher;
pub use smtp::{SmtpConfig, SmtpNotificationDispatcher};
