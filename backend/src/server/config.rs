//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::outbound::email::SmtpConfig;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
///
/// Optional pieces select between real and development adapters: without a
/// database pool the server runs against in-memory repositories, without
/// SMTP settings confirmations are logged rather than sent.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) smtp: Option<SmtpConfig>,
}

impl ServerConfig {
    /// Construct a configuration binding to the given address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            smtp: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach SMTP settings for confirmation delivery.
    #[must_use]
    pub fn with_smtp(mut self, smtp: SmtpConfig) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_development_adapters() {
        let config = ServerConfig::new(([127, 0, 0, 1], 8080).into());
        assert!(config.db_pool.is_none());
        assert!(config.smtp.is_none());
        assert_eq!(config.bind_addr().port(), 8080);
    }
}
