//! Backend entry-point: wires REST endpoints, adapters, and OpenAPI docs.

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::email::SmtpConfig;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Command-line options, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Roomly hotel booking backend")]
struct Cli {
    /// Socket address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL. Without it the server runs on in-memory
    /// repositories, which is intended for development only.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// SMTP relay host. Without it confirmation mails are logged instead of
    /// delivered.
    #[arg(long, env = "SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP relay port.
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    smtp_port: u16,

    /// SMTP relay username.
    #[arg(long, env = "SMTP_USERNAME", default_value = "")]
    smtp_username: String,

    /// SMTP relay password.
    #[arg(long, env = "SMTP_PASSWORD", default_value = "")]
    smtp_password: String,

    /// Sender address for confirmation mails.
    #[arg(long, env = "SMTP_FROM", default_value = "bookings@roomly.example")]
    smtp_from: String,
}

/// Runs pending schema migrations on a blocking thread.
///
/// Diesel migrations are synchronous, so the async connection is wrapped and
/// driven from `spawn_blocking`.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&database_url)
                .map_err(|err| std::io::Error::other(format!("database connection: {err}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| std::io::Error::other(format!("migrations: {err}")))?;
        Ok::<(), std::io::Error>(())
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task: {err}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    let mut config = ServerConfig::new(cli.bind_addr);

    if let Some(database_url) = cli.database_url {
        run_migrations(database_url.clone()).await?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; using in-memory repositories");
    }

    if let Some(host) = cli.smtp_host {
        config = config.with_smtp(SmtpConfig {
            host,
            port: cli.smtp_port,
            username: cli.smtp_username,
            password: cli.smtp_password,
            from_address: cli.smtp_from,
        });
    } else {
        info!("SMTP_HOST not set; confirmation mails are logged only");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
