//! Storefront API server.
//!
//! Usage:
//!
//! ```text
//! storefront-server                                   # memory stores, port 3000
//! storefront-server --port 8080 --log-json            # custom port, JSON logs
//! DATABASE_URL=postgres://... storefront-server       # PostgreSQL stores (`postgres` feature)
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use storefront_server::auth::{SessionConfig, SessionResolver, DEFAULT_SESSION_COOKIE_NAME};
use storefront_server::storage::{MemoryCustomerStore, MemorySessionStore};
use storefront_server::{CustomerStore, NetworkConfig, NetworkModule, SessionStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront-server", about = "Storefront API server")]
struct Cli {
    /// Address to bind to
    #[arg(long, env = "STOREFRONT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 for OS-assigned)
    #[arg(long, env = "STOREFRONT_PORT", default_value = "3000")]
    port: u16,

    /// Allowed CORS origins, comma separated ("*" for any)
    #[arg(long, env = "STOREFRONT_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    cors_origins: Vec<String>,

    /// Maximum request duration in seconds
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT", default_value = "30")]
    request_timeout_secs: u64,

    /// Name of the signed cookie carrying the storefront session id
    #[arg(long, env = "STOREFRONT_SESSION_COOKIE", default_value = DEFAULT_SESSION_COOKIE_NAME)]
    session_cookie: String,

    /// Cookie signing secret, at least 64 bytes (random per process if omitted)
    #[arg(long, env = "STOREFRONT_COOKIE_SECRET", hide_env_values = true)]
    cookie_secret: Option<String>,

    /// `PostgreSQL` connection string for the session and customer tables
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "STOREFRONT_DB_MAX_CONNECTIONS", default_value = "10")]
    db_max_connections: u32,

    /// Emit logs as JSON lines
    #[arg(long, env = "STOREFRONT_LOG_JSON")]
    log_json: bool,

    /// Enable verbose logging (ignored when `RUST_LOG` is set)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn session_config(cli: &Cli) -> anyhow::Result<SessionConfig> {
    if let Some(secret) = &cli.cookie_secret {
        return Ok(SessionConfig::from_secret(
            cli.session_cookie.clone(),
            secret.as_bytes(),
        )?);
    }

    warn!("No cookie secret configured; generated a random key, existing session cookies will not verify");
    Ok(SessionConfig {
        cookie_name: cli.session_cookie.clone(),
        ..SessionConfig::default()
    })
}

type Stores = (Arc<dyn SessionStore>, Arc<dyn CustomerStore>);

#[cfg(feature = "postgres")]
async fn build_stores(cli: &Cli) -> anyhow::Result<Stores> {
    use storefront_server::storage::postgres::{connect, PgCustomerStore, PgSessionStore};

    if let Some(url) = &cli.database_url {
        let pool = connect(url, cli.db_max_connections).await?;
        info!("Connected to PostgreSQL");
        return Ok((
            Arc::new(PgSessionStore::new(pool.clone())),
            Arc::new(PgCustomerStore::new(pool)),
        ));
    }

    Ok(memory_stores())
}

#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
async fn build_stores(cli: &Cli) -> anyhow::Result<Stores> {
    if cli.database_url.is_some() {
        warn!("DATABASE_URL is set but this build lacks the `postgres` feature");
    }
    Ok(memory_stores())
}

fn memory_stores() -> Stores {
    warn!("Using in-memory session and customer stores");
    (
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryCustomerStore::new()),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let session = session_config(&cli)?;
    info!(cookie = %session.cookie_name, "Session cookie configured");

    let (sessions, customers) = build_stores(&cli).await?;
    let resolver = Arc::new(SessionResolver::new(session, sessions, customers));

    let config = NetworkConfig {
        host: cli.host.clone(),
        port: cli.port,
        cors_origins: cli.cors_origins.clone(),
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
    };

    let mut module = NetworkModule::new(config, resolver);
    let port = module.start().await?;
    info!(port, "Storefront server listening");

    module.serve(shutdown_signal()).await
}
