use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Authenticator;
use auth::SaltLength;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let salt_length = SaltLength::clamped(config.password.salt_length);

    tracing::info!(
        http_port = config.server.http_port,
        storage = if config.database.is_some() { "postgresql" } else { "memory" },
        token_ttl_minutes = config.jwt.expiration_minutes,
        salt_length = salt_length.get(),
        "Configuration loaded"
    );

    // The only place the signing secret is read.
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
        salt_length,
    )?);

    let account_service: Arc<dyn AccountServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
            Arc::new(AccountService::new(repository, authenticator))
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            let repository = Arc::new(InMemoryAccountRepository::new());
            Arc::new(AccountService::new(repository, authenticator))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(account_service)).await?;

    tracing::info!("Server exited");

    Ok(())
}
