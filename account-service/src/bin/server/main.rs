use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Authenticator;
use auth::SigningKey;
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

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_hours = config.auth.access_ttl_hours,
        refresh_ttl_hours = config.auth.refresh_ttl_hours,
        storage_timeout_secs = config.storage.timeout_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // The signing key lives only for the lifetime of this process.
    // Tokens issued before a restart do not verify after it.
    let signing_key = SigningKey::generate();
    tracing::info!("Signing key generated");

    let authenticator = Arc::new(Authenticator::with_ttls(
        &signing_key,
        chrono::Duration::hours(config.auth.access_ttl_hours),
        chrono::Duration::hours(config.auth.refresh_ttl_hours),
    ));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
        Duration::from_secs(config.storage.timeout_secs),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
