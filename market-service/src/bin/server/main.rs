use std::sync::Arc;

use auth::Authenticator;
use market_service::config::Config;
use market_service::config::StorageBackend;
use market_service::domain::auth::ports::AuthServicePort;
use market_service::domain::auth::service::AuthService;
use market_service::domain::item::ports::ItemServicePort;
use market_service::domain::item::service::ItemService;
use market_service::inbound::http::router::create_router;
use market_service::outbound::repositories::InMemoryCredentialStore;
use market_service::outbound::repositories::InMemoryItemRepository;
use market_service::outbound::repositories::PostgresCredentialStore;
use market_service::outbound::repositories::PostgresItemRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "market-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let (auth_service, item_service): (Arc<dyn AuthServicePort>, Arc<dyn ItemServicePort>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&config.database.url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
                let item_repository = Arc::new(PostgresItemRepository::new(pg_pool));
                (
                    Arc::new(AuthService::new(credential_store, authenticator)),
                    Arc::new(ItemService::new(item_repository)),
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                (
                    Arc::new(AuthService::new(
                        Arc::new(InMemoryCredentialStore::new()),
                        authenticator,
                    )),
                    Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new()))),
                )
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

    let http_application = create_router(auth_service, item_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
