use share_it_booking::{
    adapters::postgres::{
        PostgresBookingRepository, PostgresCommentRepository, PostgresItemService,
        PostgresUserService,
    },
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "share_it_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Initialize adapters
    let service_deps = ServiceDependencies {
        booking_repository: Arc::new(PostgresBookingRepository::new(pool.clone())),
        item_service: Arc::new(PostgresItemService::new(pool.clone())),
        user_service: Arc::new(PostgresUserService::new(pool.clone())),
        comment_repository: Arc::new(PostgresCommentRepository::new(pool)),
    };

    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
