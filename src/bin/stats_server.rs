//! EWM statistics service
//!
//! Entry point of the stats service: an append-only hit log with an
//! aggregation endpoint, backed by its own database.

use std::net::SocketAddr;

use tracing::info;

use ewm::config::Settings;
use ewm::database::repositories::StatsRepository;
use ewm::handlers::stats::{stats_router, StatsAppState};
use ewm::services::StatsService;
use ewm::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting EWM stats service...");

    // The stats service owns a separate database
    info!("Connecting to stats database...");
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.stats_server.max_connections)
        .connect(&settings.stats_server.database_url)
        .await?;

    info!("Running stats database migrations...");
    sqlx::migrate!("./migrations_stats").run(&db_pool).await?;

    // Initialize service and router
    let stats_service = StatsService::new(StatsRepository::new(db_pool));
    let app = stats_router(StatsAppState { stats_service });

    // Bind and serve
    let addr: SocketAddr = format!(
        "{}:{}",
        settings.stats_server.host, settings.stats_server.port
    )
    .parse()?;
    info!("EWM stats service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
