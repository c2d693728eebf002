//! EWM main service
//!
//! Entry point of the event-management service.

use std::net::SocketAddr;

use tracing::info;

use ewm::config::Settings;
use ewm::database::{connection, DatabaseService};
use ewm::handlers::{app_router, AppState};
use ewm::services::ServiceFactory;
use ewm::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting EWM main service...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = connection::create_pool(&settings.database).await?;

    // Run database migrations
    connection::run_migrations(&db_pool).await?;

    // Initialize services
    let database_service = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(database_service, &settings)?;

    // Build router
    let app = app_router(AppState { services });

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    info!("EWM main service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
