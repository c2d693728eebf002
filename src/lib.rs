//! EWM event management platform
//!
//! A two-service platform: the main service lets users create and browse
//! events, request participation and moderate content, while a separate
//! statistics service records page-view hits and serves aggregated view
//! counts. REST handlers delegate to services, services delegate to
//! sqlx-backed repositories, and one error type maps domain failures to
//! HTTP status codes at the boundary.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ErrorResponse, EwmError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{app_router, AppState};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
