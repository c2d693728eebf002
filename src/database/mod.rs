//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, create_pool_lazy, health_check, run_migrations, DatabasePool};
pub use repositories::{
    CategoryRepository, CommentRepository, CompilationRepository, EventRepository,
    LocationRepository, RequestRepository, StatsRepository, UserRepository,
};
pub use service::DatabaseService;
