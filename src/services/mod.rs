//! Services module
//!
//! This module contains the business logic services.

pub mod category;
pub mod comment;
pub mod compilation;
pub mod event;
pub mod request;
pub mod stats;
pub mod stats_client;
pub mod user;

// Re-export commonly used services
pub use category::CategoryService;
pub use comment::CommentService;
pub use compilation::CompilationService;
pub use event::{AdminSearchParams, EventService, PublicSearchParams};
pub use request::RequestService;
pub use stats::StatsService;
pub use stats_client::{StatsClient, APP_NAME};
pub use user::UserService;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing the main service's services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub request_service: RequestService,
    pub category_service: CategoryService,
    pub compilation_service: CompilationService,
    pub comment_service: CommentService,
    pub user_service: UserService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, settings: &Settings) -> Result<Self> {
        let stats_client = StatsClient::new(&settings.stats)?;

        Ok(Self {
            event_service: EventService::new(db.clone(), stats_client),
            request_service: RequestService::new(db.clone()),
            category_service: CategoryService::new(db.clone()),
            compilation_service: CompilationService::new(db.clone()),
            comment_service: CommentService::new(db.clone()),
            user_service: UserService::new(db),
        })
    }
}
